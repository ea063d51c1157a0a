//! Ground Plane Helpers
//!
//! Y = 0 is the build plane. Pointer input is turned into build positions by
//! intersecting a camera ray with it.

use glam::Vec3;

/// Height of the build plane.
pub const GROUND_HEIGHT: f32 = 0.0;

/// Drops the vertical component of a position onto the ground plane.
pub fn flatten_to_ground(position: Vec3) -> Vec3 {
    Vec3::new(position.x, GROUND_HEIGHT, position.z)
}

/// Intersect a ray with the horizontal plane at `plane_height`.
///
/// # Arguments
/// * `origin` - Ray origin in world space
/// * `direction` - Ray direction (need not be normalized)
/// * `plane_height` - Y coordinate of the plane
///
/// # Returns
/// * `Some(Vec3)` - The intersection point on the plane
/// * `None` - If the ray is parallel to the plane or points away from it
pub fn ray_ground_intersection(origin: Vec3, direction: Vec3, plane_height: f32) -> Option<Vec3> {
    // Solve: origin.y + t * direction.y = plane_height
    if direction.y.abs() < 0.0001 {
        return None;
    }

    let t = (plane_height - origin.y) / direction.y;
    if t < 0.0 {
        // Intersection is behind the ray origin
        return None;
    }

    Some(origin + direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_drops_height() {
        assert_eq!(flatten_to_ground(Vec3::new(1.0, 7.5, -2.0)), Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_ray_hits_ground_from_above() {
        let hit = ray_ground_intersection(Vec3::new(2.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 1.0), GROUND_HEIGHT)
            .expect("downward ray should hit ground");
        assert!((hit - Vec3::new(2.0, 0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn test_ray_parallel_or_away_misses() {
        assert!(ray_ground_intersection(Vec3::new(0.0, 5.0, 0.0), Vec3::X, GROUND_HEIGHT).is_none());
        assert!(ray_ground_intersection(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, GROUND_HEIGHT).is_none());
    }
}
