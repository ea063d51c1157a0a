//! Collision detection module
//!
//! Ray and box tests used by the bridge builder:
//!
//! - ray vs axis-aligned box (slab method), the building block for picking
//! - ray vs oriented box, used to pick a committed bridge's edit collider
//! - oriented box vs oriented box (separating axis theorem), used by the
//!   reference [`StaticWorld`](super::StaticWorld) to answer overlap queries
//!
//! # Example
//!
//! ```ignore
//! use bridge_forge_engine::physics::{Obb, Ray, obb_overlap, ray_obb_intersect};
//! use glam::{Quat, Vec3};
//!
//! let rock = Obb::new(Vec3::new(4.0, 0.5, 0.0), Vec3::splat(0.5), Quat::IDENTITY);
//! let plank = Obb::new(Vec3::new(4.2, 0.2, 0.0), Vec3::new(1.0, 0.1, 1.5), Quat::IDENTITY);
//! assert!(obb_overlap(&rock, &plank));
//!
//! let ray = Ray::new(Vec3::new(4.0, 10.0, 0.0), Vec3::NEG_Y);
//! let t = ray_obb_intersect(&ray, &rock);
//! ```

use glam::{Quat, Vec3};

/// Axis projections shorter than this are treated as degenerate (parallel edges).
const AXIS_EPSILON: f32 = 1e-6;

/// A world-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray. The direction is normalized; a zero direction stays zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// An oriented bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// World-space center
    pub center: Vec3,
    /// Half size along each local axis
    pub half_extents: Vec3,
    /// Rotation from local to world space
    pub rotation: Quat,
}

impl Obb {
    pub fn new(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            half_extents,
            rotation,
        }
    }

    /// Axis-aligned box from min/max corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
            rotation: Quat::IDENTITY,
        }
    }

    /// Local X, Y and Z axes in world space.
    pub fn axes(&self) -> [Vec3; 3] {
        [
            self.rotation * Vec3::X,
            self.rotation * Vec3::Y,
            self.rotation * Vec3::Z,
        ]
    }

    /// Half length of this box's shadow on `axis`.
    fn projected_radius(&self, axis: Vec3) -> f32 {
        let [ax, ay, az] = self.axes();
        self.half_extents.x * ax.dot(axis).abs()
            + self.half_extents.y * ay.dot(axis).abs()
            + self.half_extents.z * az.dot(axis).abs()
    }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method intersects the ray with each pair of axis-aligned planes
/// bounding the box and keeps the overlapping parameter interval.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the entry point, or to the exit
///   point when the origin is inside the box
/// * `None` - No intersection or the box is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero components become huge slopes instead of dividing by zero
    let inv = |d: f32| {
        if d.abs() > 1e-10 {
            1.0 / d
        } else {
            f32::MAX * d.signum()
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// Ray vs oriented box. The ray is moved into the box's local frame and
/// tested with [`ray_aabb_intersect`].
pub fn ray_obb_intersect(ray: &Ray, obb: &Obb) -> Option<f32> {
    let inverse = obb.rotation.inverse();
    let local_origin = inverse * (ray.origin - obb.center);
    let local_dir = inverse * ray.direction;
    ray_aabb_intersect(local_origin, local_dir, -obb.half_extents, obb.half_extents)
}

/// True if the interiors of two oriented boxes overlap.
///
/// Separating axis theorem over the 15 candidate axes (3 face normals of each
/// box plus the 9 edge cross products). Touching faces are NOT an overlap.
pub fn obb_overlap(a: &Obb, b: &Obb) -> bool {
    let axes_a = a.axes();
    let axes_b = b.axes();
    let offset = b.center - a.center;

    let separated = |axis: Vec3| {
        let len = axis.length();
        if len < AXIS_EPSILON {
            return false;
        }
        let axis = axis / len;
        offset.dot(axis).abs() >= a.projected_radius(axis) + b.projected_radius(axis)
    };

    for axis in axes_a.iter().chain(axes_b.iter()) {
        if separated(*axis) {
            return false;
        }
    }

    for ea in &axes_a {
        for eb in &axes_b {
            if separated(ea.cross(*eb)) {
                return false;
            }
        }
    }

    true
}
