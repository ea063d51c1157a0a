//! Edit Collider
//!
//! Single box covering a committed buildable. Edit mode picks editables by
//! casting the pointer ray against it.

use glam::{Quat, Vec3};

use super::BuildableId;
use crate::physics::{Obb, Ray, ray_obb_intersect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditCollider {
    /// Buildable the collider selects
    pub owner: BuildableId,
    pub center: Vec3,
    pub rotation: Quat,
    /// Full size; local Z runs along the buildable's forward axis
    pub size: Vec3,
    pub enabled: bool,
}

impl EditCollider {
    /// Disabled, zero-sized collider for `owner`.
    pub fn new(owner: BuildableId) -> Self {
        Self {
            owner,
            center: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            size: Vec3::ZERO,
            enabled: false,
        }
    }

    /// Fit the collider between two points: centered on their midpoint, local
    /// Z facing from `start` to `end`, sized `(width, height, distance)`.
    pub fn fit_between(&mut self, start: Vec3, end: Vec3, width: f32, height: f32) {
        let span = end - start;
        let forward = span.normalize_or_zero();

        self.center = (start + end) * 0.5;
        self.rotation = if forward == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::Z, forward)
        };
        self.size = Vec3::new(width, height, span.length());
    }

    pub fn obb(&self) -> Obb {
        Obb::new(self.center, self.size * 0.5, self.rotation)
    }

    /// Distance along `ray` to the collider, if it is enabled and hit.
    pub fn ray_hit(&self, ray: &Ray) -> Option<f32> {
        if !self.enabled {
            return None;
        }
        ray_obb_intersect(ray, &self.obb())
    }
}
