//! World overlap queries
//!
//! The bridge builder treats the physics world as a black box that answers a
//! single question: how many colliders on these layers overlap this oriented
//! box? [`OverlapQuery`] is that seam. [`StaticWorld`] is a small reference
//! implementation backed by a flat list of oriented boxes, used by the sandbox
//! binary and the tests.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::{Obb, obb_overlap};

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// The default world layer (static terrain, props).
    pub const DEFAULT: LayerMask = LayerMask(1 << 0);
    /// Committed buildables' edit colliders.
    pub const BUILDABLE: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing only `layer` (0..32).
    pub fn layer(layer: u32) -> Self {
        LayerMask(1u32.checked_shl(layer).unwrap_or(0))
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

/// Oriented-box overlap test against the world.
pub trait OverlapQuery {
    /// Number of colliders on `layer_mask` overlapping the box.
    fn overlap_box(
        &self,
        center: Vec3,
        half_extents: Vec3,
        orientation: Quat,
        layer_mask: LayerMask,
    ) -> usize;
}

/// A static collider registered in a [`StaticWorld`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    pub bounds: Obb,
    pub layer: LayerMask,
}

/// Flat list of static oriented boxes.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    colliders: Vec<StaticCollider>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a box on the default layer and returns its index.
    pub fn add_box(&mut self, bounds: Obb) -> usize {
        self.add_on_layer(bounds, LayerMask::DEFAULT)
    }

    pub fn add_on_layer(&mut self, bounds: Obb, layer: LayerMask) -> usize {
        self.colliders.push(StaticCollider { bounds, layer });
        self.colliders.len() - 1
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn colliders(&self) -> &[StaticCollider] {
        &self.colliders
    }
}

impl OverlapQuery for StaticWorld {
    fn overlap_box(
        &self,
        center: Vec3,
        half_extents: Vec3,
        orientation: Quat,
        layer_mask: LayerMask,
    ) -> usize {
        let probe = Obb::new(center, half_extents, orientation);
        self.colliders
            .iter()
            .filter(|c| c.layer.intersects(layer_mask))
            .filter(|c| obb_overlap(&probe, &c.bounds))
            .count()
    }
}

/// Two overlap sources queried as one; hit counts add up.
#[derive(Clone, Copy)]
pub struct CombinedOverlap<'a> {
    pub primary: &'a dyn OverlapQuery,
    pub secondary: &'a dyn OverlapQuery,
}

impl OverlapQuery for CombinedOverlap<'_> {
    fn overlap_box(
        &self,
        center: Vec3,
        half_extents: Vec3,
        orientation: Quat,
        layer_mask: LayerMask,
    ) -> usize {
        self.primary.overlap_box(center, half_extents, orientation, layer_mask)
            + self.secondary.overlap_box(center, half_extents, orientation, layer_mask)
    }
}
