//! Physics module for Bridge Forge
//!
//! The bridge core never owns a physics engine. It asks a black-box
//! [`OverlapQuery`] whether an oriented box overlaps anything on a layer, and
//! it picks edit colliders with plain ray tests. Both are implemented here
//! without external physics dependencies.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, Y is up, the build ground plane is Y = 0.
//!
//! # Submodules
//!
//! - [`collision`] - Ray-AABB / ray-OBB tests and OBB-OBB overlap (SAT)
//! - [`overlap`] - Layer masks, the overlap query trait and a reference static world

pub mod collision;
pub mod overlap;

// Re-export commonly used types at the physics module level
pub use collision::{Obb, Ray, obb_overlap, ray_aabb_intersect, ray_obb_intersect};
pub use overlap::{CombinedOverlap, LayerMask, OverlapQuery, StaticCollider, StaticWorld};
pub use glam::{Quat, Vec3};
