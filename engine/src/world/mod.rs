//! World Module
//!
//! World-space conventions shared by the builder. Bridges are laid out on a
//! flat ground plane at Y = 0; endpoints are flattened onto it before layout
//! and pointer rays are intersected with it to produce build positions.

pub mod ground;

pub use ground::{GROUND_HEIGHT, flatten_to_ground, ray_ground_intersection};
