//! Bridge Forge Engine Library
//!
//! Drag-to-build segmented bridges. A bridge is assembled from fixed-length
//! segment templates (start, middle, extension, end) stretched between two
//! movable endpoints. Every time an endpoint moves the required segment counts
//! are re-planned and a live pool of segment instances is patched to match,
//! laid out along the span and validated against world geometry.
//!
//! # Modules
//!
//! - [`physics`] - Oriented boxes, ray tests and the world overlap query
//! - [`world`] - Ground-plane helpers
//! - [`game`] - Bridge core, buildable/editable capabilities, edit mode
//!
//! # Example
//!
//! ```ignore
//! use bridge_forge_engine::game::bridge::{BridgeBuildHandler, BuildContext, BuildableHandler, SegmentContainer};
//! use bridge_forge_engine::game::buildables::BuildableId;
//! use bridge_forge_engine::game::config::BuildablePreset;
//! use bridge_forge_engine::physics::StaticWorld;
//! use glam::Vec3;
//!
//! let preset = BuildablePreset::load("presets/stone_bridge.json")?;
//! let mut handler = BridgeBuildHandler::from_preset(BuildableId(1), &preset);
//! let mut container = SegmentContainer::new();
//! let world = StaticWorld::new();
//! let mut ctx = BuildContext::new(&mut container, Some(&world));
//!
//! handler.on_build_start(Vec3::ZERO, &mut ctx);
//! handler.on_build_drag(Vec3::new(8.0, 0.0, 0.0), &mut ctx);
//! let built = handler.on_build_end(Vec3::new(12.0, 0.0, 0.0), &mut ctx);
//! ```

pub mod physics;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{flatten_to_ground, ray_ground_intersection};
// Re-export commonly used physics types
pub use physics::{LayerMask, Obb, OverlapQuery, Ray, StaticWorld};
