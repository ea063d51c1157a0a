//! Buildables
//!
//! Capabilities a placeable object exposes to the outer build and edit
//! layers, plus the build-mode controller and its pointer adapter.

pub mod buildable;
pub mod controller;
pub mod editable;
pub mod editable_collider;
pub mod input;

pub use buildable::{BuildContext, BuildableHandler};
pub use controller::GameBuildController;
pub use editable::Editable;
pub use editable_collider::EditCollider;
pub use input::{BuildGesture, BuildInput, PointerSample};

/// Identifies one buildable placed in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildableId(pub u32);
