//! Edit Mode
//!
//! Selection, hover feedback and endpoint handles for committed buildables.

pub mod controller;
pub mod handle;

pub use controller::{EditModeController, HandleDragResult};
pub use handle::{Endpoint, HandleError, HandleKey, HandleListener, HandleRegistrar, PositionHandle};
