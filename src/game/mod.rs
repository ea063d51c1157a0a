//! Game Module
//!
//! Bridge building on top of the engine's physics and world helpers.

pub mod bridge;
pub mod buildables;
pub mod config;
pub mod edit_mode;

pub use bridge::{BridgeBuildHandler, BridgeEvent, BuildState, SegmentContainer, SegmentFactory};
pub use buildables::{BuildContext, BuildableHandler, BuildableId, Editable, GameBuildController};
pub use config::{BridgeBuildSettings, BridgeStyle, BuildablePreset, ConfigError, SegmentTemplate};
pub use edit_mode::{EditModeController, HandleRegistrar};
