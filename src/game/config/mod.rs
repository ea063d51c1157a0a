//! Config Module
//!
//! Bridge presets: which segment template fills each structural role, and the
//! tunables of the build interaction. Presets are plain data loaded from JSON.

pub mod bridge_style;
pub mod build_settings;
pub mod preset;

pub use bridge_style::{BridgeStyle, DEFAULT_SEGMENT_HEIGHT, DEFAULT_SEGMENT_WIDTH, SegmentTemplate};
pub use build_settings::BridgeBuildSettings;
pub use preset::{BuildablePreset, ConfigError};
