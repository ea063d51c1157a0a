//! Bridge Build Settings
//!
//! Tunables for one bridge buildable. `Default` carries the values the
//! builder ships with.

use serde::{Deserialize, Serialize};

use crate::physics::LayerMask;

/// Build interaction tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeBuildSettings {
    /// Keep odd extension counts instead of rounding down to an even count
    pub allow_odd_extension_counts: bool,
    /// Spans shorter than this (meters) produce no bridge
    pub minimum_bridge_length: f32,
    /// Width of the committed edit collider (meters)
    pub bridge_width: f32,
    /// Height of the committed edit collider (meters)
    pub edit_collider_height: f32,
    /// Scale applied to a segment's collider before the overlap query.
    /// Slightly below 1 so touching neighbours are not reported as hits.
    pub collision_shrink: f32,
    /// Layers a segment must stay clear of: world geometry and placed
    /// buildables by default
    pub collision_layers: LayerMask,
}

impl Default for BridgeBuildSettings {
    fn default() -> Self {
        Self {
            allow_odd_extension_counts: false,
            minimum_bridge_length: 1.0,
            bridge_width: 3.0,
            edit_collider_height: 10.0,
            collision_shrink: 0.9,
            collision_layers: LayerMask::DEFAULT.union(LayerMask::BUILDABLE),
        }
    }
}
