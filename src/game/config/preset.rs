//! Buildable Presets
//!
//! A preset bundles a [`BridgeStyle`] with its [`BridgeBuildSettings`] and is
//! stored as JSON:
//!
//! ```json
//! {
//!   "name": "Stone bridge",
//!   "style": {
//!     "start":     { "name": "abutment", "length": 2.0 },
//!     "middle":    { "name": "arch",     "length": 4.0 },
//!     "extension": { "name": "deck",     "length": 1.0 },
//!     "end":       { "name": "abutment", "length": 2.0 }
//!   },
//!   "settings": { "minimum_bridge_length": 1.0 }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bridge_style::BridgeStyle;
use super::build_settings::BridgeBuildSettings;
use crate::game::bridge::SegmentRole;

/// Errors raised while loading or validating a preset.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read preset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{role:?} segment template {name:?}: {reason}")]
    InvalidTemplate {
        role: SegmentRole,
        name: String,
        reason: &'static str,
    },

    #[error("setting `{name}` must be positive and finite, got {value}")]
    InvalidSetting { name: &'static str, value: f32 },
}

/// A named bridge buildable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildablePreset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub style: BridgeStyle,
    #[serde(default)]
    pub settings: BridgeBuildSettings,
}

impl BuildablePreset {
    /// Parse and validate a preset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let preset: BuildablePreset = serde_json::from_str(json)?;
        preset.validate()?;
        Ok(preset)
    }

    /// Read, parse and validate a preset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let preset = Self::from_json_str(&json)?;
        log::info!(
            "[Config] Loaded bridge preset {:?} from {}",
            preset.name,
            path.display()
        );
        Ok(preset)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the builder cannot lay out.
    ///
    /// A role without a template is fine (it simply never appears); a template
    /// with a zero, negative or non-finite length or size is not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for role in SegmentRole::ALL {
            let Some(template) = self.style.template(role) else {
                continue;
            };
            let invalid = |reason| ConfigError::InvalidTemplate {
                role,
                name: template.name.clone(),
                reason,
            };
            if !template.has_usable_length() {
                return Err(invalid("length must be positive and finite"));
            }
            let size = template.collider_size();
            if !size.is_finite() || size.min_element() <= 0.0 {
                return Err(invalid("collider size must be positive and finite"));
            }
            if !(template.animate_in_duration >= 0.0 && template.animate_out_duration >= 0.0) {
                return Err(invalid("animation durations must not be negative"));
            }
        }

        let settings = &self.settings;
        for (name, value) in [
            ("minimum_bridge_length", settings.minimum_bridge_length),
            ("bridge_width", settings.bridge_width),
            ("edit_collider_height", settings.edit_collider_height),
            ("collision_shrink", settings.collision_shrink),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidSetting { name, value });
            }
        }

        Ok(())
    }
}
