//! Bridge Style Catalog
//!
//! A style names the template used for each structural role of a bridge.
//! Any role may be left unassigned; the planner then treats it as absent.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::game::bridge::SegmentRole;

/// Collider width used when a template does not specify its size (meters)
pub const DEFAULT_SEGMENT_WIDTH: f32 = 3.0;

/// Collider height used when a template does not specify its size (meters)
pub const DEFAULT_SEGMENT_HEIGHT: f32 = 1.0;

fn default_animation_duration() -> f32 {
    0.2
}

/// One segment template (the "prefab" a role instantiates).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentTemplate {
    /// Display name, used in logs
    #[serde(default)]
    pub name: String,
    /// Length the segment occupies along the span (meters)
    pub length: f32,
    /// Full build-collider size in the segment's local frame.
    /// Local X runs along the span. Defaults to `(length, 1, 3)`.
    #[serde(default)]
    pub size: Option<Vec3>,
    /// Seconds for the grow-in animation
    #[serde(default = "default_animation_duration")]
    pub animate_in_duration: f32,
    /// Seconds for the shrink-out animation
    #[serde(default = "default_animation_duration")]
    pub animate_out_duration: f32,
}

impl SegmentTemplate {
    pub fn new(name: impl Into<String>, length: f32) -> Self {
        Self {
            name: name.into(),
            length,
            size: None,
            animate_in_duration: default_animation_duration(),
            animate_out_duration: default_animation_duration(),
        }
    }

    pub fn with_size(mut self, size: Vec3) -> Self {
        self.size = Some(size);
        self
    }

    /// Build-collider size, falling back to a plank the length of the segment.
    pub fn collider_size(&self) -> Vec3 {
        self.size
            .unwrap_or(Vec3::new(self.length, DEFAULT_SEGMENT_HEIGHT, DEFAULT_SEGMENT_WIDTH))
    }

    /// A template only takes part in planning if its length is usable.
    pub fn has_usable_length(&self) -> bool {
        self.length.is_finite() && self.length > 0.0
    }
}

/// Template assignment for every role.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeStyle {
    #[serde(default)]
    pub start: Option<SegmentTemplate>,
    #[serde(default)]
    pub middle: Option<SegmentTemplate>,
    #[serde(default)]
    pub extension: Option<SegmentTemplate>,
    #[serde(default)]
    pub end: Option<SegmentTemplate>,
}

impl BridgeStyle {
    /// True if at least one role has a template.
    pub fn has_any_segment(&self) -> bool {
        SegmentRole::ALL.iter().any(|role| self.template(*role).is_some())
    }

    /// Template assigned to `role`, if any.
    pub fn template(&self, role: SegmentRole) -> Option<&SegmentTemplate> {
        match role {
            SegmentRole::Start => self.start.as_ref(),
            SegmentRole::Middle => self.middle.as_ref(),
            SegmentRole::Extension => self.extension.as_ref(),
            SegmentRole::End => self.end.as_ref(),
        }
    }

    /// Template for `role` if it is assigned and has a usable length.
    pub fn usable_template(&self, role: SegmentRole) -> Option<&SegmentTemplate> {
        self.template(role).filter(|t| t.has_usable_length())
    }

    /// Builder-style helper used by presets and tests.
    pub fn with(mut self, role: SegmentRole, template: SegmentTemplate) -> Self {
        let slot = match role {
            SegmentRole::Start => &mut self.start,
            SegmentRole::Middle => &mut self.middle,
            SegmentRole::Extension => &mut self.extension,
            SegmentRole::End => &mut self.end,
        };
        *slot = Some(template);
        self
    }
}
