//! Bridge Segments
//!
//! Roles, ids and the live segment instance owned by the segment pool.

use glam::{Quat, Vec3};

use crate::game::config::SegmentTemplate;
use crate::physics::Obb;

/// Structural role of a segment within a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentRole {
    /// Abutment at the start endpoint
    Start,
    /// Main span pieces, laid out in the middle
    Middle,
    /// Filler pieces, split evenly around the middle block
    Extension,
    /// Abutment at the end endpoint
    End,
}

impl SegmentRole {
    pub const ALL: [SegmentRole; 4] = [
        SegmentRole::Start,
        SegmentRole::Middle,
        SegmentRole::Extension,
        SegmentRole::End,
    ];

    /// Start and End are present or absent; Middle and Extension are counted.
    pub fn is_counted(self) -> bool {
        matches!(self, SegmentRole::Middle | SegmentRole::Extension)
    }
}

/// Identifies one live segment instance in the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u64);

/// Visual validity marker of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialState {
    /// Template's own look (not checked, or reset after a failed edit drag)
    #[default]
    Neutral,
    /// Last overlap check passed
    Valid,
    /// Last overlap check hit world geometry
    Invalid,
}

/// A live segment instance.
///
/// Not `Clone`: each instance is owned by exactly one place (the pool, or the
/// handler's retiring list while its removal animation plays).
#[derive(Debug)]
pub struct BridgeSegment {
    pub id: SegmentId,
    pub role: SegmentRole,
    /// Length occupied along the span
    pub length: f32,
    /// Full build-collider size in local space
    pub size: Vec3,
    /// World-space center
    pub position: Vec3,
    /// Local +X points back toward the start endpoint
    pub rotation: Quat,
    /// Uniform scale of the whole segment, pulsed by hover feedback
    pub scale: f32,
    /// Uniform scale of the rendered model, driven by create/destroy animations
    pub model_scale: f32,
    pub material: MaterialState,
    /// Whether the per-segment build collider is active
    pub collider_enabled: bool,
    pub animate_in_duration: f32,
    pub animate_out_duration: f32,
}

impl BridgeSegment {
    pub fn new(id: SegmentId, role: SegmentRole, template: &SegmentTemplate) -> Self {
        Self {
            id,
            role,
            length: template.length,
            size: template.collider_size(),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            model_scale: 1.0,
            material: MaterialState::Neutral,
            collider_enabled: true,
            animate_in_duration: template.animate_in_duration,
            animate_out_duration: template.animate_out_duration,
        }
    }

    /// Build collider in world space, scaled by `shrink`.
    pub fn collider(&self, shrink: f32) -> Obb {
        Obb::new(self.position, self.size * 0.5 * shrink, self.rotation)
    }

    /// Sets the marker and reports whether it changed.
    pub fn set_material(&mut self, state: MaterialState) -> bool {
        let changed = self.material != state;
        self.material = state;
        changed
    }
}
