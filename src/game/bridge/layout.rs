//! Spatial Layout
//!
//! Places every pooled segment end to end along the flattened span and runs
//! the collision check on each one.

use glam::{Quat, Vec3};

use super::pool::SegmentPool;
use super::segment::{MaterialState, SegmentId};
use super::validator::CollisionValidator;
use crate::world::flatten_to_ground;

/// Result of one layout pass.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LayoutOutcome {
    /// AND of every segment's collision check
    pub valid: bool,
    /// Segments whose material marker changed during this pass
    pub state_changes: Vec<(SegmentId, MaterialState)>,
}

/// Rotation that maps a segment's local +X onto `-direction`.
///
/// Segment models face back toward the start endpoint.
pub fn segment_rotation(direction: Vec3) -> Quat {
    if direction == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::X, -direction)
    }
}

/// Lay out the pool from `start` toward `end`.
///
/// Both endpoints are flattened to the ground plane first. Segments are
/// walked in span order with a cursor that advances by each segment's length,
/// so the span need not be fully covered. Every segment is checked, even
/// after one has already failed.
pub fn layout(pool: &mut SegmentPool, start: Vec3, end: Vec3, validator: &CollisionValidator<'_>) -> LayoutOutcome {
    let start = flatten_to_ground(start);
    let end = flatten_to_ground(end);
    let direction = (end - start).normalize_or_zero();
    let rotation = segment_rotation(direction);

    let mut outcome = LayoutOutcome {
        valid: true,
        state_changes: Vec::new(),
    };
    let mut cursor = start;

    for segment in pool.layout_order_mut() {
        segment.rotation = rotation;
        segment.position = cursor + direction * (segment.length * 0.5);
        cursor += direction * segment.length;

        let before = segment.material;
        let valid = validator.validate(segment);
        outcome.valid &= valid;
        if segment.material != before {
            outcome.state_changes.push((segment.id, segment.material));
        }
    }

    log::debug!(
        "[Bridge] Laid out {} segment(s) over {:.2}m, valid: {}",
        pool.len(),
        start.distance(end),
        outcome.valid
    );

    outcome
}
