//! Layout Planner
//!
//! Turns a span length into segment counts. Fixed-length pieces are taken
//! greedily in priority order (start, end, middles, extensions) until the
//! remaining length budget no longer fits another piece.

use super::segment::SegmentRole;
use crate::game::config::BridgeStyle;

/// How many segments of each role a span needs.
///
/// Produced fresh on every refresh and compared against the previous one to
/// drive reconciliation of the segment pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BuildRequirement {
    pub has_start: bool,
    pub has_end: bool,
    pub middle_count: usize,
    pub extension_count: usize,
}

static_assertions::assert_impl_all!(BuildRequirement: Copy, Eq, Send, Sync);

impl BuildRequirement {
    /// Required instances of `role`.
    pub fn count(&self, role: SegmentRole) -> usize {
        match role {
            SegmentRole::Start => usize::from(self.has_start),
            SegmentRole::Middle => self.middle_count,
            SegmentRole::Extension => self.extension_count,
            SegmentRole::End => usize::from(self.has_end),
        }
    }

    /// Total number of segments.
    pub fn total(&self) -> usize {
        SegmentRole::ALL.iter().map(|role| self.count(*role)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Plan the segments for a span of `total_length` meters.
///
/// Start and end abutments are only used when the remaining budget is
/// strictly longer than the piece. An odd extension count is rounded down by
/// one unless `allow_odd_extension_counts` is set, so extensions stay
/// symmetric around the middle block; the freed length is not re-spent.
/// Unassigned roles consume nothing. Degenerate spans plan nothing.
pub fn plan(total_length: f32, style: &BridgeStyle, allow_odd_extension_counts: bool) -> BuildRequirement {
    if !total_length.is_finite() || total_length <= 0.0 {
        return BuildRequirement::default();
    }

    let mut remaining = total_length;

    let mut take_abutment = |role: SegmentRole| match style.usable_template(role) {
        Some(template) if remaining > template.length => {
            remaining -= template.length;
            true
        }
        _ => false,
    };
    let has_start = take_abutment(SegmentRole::Start);
    let has_end = take_abutment(SegmentRole::End);

    let middle_count = whole_pieces(remaining, style, SegmentRole::Middle);
    if let Some(template) = style.usable_template(SegmentRole::Middle) {
        remaining -= template.length * middle_count as f32;
    }

    let mut extension_count = whole_pieces(remaining, style, SegmentRole::Extension);
    if !allow_odd_extension_counts && extension_count % 2 != 0 {
        extension_count -= 1;
    }

    BuildRequirement {
        has_start,
        has_end,
        middle_count,
        extension_count,
    }
}

/// How many whole pieces of `role` fit into `remaining`.
fn whole_pieces(remaining: f32, style: &BridgeStyle, role: SegmentRole) -> usize {
    match style.usable_template(role) {
        Some(template) if remaining > 0.0 => (remaining / template.length).floor() as usize,
        _ => 0,
    }
}
