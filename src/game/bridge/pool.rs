//! Segment Pool
//!
//! The live segment instances of one bridge, and the reconciler that patches
//! them toward a new [`BuildRequirement`] with as little churn as possible.
//!
//! Counted roles only ever grow by appending and shrink by truncating the
//! tail, so an instance never changes its position within its sequence.
//! Layout walks the sequences in order; a stable order means surviving
//! instances keep their place on the bridge.

use super::factory::SegmentFactory;
use super::planner::BuildRequirement;
use super::segment::{BridgeSegment, SegmentId, SegmentRole};
use crate::game::config::BridgeStyle;

/// Instances to animate in and out after a reconciliation.
#[derive(Debug, Default)]
pub struct PendingChanges {
    /// Newly instantiated ids, in creation order
    pub to_create: Vec<SegmentId>,
    /// Instances dropped from the pool, in removal order
    pub to_remove: Vec<BridgeSegment>,
}

impl PendingChanges {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty()
    }
}

/// Live segment instances of one bridge.
#[derive(Debug, Default)]
pub struct SegmentPool {
    pub start: Option<BridgeSegment>,
    pub end: Option<BridgeSegment>,
    pub middles: Vec<BridgeSegment>,
    pub extensions: Vec<BridgeSegment>,
}

impl SegmentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow or shrink the pool from `previous` to `next`.
    ///
    /// Start and end only change when their presence flips. Counted roles
    /// truncate from the tail or append new instances until they match.
    pub fn reconcile(
        &mut self,
        previous: &BuildRequirement,
        next: &BuildRequirement,
        style: &BridgeStyle,
        factory: &mut dyn SegmentFactory,
    ) -> PendingChanges {
        let mut changes = PendingChanges::default();

        reconcile_presence(
            &mut self.start,
            SegmentRole::Start,
            previous.has_start,
            next.has_start,
            style,
            factory,
            &mut changes,
        );
        reconcile_presence(
            &mut self.end,
            SegmentRole::End,
            previous.has_end,
            next.has_end,
            style,
            factory,
            &mut changes,
        );
        reconcile_count(
            &mut self.middles,
            SegmentRole::Middle,
            next.middle_count,
            style,
            factory,
            &mut changes,
        );
        reconcile_count(
            &mut self.extensions,
            SegmentRole::Extension,
            next.extension_count,
            style,
            factory,
            &mut changes,
        );

        if !changes.is_empty() {
            log::debug!(
                "[Bridge] Reconciled pool: +{} -{} -> {:?}",
                changes.to_create.len(),
                changes.to_remove.len(),
                self.requirement()
            );
        }

        changes
    }

    /// What the pool currently holds, expressed as a requirement.
    pub fn requirement(&self) -> BuildRequirement {
        BuildRequirement {
            has_start: self.start.is_some(),
            has_end: self.end.is_some(),
            middle_count: self.middles.len(),
            extension_count: self.extensions.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.requirement().total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All segments: start, middles, extensions, end.
    pub fn iter(&self) -> impl Iterator<Item = &BridgeSegment> + '_ {
        self.start
            .iter()
            .chain(self.middles.iter())
            .chain(self.extensions.iter())
            .chain(self.end.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut BridgeSegment> + '_ {
        self.start
            .iter_mut()
            .chain(self.middles.iter_mut())
            .chain(self.extensions.iter_mut())
            .chain(self.end.iter_mut())
    }

    /// Segments in span order: start, first half of the extensions, middles,
    /// remaining extensions, end. The first half is `count / 2`, so an odd
    /// count puts the extra extension after the middle block.
    pub fn layout_order(&self) -> impl Iterator<Item = &BridgeSegment> + '_ {
        let (lead, trail) = self.extensions.split_at(self.extensions.len() / 2);
        self.start
            .iter()
            .chain(lead.iter())
            .chain(self.middles.iter())
            .chain(trail.iter())
            .chain(self.end.iter())
    }

    pub fn layout_order_mut(&mut self) -> impl Iterator<Item = &mut BridgeSegment> + '_ {
        let half = self.extensions.len() / 2;
        let (lead, trail) = self.extensions.split_at_mut(half);
        self.start
            .iter_mut()
            .chain(lead.iter_mut())
            .chain(self.middles.iter_mut())
            .chain(trail.iter_mut())
            .chain(self.end.iter_mut())
    }

    /// Empty the pool, returning every instance it held.
    pub fn drain_all(&mut self) -> Vec<BridgeSegment> {
        let mut drained = Vec::with_capacity(self.len());
        drained.extend(self.start.take());
        drained.append(&mut self.middles);
        drained.append(&mut self.extensions);
        drained.extend(self.end.take());
        drained
    }
}

fn reconcile_presence(
    slot: &mut Option<BridgeSegment>,
    role: SegmentRole,
    previous: bool,
    next: bool,
    style: &BridgeStyle,
    factory: &mut dyn SegmentFactory,
    changes: &mut PendingChanges,
) {
    debug_assert!(!role.is_counted());
    if previous == next {
        return;
    }

    if let Some(existing) = slot.take() {
        changes.to_remove.push(existing);
    }

    if next {
        *slot = instantiate(role, style, factory);
        if let Some(segment) = slot {
            changes.to_create.push(segment.id);
        }
    }
}

fn reconcile_count(
    list: &mut Vec<BridgeSegment>,
    role: SegmentRole,
    count: usize,
    style: &BridgeStyle,
    factory: &mut dyn SegmentFactory,
    changes: &mut PendingChanges,
) {
    debug_assert!(role.is_counted());
    while list.len() > count {
        if let Some(removed) = list.pop() {
            changes.to_remove.push(removed);
        }
    }

    while list.len() < count {
        let Some(segment) = instantiate(role, style, factory) else {
            break;
        };
        changes.to_create.push(segment.id);
        list.push(segment);
    }
}

fn instantiate(
    role: SegmentRole,
    style: &BridgeStyle,
    factory: &mut dyn SegmentFactory,
) -> Option<BridgeSegment> {
    let Some(template) = style.usable_template(role) else {
        log::debug!("[Bridge] No usable {:?} template, role stays empty", role);
        return None;
    };
    let id = factory.instantiate(role, template);
    Some(BridgeSegment::new(id, role, template))
}
