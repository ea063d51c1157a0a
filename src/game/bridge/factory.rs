//! Segment Factory
//!
//! The host scene creates and destroys segment objects; the bridge core only
//! ever asks for one to be instantiated from a template or disposed by id.
//! [`SegmentContainer`] is the in-memory container used headless and in tests.

use std::collections::HashMap;

use super::segment::{SegmentId, SegmentRole};
use crate::game::config::SegmentTemplate;

/// Instance factory + disposal capability injected into the bridge core.
pub trait SegmentFactory {
    /// Create a new instance of `template` for `role` and return its id.
    fn instantiate(&mut self, role: SegmentRole, template: &SegmentTemplate) -> SegmentId;

    /// Destroy the instance. Called exactly once per instantiated id.
    fn dispose(&mut self, id: SegmentId);
}

/// Headless container that hands out ids and tracks which are alive.
#[derive(Debug, Default)]
pub struct SegmentContainer {
    next_id: u64,
    live: HashMap<SegmentId, SegmentRole>,
    /// Total instances ever created
    pub created_total: usize,
    /// Total instances disposed
    pub disposed_total: usize,
}

impl SegmentContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances currently alive.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, id: SegmentId) -> bool {
        self.live.contains_key(&id)
    }

    /// Live instances of one role.
    pub fn live_of_role(&self, role: SegmentRole) -> usize {
        self.live.values().filter(|r| **r == role).count()
    }
}

impl SegmentFactory for SegmentContainer {
    fn instantiate(&mut self, role: SegmentRole, template: &SegmentTemplate) -> SegmentId {
        self.next_id += 1;
        let id = SegmentId(self.next_id);
        self.live.insert(id, role);
        self.created_total += 1;
        log::trace!("[Segments] Instantiated {:?} {:?} ({})", role, id, template.name);
        id
    }

    fn dispose(&mut self, id: SegmentId) {
        if self.live.remove(&id).is_some() {
            self.disposed_total += 1;
        } else {
            log::warn!("[Segments] Dispose of unknown or already disposed {:?}", id);
        }
    }
}
