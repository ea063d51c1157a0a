//! Position Handles
//!
//! Draggable endpoint handles and the two traits that connect them to their
//! owner: the owner registers handles through a [`HandleRegistrar`] and is
//! told about drags through [`HandleListener`].

use glam::Vec3;
use thiserror::Error;

use crate::game::buildables::{BuildContext, BuildableId};

/// Which end of a span a handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    End,
}

/// Identifies one registered handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleKey {
    pub owner: BuildableId,
    pub endpoint: Endpoint,
}

impl HandleKey {
    pub fn new(owner: BuildableId, endpoint: Endpoint) -> Self {
        Self { owner, endpoint }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum HandleError {
    #[error("handle {0:?} is already registered")]
    AlreadyRegistered(HandleKey),

    #[error("handle {key:?} registered at non-finite position {position:?}")]
    InvalidPosition { key: HandleKey, position: Vec3 },
}

/// Accepts handle registrations from editables.
pub trait HandleRegistrar {
    /// Add a handle at `position`. A key can only be registered once; the
    /// first registration wins.
    fn register_handle(&mut self, key: HandleKey, position: Vec3) -> Result<(), HandleError>;

    /// Returns whether a handle was removed.
    fn remove_handle(&mut self, key: HandleKey) -> bool;
}

/// Receives drags of the handles an editable registered.
pub trait HandleListener {
    /// The handle for `endpoint` moved to `position` (already on the ground
    /// plane, but listeners pin it again).
    fn handle_moved(&mut self, endpoint: Endpoint, position: Vec3, ctx: &mut BuildContext<'_>);

    /// Asked when a drag ends; `false` makes the handle snap back.
    fn handle_drag_is_valid(&mut self, ctx: &mut BuildContext<'_>) -> bool;

    /// The drag was rejected and the handle has been moved back.
    fn handle_drag_failed(&mut self);
}

/// One draggable handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionHandle {
    pub position: Vec3,
    drag_start: Option<Vec3>,
}

impl PositionHandle {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            drag_start: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Remember where the drag began so a rejected drag can revert.
    pub fn begin_drag(&mut self) {
        self.drag_start = Some(self.position);
    }

    /// Returns the drag start, or `None` if no drag was in progress.
    pub fn end_drag(&mut self) -> Option<Vec3> {
        self.drag_start.take()
    }
}
