//! Bridge signals, queued by the handler and drained by the host.

use super::segment::{MaterialState, SegmentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeEvent {
    /// Drag notifier update: `visible` is true while a valid bridge is shown
    DragStateChanged { visible: bool },
    /// The drag ended with a valid bridge
    BuildSucceeded,
    /// The drag ended without a bridge
    BuildFailed { length_valid: bool, collision_valid: bool },
    EditEntered,
    EditExited,
    /// A segment's validity marker changed
    SegmentStateChanged { id: SegmentId, state: MaterialState },
}
