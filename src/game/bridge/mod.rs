//! Bridge Builder Core
//!
//! Procedural bridges assembled from fixed-length segment templates between
//! two endpoints:
//!
//! - [`planner`] - span length -> segment counts
//! - [`pool`] - incremental reconciliation of live instances
//! - [`layout`] - placement along the span + collision validation
//! - [`animation`] - grow-in / shrink-out scale animations
//! - [`handler`] - the build/edit interaction state machine

pub mod animation;
pub mod events;
pub mod factory;
pub mod handler;
pub mod layout;
pub mod planner;
pub mod pool;
pub mod segment;
pub mod validator;

pub use animation::{AnimationFrame, AnimationKind, SegmentAnimator};
pub use events::BridgeEvent;
pub use factory::{SegmentContainer, SegmentFactory};
pub use handler::{BridgeBuildHandler, BridgeEndpoints, BuildState, RefreshOutcome};
pub use layout::{LayoutOutcome, layout, segment_rotation};
pub use planner::{BuildRequirement, plan};
pub use pool::{PendingChanges, SegmentPool};
pub use segment::{BridgeSegment, MaterialState, SegmentId, SegmentRole};
pub use validator::CollisionValidator;

// Re-exported so hosts driving a bridge only need this module
pub use crate::game::buildables::{BuildContext, BuildableHandler, Editable};
