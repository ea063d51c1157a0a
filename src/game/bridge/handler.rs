//! Bridge Build Handler
//!
//! Interaction state machine for one bridge buildable. It reacts to the
//! build gesture (start, drag, end, cancel), and once committed to edit
//! mode (handles on both endpoints, hover feedback).
//!
//! Every endpoint change runs the same refresh pipeline:
//! plan -> reconcile the pool -> lay out and validate -> animate changes.
//!
//! ```text
//!            on_build_start
//!   Idle ──────────────────► Dragging ──on_build_end(valid)──► Committed ⇄ editing
//!    ▲                          │
//!    └──────on_build_cancel─────┤
//!                               └──on_build_end(invalid)──► Cancelled
//! ```

use std::collections::{HashMap, HashSet};

use glam::Vec3;

use super::animation::{AnimationFrame, AnimationKind, SegmentAnimator};
use super::events::BridgeEvent;
use super::factory::SegmentFactory;
use super::layout::layout;
use super::planner::{BuildRequirement, plan};
use super::pool::{PendingChanges, SegmentPool};
use super::segment::{BridgeSegment, MaterialState, SegmentId};
use super::validator::CollisionValidator;
use crate::game::buildables::{BuildContext, BuildableHandler, BuildableId, EditCollider, Editable};
use crate::game::config::{BridgeBuildSettings, BridgeStyle, BuildablePreset};
use crate::game::edit_mode::{Endpoint, HandleKey, HandleListener, HandleRegistrar};
use crate::world::flatten_to_ground;

/// Hover pulse frequency (radians per second)
const HOVER_PULSE_SPEED: f32 = 5.0;
/// Phase offset between neighbouring segments
const HOVER_PULSE_PHASE: f32 = 0.5;
/// Peak scale change of the hover pulse
const HOVER_PULSE_AMPLITUDE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildState {
    /// Nothing placed
    #[default]
    Idle,
    /// Build gesture in progress
    Dragging,
    /// Placed; may be edited
    Committed,
    /// Build gesture ended without a bridge
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeEndpoints {
    pub start: Vec3,
    pub end: Vec3,
}

impl BridgeEndpoints {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    fn get_mut(&mut self, endpoint: Endpoint) -> &mut Vec3 {
        match endpoint {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        }
    }
}

/// Summary of one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub created: usize,
    pub removed: usize,
    /// Every segment passed its collision check
    pub valid: bool,
}

pub struct BridgeBuildHandler {
    id: BuildableId,
    style: BridgeStyle,
    settings: BridgeBuildSettings,
    endpoints: Option<BridgeEndpoints>,
    requirement: BuildRequirement,
    pool: SegmentPool,
    /// Segments removed from the pool whose destroy animation is playing
    retiring: Vec<BridgeSegment>,
    animator: SegmentAnimator,
    state: BuildState,
    editing: bool,
    length_valid: bool,
    collision_valid: bool,
    bridge_visible: bool,
    edit_collider: EditCollider,
    events: Vec<BridgeEvent>,
}

impl BridgeBuildHandler {
    pub fn new(id: BuildableId, style: BridgeStyle, settings: BridgeBuildSettings) -> Self {
        Self {
            id,
            style,
            settings,
            endpoints: None,
            requirement: BuildRequirement::default(),
            pool: SegmentPool::new(),
            retiring: Vec::new(),
            animator: SegmentAnimator::new(),
            state: BuildState::Idle,
            editing: false,
            length_valid: false,
            collision_valid: false,
            bridge_visible: false,
            edit_collider: EditCollider::new(id),
            events: Vec::new(),
        }
    }

    pub fn from_preset(id: BuildableId, preset: &BuildablePreset) -> Self {
        Self::new(id, preset.style.clone(), preset.settings.clone())
    }

    pub fn id(&self) -> BuildableId {
        self.id
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn style(&self) -> &BridgeStyle {
        &self.style
    }

    pub fn settings(&self) -> &BridgeBuildSettings {
        &self.settings
    }

    pub fn endpoints(&self) -> Option<BridgeEndpoints> {
        self.endpoints
    }

    pub fn requirement(&self) -> BuildRequirement {
        self.requirement
    }

    pub fn pool(&self) -> &SegmentPool {
        &self.pool
    }

    pub fn retiring(&self) -> &[BridgeSegment] {
        &self.retiring
    }

    pub fn length_valid(&self) -> bool {
        self.length_valid
    }

    pub fn collision_valid(&self) -> bool {
        self.collision_valid
    }

    /// True while a bridge long enough to build is shown during a drag.
    pub fn is_bridge_visible(&self) -> bool {
        self.bridge_visible
    }

    pub fn is_animating(&self, id: SegmentId) -> bool {
        self.animator.is_animating(id)
    }

    /// Segments with a grow or shrink animation still running.
    pub fn animating_count(&self) -> usize {
        self.animator.active_count()
    }

    /// Take all signals queued since the last call.
    pub fn drain_events(&mut self) -> Vec<BridgeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Bring the pool, layout and validity up to date with the endpoints.
    ///
    /// Returns `None` without touching anything when the style has no
    /// segments or there are no endpoints yet. Running it twice with the
    /// same endpoints creates and removes nothing the second time.
    pub fn refresh(&mut self, ctx: &mut BuildContext<'_>) -> Option<RefreshOutcome> {
        let endpoints = self.endpoints?;
        if !self.style.has_any_segment() {
            return None;
        }

        let next = plan(
            endpoints.length(),
            &self.style,
            self.settings.allow_odd_extension_counts,
        );
        let changes = self
            .pool
            .reconcile(&self.requirement, &next, &self.style, &mut *ctx.factory);
        self.requirement = self.pool.requirement();

        let validator = CollisionValidator::new(ctx.world, &self.settings);
        let outcome = layout(&mut self.pool, endpoints.start, endpoints.end, &validator);
        self.collision_valid = outcome.valid;
        log::debug!(
            "[Bridge] {:?} laid out {} segment(s) over {:.2} m (valid: {}, world checked: {})",
            self.id,
            self.pool.len(),
            endpoints.length(),
            outcome.valid,
            validator.is_active()
        );
        self.events.extend(
            outcome
                .state_changes
                .into_iter()
                .map(|(id, state)| BridgeEvent::SegmentStateChanged { id, state }),
        );

        let result = RefreshOutcome {
            created: changes.to_create.len(),
            removed: changes.to_remove.len(),
            valid: outcome.valid,
        };
        self.dispatch_changes(changes);
        Some(result)
    }

    /// Throw every segment away and build again from scratch at the current
    /// endpoints.
    pub fn rebuild_completely(&mut self, ctx: &mut BuildContext<'_>) -> Option<RefreshOutcome> {
        log::debug!("[Bridge] {:?} full rebuild", self.id);
        self.teardown(&mut *ctx.factory);
        let outcome = self.refresh(ctx);
        if self.state == BuildState::Committed && !self.editing {
            self.commit();
        }
        outcome
    }

    /// Advance segment animations and dispose instances whose removal
    /// animation finished.
    pub fn tick(&mut self, dt: f32, factory: &mut dyn SegmentFactory) {
        let frame = self.animator.tick(dt);
        self.apply_animation_frame(frame, factory);
    }

    /// Finish every running animation now.
    pub fn flush_animations(&mut self, factory: &mut dyn SegmentFactory) {
        let frame = self.animator.finish_all();
        self.apply_animation_frame(frame, factory);
    }

    fn dispatch_changes(&mut self, changes: PendingChanges) {
        for mut segment in changes.to_remove {
            segment.collider_enabled = false;
            self.animator
                .start_destroy(segment.id, segment.animate_out_duration, segment.model_scale);
            self.retiring.push(segment);
        }

        if changes.to_create.is_empty() {
            return;
        }
        let created: HashSet<SegmentId> = changes.to_create.into_iter().collect();
        for segment in self.pool.iter_mut().filter(|s| created.contains(&s.id)) {
            segment.model_scale = 0.0;
            self.animator.start_create(segment.id, segment.animate_in_duration);
        }
    }

    fn apply_animation_frame(&mut self, frame: AnimationFrame, factory: &mut dyn SegmentFactory) {
        let scales: HashMap<SegmentId, f32> = frame.scales.into_iter().collect();
        if !scales.is_empty() {
            for segment in self.pool.iter_mut().chain(self.retiring.iter_mut()) {
                if let Some(scale) = scales.get(&segment.id) {
                    segment.model_scale = *scale;
                }
            }
        }

        let destroyed: HashSet<SegmentId> = frame
            .finished
            .into_iter()
            .filter(|(_, kind)| *kind == AnimationKind::Destroy)
            .map(|(id, _)| id)
            .collect();
        if destroyed.is_empty() {
            return;
        }
        self.retiring.retain(|segment| {
            if destroyed.contains(&segment.id) {
                factory.dispose(segment.id);
                false
            } else {
                true
            }
        });
    }

    /// Dispose every instance, pooled or retiring, and forget the plan.
    fn teardown(&mut self, factory: &mut dyn SegmentFactory) {
        self.animator.cancel_all();
        for segment in self.pool.drain_all() {
            factory.dispose(segment.id);
        }
        for segment in self.retiring.drain(..) {
            factory.dispose(segment.id);
        }
        self.requirement = BuildRequirement::default();
        self.collision_valid = false;
        self.edit_collider.enabled = false;
    }

    /// Build gesture ended without a bridge.
    fn fail_build(&mut self, factory: &mut dyn SegmentFactory) {
        let (length_valid, collision_valid) = (self.length_valid, self.collision_valid);
        self.teardown(factory);
        self.endpoints = None;
        self.bridge_visible = false;
        self.state = BuildState::Cancelled;
        log::info!(
            "[Bridge] {:?} build failed (length valid: {}, collision valid: {})",
            self.id,
            length_valid,
            collision_valid
        );
        self.events.push(BridgeEvent::BuildFailed {
            length_valid,
            collision_valid,
        });
    }

    /// Swap per-segment build colliders for the single edit collider.
    fn commit(&mut self) {
        for segment in self.pool.iter_mut() {
            segment.collider_enabled = false;
        }
        if let Some(endpoints) = self.endpoints {
            self.edit_collider.fit_between(
                endpoints.start,
                endpoints.end,
                self.settings.bridge_width,
                self.settings.edit_collider_height,
            );
            self.edit_collider.enabled = true;
        }
    }

    fn return_to_edit_mode(&mut self) {
        self.edit_collider.enabled = false;
        for segment in self.pool.iter_mut() {
            segment.collider_enabled = true;
        }
    }

    fn update_length_validity(&mut self) {
        self.length_valid = self
            .endpoints
            .is_some_and(|endpoints| endpoints.length() >= self.settings.minimum_bridge_length);
    }
}

impl BuildableHandler for BridgeBuildHandler {
    fn on_build_start(&mut self, position: Vec3, ctx: &mut BuildContext<'_>) {
        if self.editing {
            log::warn!("[Bridge] {:?} is being edited, build start ignored", self.id);
            return;
        }

        self.teardown(&mut *ctx.factory);
        self.endpoints = Some(BridgeEndpoints {
            start: position,
            end: position,
        });
        self.length_valid = false;
        self.bridge_visible = false;
        self.state = BuildState::Dragging;
        self.events.push(BridgeEvent::DragStateChanged { visible: false });
        log::info!("[Bridge] {:?} build started at {:?}", self.id, position);
    }

    fn on_build_drag(&mut self, position: Vec3, ctx: &mut BuildContext<'_>) {
        if self.state != BuildState::Dragging {
            return;
        }
        let Some(endpoints) = self.endpoints.as_mut() else {
            return;
        };
        endpoints.end = position;

        let was_valid = self.length_valid;
        self.update_length_validity();
        if !self.length_valid {
            if was_valid {
                self.teardown(&mut *ctx.factory);
                self.bridge_visible = false;
                self.events.push(BridgeEvent::DragStateChanged { visible: false });
            }
            return;
        }

        if !self.bridge_visible {
            self.bridge_visible = true;
            self.events.push(BridgeEvent::DragStateChanged { visible: true });
        }
        self.refresh(ctx);
    }

    fn on_build_end(&mut self, position: Vec3, ctx: &mut BuildContext<'_>) -> bool {
        if self.state != BuildState::Dragging {
            log::warn!("[Bridge] {:?} build end without a build in progress", self.id);
            return false;
        }
        let Some(endpoints) = self.endpoints.as_mut() else {
            return false;
        };
        endpoints.end = position;

        self.update_length_validity();
        if !self.length_valid {
            self.fail_build(&mut *ctx.factory);
            return false;
        }

        self.refresh(ctx);
        if !self.collision_valid {
            self.fail_build(&mut *ctx.factory);
            return false;
        }

        self.commit();
        self.bridge_visible = false;
        self.state = BuildState::Committed;
        self.events.push(BridgeEvent::BuildSucceeded);
        log::info!(
            "[Bridge] {:?} built: {} segment(s), {:?}",
            self.id,
            self.pool.len(),
            self.requirement
        );
        true
    }

    fn on_build_cancel(&mut self, ctx: &mut BuildContext<'_>) {
        // Its handles live in the edit controller until `end_edit`
        if self.editing {
            log::warn!("[Bridge] {:?} is being edited, build cancel ignored", self.id);
            return;
        }

        self.teardown(&mut *ctx.factory);
        self.endpoints = None;
        self.length_valid = false;
        if self.bridge_visible {
            self.bridge_visible = false;
            self.events.push(BridgeEvent::DragStateChanged { visible: false });
        }
        self.state = BuildState::Idle;
        log::info!("[Bridge] {:?} build cancelled", self.id);
    }
}

impl HandleListener for BridgeBuildHandler {
    fn handle_moved(&mut self, endpoint: Endpoint, position: Vec3, ctx: &mut BuildContext<'_>) {
        let Some(endpoints) = self.endpoints.as_mut() else {
            log::warn!("[Bridge] {:?} handle moved without endpoints", self.id);
            return;
        };
        *endpoints.get_mut(endpoint) = flatten_to_ground(position);
        self.update_length_validity();
        self.refresh(ctx);
    }

    fn handle_drag_is_valid(&mut self, ctx: &mut BuildContext<'_>) -> bool {
        self.update_length_validity();
        self.refresh(ctx);
        self.length_valid && self.collision_valid
    }

    fn handle_drag_failed(&mut self) {
        for segment in self.pool.iter_mut() {
            if segment.set_material(MaterialState::Neutral) {
                self.events.push(BridgeEvent::SegmentStateChanged {
                    id: segment.id,
                    state: MaterialState::Neutral,
                });
            }
        }
    }
}

impl Editable for BridgeBuildHandler {
    fn buildable_id(&self) -> BuildableId {
        self.id
    }

    fn start_edit(&mut self, registrar: &mut dyn HandleRegistrar) {
        if self.state != BuildState::Committed {
            log::warn!("[Bridge] {:?} cannot be edited in state {:?}", self.id, self.state);
            return;
        }
        if self.editing {
            return;
        }
        let Some(endpoints) = self.endpoints else {
            return;
        };

        self.editing = true;
        self.return_to_edit_mode();
        for (endpoint, position) in [(Endpoint::Start, endpoints.start), (Endpoint::End, endpoints.end)] {
            if let Err(err) = registrar.register_handle(HandleKey::new(self.id, endpoint), position) {
                log::warn!("[Bridge] {:?} {:?} handle unavailable: {}", self.id, endpoint, err);
            }
        }
        self.events.push(BridgeEvent::EditEntered);
    }

    fn end_edit(&mut self, registrar: &mut dyn HandleRegistrar) {
        if !self.editing {
            return;
        }

        self.editing = false;
        registrar.remove_handle(HandleKey::new(self.id, Endpoint::Start));
        registrar.remove_handle(HandleKey::new(self.id, Endpoint::End));
        self.commit();
        self.events.push(BridgeEvent::EditExited);
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn hover_update(&mut self, time: f32) {
        for (index, segment) in self.pool.iter_mut().enumerate() {
            let wave = (time * HOVER_PULSE_SPEED + index as f32 * HOVER_PULSE_PHASE).sin();
            segment.scale = 1.0 + wave * HOVER_PULSE_AMPLITUDE;
        }
    }

    fn hover_exit(&mut self) {
        for segment in self.pool.iter_mut() {
            segment.scale = 1.0;
        }
    }

    fn edit_collider(&self) -> Option<&EditCollider> {
        Some(&self.edit_collider)
    }
}
