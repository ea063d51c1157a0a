//! Game Build Controller
//!
//! Build mode on/off, and the lifetime of the buildable currently being
//! placed. A new handler is created from the selected preset on every build
//! start; placed ones are kept for edit mode, failed ones are dropped.
//!
//! Placed buildables block new ones: their edit colliders are added to the
//! host world on [`LayerMask::BUILDABLE`] for every build query.

use glam::Vec3;

use super::BuildableId;
use super::buildable::{BuildContext, BuildableHandler};
use super::editable::Editable;
use crate::game::bridge::{BridgeBuildHandler, BridgeEvent, SegmentFactory};
use crate::game::config::BuildablePreset;
use crate::physics::{LayerMask, StaticWorld};

pub struct GameBuildController {
    preset: BuildablePreset,
    build_mode: bool,
    active: Option<BridgeBuildHandler>,
    built: Vec<BridgeBuildHandler>,
    next_id: u32,
    /// Events of handlers that were dropped before they were drained
    orphaned_events: Vec<(BuildableId, BridgeEvent)>,
}

impl GameBuildController {
    pub fn new(preset: BuildablePreset) -> Self {
        Self {
            preset,
            build_mode: false,
            active: None,
            built: Vec::new(),
            next_id: 0,
            orphaned_events: Vec::new(),
        }
    }

    pub fn build_mode_enabled(&self) -> bool {
        self.build_mode
    }

    pub fn is_building(&self) -> bool {
        self.active.is_some()
    }

    pub fn preset(&self) -> &BuildablePreset {
        &self.preset
    }

    /// Handler of the build in progress.
    pub fn active(&self) -> Option<&BridgeBuildHandler> {
        self.active.as_ref()
    }

    /// Placed buildables.
    pub fn built(&self) -> &[BridgeBuildHandler] {
        &self.built
    }

    pub fn built_mut(&mut self) -> &mut [BridgeBuildHandler] {
        &mut self.built
    }

    /// Returns false if build mode was already on.
    pub fn try_enter_build_mode(&mut self) -> bool {
        if self.build_mode {
            return false;
        }
        self.build_mode = true;
        log::info!("[Build] Build mode ENABLED ({:?})", self.preset.name);
        true
    }

    /// Returns false if build mode was already off. Cancels a build in
    /// progress.
    pub fn try_exit_build_mode(&mut self, ctx: &mut BuildContext<'_>) -> bool {
        if !self.build_mode {
            return false;
        }
        self.build_mode = false;
        self.cancel_build(ctx);
        log::info!("[Build] Build mode DISABLED");
        true
    }

    /// Select what the next build places. Cancels a build in progress.
    pub fn set_preset(&mut self, preset: BuildablePreset, ctx: &mut BuildContext<'_>) {
        self.cancel_build(ctx);
        log::info!("[Build] Selected preset {:?}", preset.name);
        self.preset = preset;
    }

    pub fn build_input_start(&mut self, position: Vec3, ctx: &mut BuildContext<'_>) {
        self.cancel_build(ctx);

        self.next_id += 1;
        let mut handler = BridgeBuildHandler::from_preset(BuildableId(self.next_id), &self.preset);
        handler.on_build_start(position, ctx);
        self.active = Some(handler);
    }

    pub fn build_input_drag(&mut self, position: Vec3, ctx: &mut BuildContext<'_>) {
        let placed = self.built_colliders();
        if let Some(handler) = self.active.as_mut() {
            ctx.with_extra_colliders(&placed, |ctx| handler.on_build_drag(position, ctx));
        }
    }

    /// Finish the build in progress. Returns whether something was placed.
    pub fn build_input_end(&mut self, position: Vec3, ctx: &mut BuildContext<'_>) -> bool {
        let Some(mut handler) = self.active.take() else {
            return false;
        };

        let placed = self.built_colliders();
        if ctx.with_extra_colliders(&placed, |ctx| handler.on_build_end(position, ctx)) {
            log::info!("[Build] Placed {:?}", handler.id());
            self.built.push(handler);
            true
        } else {
            handler.on_build_cancel(ctx);
            self.drop_handler(handler);
            false
        }
    }

    /// Enabled edit colliders of placed buildables, on [`LayerMask::BUILDABLE`].
    ///
    /// A buildable in edit mode has its edit collider switched off, so a
    /// handle drag never collides with the bridge being reshaped.
    pub fn built_colliders(&self) -> StaticWorld {
        let mut colliders = StaticWorld::new();
        for collider in self.built.iter().filter_map(|handler| handler.edit_collider()) {
            if collider.enabled {
                colliders.add_on_layer(collider.obb(), LayerMask::BUILDABLE);
            }
        }
        colliders
    }

    /// Abandon the build in progress, if any.
    pub fn cancel_build(&mut self, ctx: &mut BuildContext<'_>) {
        if let Some(mut handler) = self.active.take() {
            handler.on_build_cancel(ctx);
            self.drop_handler(handler);
        }
    }

    fn drop_handler(&mut self, mut handler: BridgeBuildHandler) {
        let id = handler.id();
        self.orphaned_events
            .extend(handler.drain_events().into_iter().map(|event| (id, event)));
    }

    /// Advance segment animations of every handler.
    pub fn tick(&mut self, dt: f32, factory: &mut dyn SegmentFactory) {
        for handler in self.active.iter_mut().chain(self.built.iter_mut()) {
            handler.tick(dt, factory);
        }
    }

    /// Take all queued events, tagged with the buildable that raised them.
    pub fn drain_events(&mut self) -> Vec<(BuildableId, BridgeEvent)> {
        let mut events = std::mem::take(&mut self.orphaned_events);
        for handler in self.built.iter_mut().chain(self.active.iter_mut()) {
            let id = handler.id();
            events.extend(handler.drain_events().into_iter().map(|event| (id, event)));
        }
        events
    }
}
