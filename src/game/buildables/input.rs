//! Build Input
//!
//! Turns per-frame pointer samples into build gestures on the
//! [`GameBuildController`]. The pointer ray is intersected with the ground
//! plane; nothing happens while build mode is off or the ray misses it.

use glam::Vec3;

use super::buildable::BuildContext;
use super::controller::GameBuildController;
use crate::physics::Ray;
use crate::world::{GROUND_HEIGHT, ray_ground_intersection};

/// Pointer state for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Camera ray through the cursor
    pub ray: Ray,
    /// Primary button went down this frame
    pub primary_pressed: bool,
    /// Primary button is currently down
    pub primary_held: bool,
    /// Cursor is over UI and should not start builds
    pub over_ui: bool,
}

/// What a sample did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildGesture {
    Started,
    Dragged,
    Ended { placed: bool },
}

#[derive(Debug, Default)]
pub struct BuildInput {
    input_down: bool,
    last_drag_position: Vec3,
}

impl BuildInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.input_down
    }

    pub fn update(
        &mut self,
        sample: &PointerSample,
        controller: &mut GameBuildController,
        ctx: &mut BuildContext<'_>,
    ) -> Option<BuildGesture> {
        if !controller.build_mode_enabled() {
            return None;
        }
        let position = ray_ground_intersection(sample.ray.origin, sample.ray.direction, GROUND_HEIGHT)?;

        if sample.primary_pressed && !sample.over_ui {
            self.input_down = true;
            self.last_drag_position = position;
            controller.build_input_start(position, ctx);
            return Some(BuildGesture::Started);
        }

        if self.input_down && !sample.primary_held {
            self.input_down = false;
            controller.build_input_drag(position, ctx);
            let placed = controller.build_input_end(position, ctx);
            return Some(BuildGesture::Ended { placed });
        }

        if self.input_down && self.last_drag_position != position {
            self.last_drag_position = position;
            controller.build_input_drag(position, ctx);
            return Some(BuildGesture::Dragged);
        }

        None
    }
}
