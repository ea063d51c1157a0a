//! Edit Mode Controller
//!
//! Owns the drag handles of the editable being edited, picks editables
//! under the pointer for hover feedback and selection, and dispatches handle
//! drags back to the editable that registered them.

use std::collections::HashMap;

use glam::Vec3;

use super::handle::{HandleError, HandleKey, HandleRegistrar, PositionHandle};
use crate::game::buildables::{BuildContext, BuildableId, Editable};
use crate::physics::Ray;
use crate::world::flatten_to_ground;

/// How a finished handle drag was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleDragResult {
    /// The owner accepted the new position
    Accepted,
    /// The owner rejected it; the handle snapped back to its drag start
    Reverted,
    /// No drag in progress, unknown handle, or owner not found
    Ignored,
}

#[derive(Debug, Default)]
pub struct EditModeController {
    handles: HashMap<HandleKey, PositionHandle>,
    current_editing: Option<BuildableId>,
    hovering: Option<BuildableId>,
}

impl EditModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_editing(&self) -> Option<BuildableId> {
        self.current_editing
    }

    pub fn hovering(&self) -> Option<BuildableId> {
        self.hovering
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn handle(&self, key: HandleKey) -> Option<&PositionHandle> {
        self.handles.get(&key)
    }

    /// Per-frame pointer update.
    ///
    /// Pressing on an editable other than the one being edited ends the
    /// current edit and starts editing the new one. Resting on it gives hover
    /// feedback. Anything else clears the hover.
    pub fn update_pointer<E: Editable>(&mut self, ray: &Ray, primary_pressed: bool, time: f32, editables: &mut [E]) {
        let hit = pick(ray, editables);

        if let Some(index) = hit {
            let id = editables[index].buildable_id();
            if Some(id) != self.current_editing {
                if primary_pressed {
                    self.clear_edit(editables);
                    self.clear_hover(editables);
                    log::info!("[EditMode] Editing {:?}", id);
                    editables[index].start_edit(self);
                    self.current_editing = Some(id);
                    return;
                }

                if self.hovering.is_some_and(|hovered| hovered != id) {
                    self.clear_hover(editables);
                }
                self.hovering = Some(id);
                editables[index].hover_update(time);
                return;
            }
        }

        self.clear_hover(editables);
    }

    /// End the current edit, if any.
    pub fn clear_edit<E: Editable>(&mut self, editables: &mut [E]) {
        let Some(id) = self.current_editing.take() else {
            return;
        };
        match editables.iter_mut().find(|e| e.buildable_id() == id) {
            Some(editable) => {
                editable.end_edit(self);
                log::info!("[EditMode] Finished editing {:?}", id);
            }
            None => {
                log::warn!("[EditMode] Editable {:?} vanished while being edited", id);
                self.handles.retain(|key, _| key.owner != id);
            }
        }
    }

    fn clear_hover<E: Editable>(&mut self, editables: &mut [E]) {
        let Some(id) = self.hovering.take() else {
            return;
        };
        if let Some(editable) = editables.iter_mut().find(|e| e.buildable_id() == id) {
            editable.hover_exit();
        }
    }

    /// Pointer pressed on a handle.
    pub fn begin_handle_drag(&mut self, key: HandleKey) -> bool {
        match self.handles.get_mut(&key) {
            Some(handle) => {
                handle.begin_drag();
                true
            }
            None => false,
        }
    }

    /// Pointer moved while dragging a handle; `position` is on the ground
    /// plane.
    pub fn drag_handle<E: Editable>(
        &mut self,
        key: HandleKey,
        position: Vec3,
        editables: &mut [E],
        ctx: &mut BuildContext<'_>,
    ) -> bool {
        let Some(handle) = self.handles.get_mut(&key) else {
            return false;
        };
        if !handle.is_dragging() {
            return false;
        }
        let Some(owner) = editables.iter_mut().find(|e| e.buildable_id() == key.owner) else {
            log::warn!("[EditMode] Handle {:?} has no owner, drag ignored", key);
            return false;
        };

        handle.position = flatten_to_ground(position);
        owner.handle_moved(key.endpoint, handle.position, ctx);
        true
    }

    /// Pointer released after dragging a handle. Asks the owner whether the
    /// new position is acceptable and reverts the handle if not.
    pub fn end_handle_drag<E: Editable>(
        &mut self,
        key: HandleKey,
        editables: &mut [E],
        ctx: &mut BuildContext<'_>,
    ) -> HandleDragResult {
        let Some(handle) = self.handles.get_mut(&key) else {
            return HandleDragResult::Ignored;
        };
        let Some(drag_start) = handle.end_drag() else {
            return HandleDragResult::Ignored;
        };
        let Some(owner) = editables.iter_mut().find(|e| e.buildable_id() == key.owner) else {
            log::warn!("[EditMode] Handle {:?} has no owner, drag ignored", key);
            return HandleDragResult::Ignored;
        };

        if owner.handle_drag_is_valid(ctx) {
            return HandleDragResult::Accepted;
        }

        log::debug!("[EditMode] Handle {:?} rejected, reverting to {:?}", key, drag_start);
        handle.position = drag_start;
        owner.handle_moved(key.endpoint, drag_start, ctx);
        owner.handle_drag_failed();
        HandleDragResult::Reverted
    }
}

impl HandleRegistrar for EditModeController {
    fn register_handle(&mut self, key: HandleKey, position: Vec3) -> Result<(), HandleError> {
        if !position.is_finite() {
            let err = HandleError::InvalidPosition { key, position };
            log::error!("[EditMode] {}", err);
            return Err(err);
        }
        if self.handles.contains_key(&key) {
            let err = HandleError::AlreadyRegistered(key);
            log::error!("[EditMode] {}", err);
            return Err(err);
        }
        self.handles.insert(key, PositionHandle::new(position));
        Ok(())
    }

    fn remove_handle(&mut self, key: HandleKey) -> bool {
        self.handles.remove(&key).is_some()
    }
}

/// Index of the nearest editable whose collider the ray hits.
fn pick<E: Editable>(ray: &Ray, editables: &[E]) -> Option<usize> {
    editables
        .iter()
        .enumerate()
        .filter_map(|(index, editable)| {
            let t = editable.edit_collider()?.ray_hit(ray)?;
            Some((index, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
