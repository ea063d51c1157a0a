//! Edit capability for committed buildables.

use super::BuildableId;
use super::editable_collider::EditCollider;
use crate::game::edit_mode::{HandleListener, HandleRegistrar};

/// A placed buildable that edit mode can select, hover and reshape.
///
/// Reshaping happens through drag handles the editable registers with the
/// [`HandleRegistrar`] when editing starts; handle drags come back through
/// the [`HandleListener`] supertrait.
pub trait Editable: HandleListener {
    fn buildable_id(&self) -> BuildableId;

    /// Enter edit mode and register drag handles. Calling it again while
    /// already editing does nothing.
    fn start_edit(&mut self, registrar: &mut dyn HandleRegistrar);

    /// Remove the drag handles and return to the committed state.
    fn end_edit(&mut self, registrar: &mut dyn HandleRegistrar);

    fn is_editing(&self) -> bool;

    /// Hover feedback, called every frame the pointer rests on the editable.
    /// `time` is seconds since startup.
    fn hover_update(&mut self, time: f32);

    fn hover_exit(&mut self);

    /// Pickable collider, if the editable currently has one.
    fn edit_collider(&self) -> Option<&EditCollider>;
}
