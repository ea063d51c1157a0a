//! Edit Mode Tests - Selection, Handle Drags, and Revert
//!
//! Builds bridges through the `GameBuildController`, then selects and
//! reshapes them through the `EditModeController` the way a host frame loop
//! would.

use bridge_forge_engine::game::bridge::{
    BridgeEvent, BuildContext, BuildState, Editable, MaterialState, SegmentContainer, SegmentRole,
};
use bridge_forge_engine::game::buildables::{BuildableId, GameBuildController};
use bridge_forge_engine::game::config::{BridgeStyle, BuildablePreset, SegmentTemplate};
use bridge_forge_engine::game::edit_mode::{
    EditModeController, Endpoint, HandleDragResult, HandleError, HandleKey, HandleRegistrar,
};
use bridge_forge_engine::physics::{Obb, Ray, StaticWorld};
use glam::{Quat, Vec3};

fn stone_preset() -> BuildablePreset {
    BuildablePreset {
        name: "Stone bridge".into(),
        style: BridgeStyle::default()
            .with(SegmentRole::Start, SegmentTemplate::new("abutment", 2.0))
            .with(SegmentRole::Middle, SegmentTemplate::new("arch", 4.0))
            .with(SegmentRole::Extension, SegmentTemplate::new("deck", 1.0))
            .with(SegmentRole::End, SegmentTemplate::new("abutment", 2.0)),
        settings: Default::default(),
    }
}

/// Rock well past the end of the first bridge.
fn rocky_world() -> StaticWorld {
    let mut world = StaticWorld::new();
    world.add_box(Obb::new(Vec3::new(30.0, 0.0, 0.0), Vec3::splat(1.0), Quat::IDENTITY));
    world
}

fn ray_down_at(x: f32, z: f32) -> Ray {
    Ray::new(Vec3::new(x, 20.0, z), Vec3::NEG_Y)
}

/// One committed bridge from (0,0,0) to (13,0,0).
fn built_controller(container: &mut SegmentContainer, world: &StaticWorld) -> GameBuildController {
    let mut ctx = BuildContext::new(container, Some(world));
    let mut controller = GameBuildController::new(stone_preset());
    controller.try_enter_build_mode();
    controller.build_input_start(Vec3::ZERO, &mut ctx);
    controller.build_input_drag(Vec3::new(6.0, 0.0, 0.0), &mut ctx);
    assert!(controller.build_input_end(Vec3::new(13.0, 0.0, 0.0), &mut ctx));
    controller.drain_events();
    controller
}

// ============================================================================
// Selection and Hover
// ============================================================================

#[test]
fn test_click_on_bridge_starts_edit() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();

    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());

    assert_eq!(edit.current_editing(), Some(BuildableId(1)));
    assert_eq!(edit.handle_count(), 2);
    let end = edit
        .handle(HandleKey::new(BuildableId(1), Endpoint::End))
        .expect("end handle registered");
    assert_eq!(end.position, Vec3::new(13.0, 0.0, 0.0));

    let bridge = &controller.built()[0];
    assert!(bridge.is_editing());
    assert!(bridge.pool().iter().all(|s| s.collider_enabled));
    assert!(!bridge.edit_collider().is_some_and(|c| c.enabled));
    assert!(controller.drain_events().contains(&(BuildableId(1), BridgeEvent::EditEntered)));
}

#[test]
fn test_hover_pulses_until_pointer_leaves() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();

    edit.update_pointer(&ray_down_at(6.5, 0.0), false, 0.25, controller.built_mut());
    assert_eq!(edit.hovering(), Some(BuildableId(1)));
    assert!(controller.built()[0].pool().iter().any(|s| s.scale != 1.0));

    edit.update_pointer(&ray_down_at(6.5, 40.0), false, 0.5, controller.built_mut());
    assert_eq!(edit.hovering(), None);
    assert!(controller.built()[0].pool().iter().all(|s| s.scale == 1.0));
}

#[test]
fn test_clear_edit_recommits() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();

    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());
    edit.clear_edit(controller.built_mut());

    assert_eq!(edit.current_editing(), None);
    assert_eq!(edit.handle_count(), 0);
    let bridge = &controller.built()[0];
    assert!(!bridge.is_editing());
    assert_eq!(bridge.state(), BuildState::Committed);
    assert!(bridge.edit_collider().is_some_and(|c| c.enabled));
    assert!(bridge.pool().iter().all(|s| !s.collider_enabled));
}

// ============================================================================
// Handle Drags
// ============================================================================

#[test]
fn test_valid_handle_drag_is_accepted() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();
    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());

    let key = HandleKey::new(BuildableId(1), Endpoint::End);
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    assert!(edit.begin_handle_drag(key));
    // Dragged positions are pinned to the ground plane
    assert!(edit.drag_handle(key, Vec3::new(17.0, 3.0, 0.0), controller.built_mut(), &mut ctx));
    let result = edit.end_handle_drag(key, controller.built_mut(), &mut ctx);

    assert_eq!(result, HandleDragResult::Accepted);
    let bridge = &controller.built()[0];
    let endpoints = bridge.endpoints().expect("bridge has endpoints");
    assert_eq!(endpoints.end, Vec3::new(17.0, 0.0, 0.0));
    // 17 = 2 + 2 + 3 * 4 + 1, odd extension dropped
    assert_eq!(bridge.pool().middles.len(), 3);
    assert!(bridge.collision_valid());
}

#[test]
fn test_handle_dragged_into_rock_reverts() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();
    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());
    controller.drain_events();

    let key = HandleKey::new(BuildableId(1), Endpoint::End);
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    edit.begin_handle_drag(key);
    edit.drag_handle(key, Vec3::new(33.0, 0.0, 0.0), controller.built_mut(), &mut ctx);
    assert!(!controller.built()[0].collision_valid());

    let result = edit.end_handle_drag(key, controller.built_mut(), &mut ctx);

    assert_eq!(result, HandleDragResult::Reverted);
    assert_eq!(edit.handle(key).map(|h| h.position), Some(Vec3::new(13.0, 0.0, 0.0)));
    let bridge = &controller.built()[0];
    assert_eq!(bridge.endpoints().map(|e| e.end), Some(Vec3::new(13.0, 0.0, 0.0)));
    assert!(bridge.pool().iter().all(|s| s.material == MaterialState::Neutral));
    assert_eq!(bridge.pool().middles.len(), 2);
}

#[test]
fn test_handle_dragged_across_other_bridge_reverts() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    controller.build_input_start(Vec3::new(20.0, 0.0, -6.5), &mut ctx);
    assert!(controller.build_input_end(Vec3::new(20.0, 0.0, 6.5), &mut ctx));

    let mut edit = EditModeController::new();
    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());
    assert_eq!(edit.current_editing(), Some(BuildableId(1)));
    // The bridge being edited does not block itself
    let placed = controller.built_colliders();
    assert_eq!(placed.len(), 1);

    let key = HandleKey::new(BuildableId(1), Endpoint::End);
    edit.begin_handle_drag(key);
    let result = ctx.with_extra_colliders(&placed, |ctx| {
        edit.drag_handle(key, Vec3::new(25.0, 0.0, 0.0), controller.built_mut(), ctx);
        assert!(!controller.built()[0].collision_valid());
        edit.end_handle_drag(key, controller.built_mut(), ctx)
    });

    assert_eq!(result, HandleDragResult::Reverted);
    assert_eq!(controller.built()[0].endpoints().map(|e| e.end), Some(Vec3::new(13.0, 0.0, 0.0)));
}

#[test]
fn test_handle_drag_too_short_reverts() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();
    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());

    let key = HandleKey::new(BuildableId(1), Endpoint::Start);
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    edit.begin_handle_drag(key);
    edit.drag_handle(key, Vec3::new(12.5, 0.0, 0.0), controller.built_mut(), &mut ctx);

    assert_eq!(
        edit.end_handle_drag(key, controller.built_mut(), &mut ctx),
        HandleDragResult::Reverted
    );
    assert_eq!(controller.built()[0].endpoints().map(|e| e.start), Some(Vec3::ZERO));
    assert!(controller.built()[0].length_valid());
}

#[test]
fn test_drag_without_begin_is_ignored() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();
    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());

    let key = HandleKey::new(BuildableId(1), Endpoint::End);
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    assert!(!edit.drag_handle(key, Vec3::new(20.0, 0.0, 0.0), controller.built_mut(), &mut ctx));
    assert_eq!(
        edit.end_handle_drag(key, controller.built_mut(), &mut ctx),
        HandleDragResult::Ignored
    );
}

#[test]
fn test_handle_without_owner_is_inert() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();
    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());

    let key = HandleKey::new(BuildableId(1), Endpoint::End);
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    edit.begin_handle_drag(key);
    let others = &mut controller.built_mut()[..0];
    assert!(!edit.drag_handle(key, Vec3::new(20.0, 0.0, 0.0), others, &mut ctx));
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_duplicate_registration_is_rejected() {
    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = built_controller(&mut container, &world);
    let mut edit = EditModeController::new();
    edit.update_pointer(&ray_down_at(6.5, 0.0), true, 0.0, controller.built_mut());

    let key = HandleKey::new(BuildableId(1), Endpoint::Start);
    assert_eq!(
        edit.register_handle(key, Vec3::new(99.0, 0.0, 0.0)),
        Err(HandleError::AlreadyRegistered(key))
    );
    assert_eq!(edit.handle(key).map(|h| h.position), Some(Vec3::ZERO));

    // Starting the same edit again registers nothing new
    controller.built_mut()[0].start_edit(&mut edit);
    assert_eq!(edit.handle_count(), 2);
}
