//! Bridge Tests - Build Gesture, Validation Gating, and Pool Lifetime
//!
//! Drives a `BridgeBuildHandler` through whole build gestures against the
//! headless `SegmentContainer` and a `StaticWorld`, checking what the host
//! would observe: live instances, events, and validity flags.

use bridge_forge_engine::game::bridge::{
    BridgeBuildHandler, BridgeEvent, BuildContext, BuildState, BuildableHandler, MaterialState,
    SegmentContainer, SegmentRole,
};
use bridge_forge_engine::game::buildables::{BuildableId, GameBuildController};
use bridge_forge_engine::game::config::{
    BridgeBuildSettings, BridgeStyle, BuildablePreset, SegmentTemplate,
};
use bridge_forge_engine::physics::{LayerMask, Obb, OverlapQuery, StaticWorld};
use glam::{Quat, Vec3};

fn stone_style() -> BridgeStyle {
    BridgeStyle::default()
        .with(SegmentRole::Start, SegmentTemplate::new("abutment", 2.0))
        .with(SegmentRole::Middle, SegmentTemplate::new("arch", 4.0))
        .with(SegmentRole::Extension, SegmentTemplate::new("deck", 1.0))
        .with(SegmentRole::End, SegmentTemplate::new("abutment", 2.0))
}

fn stone_bridge() -> BridgeBuildHandler {
    BridgeBuildHandler::new(BuildableId(1), stone_style(), BridgeBuildSettings::default())
}

fn world_with_rock_at(x: f32) -> StaticWorld {
    let mut world = StaticWorld::new();
    world.add_box(Obb::new(Vec3::new(x, 0.0, 0.0), Vec3::splat(1.0), Quat::IDENTITY));
    world
}

// ============================================================================
// Minimum Length
// ============================================================================

#[test]
fn test_end_just_below_minimum_fails() {
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);
    let mut bridge = stone_bridge();

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    assert!(!bridge.on_build_end(Vec3::new(0.99, 0.0, 0.0), &mut ctx));

    assert_eq!(bridge.state(), BuildState::Cancelled);
    assert!(bridge.pool().is_empty());
    let events = bridge.drain_events();
    assert_eq!(
        events.last(),
        Some(&BridgeEvent::BuildFailed {
            length_valid: false,
            collision_valid: false,
        })
    );
}

#[test]
fn test_end_at_minimum_succeeds() {
    let style = BridgeStyle::default().with(SegmentRole::Extension, SegmentTemplate::new("plank", 0.25));
    let mut bridge = BridgeBuildHandler::new(BuildableId(1), style, BridgeBuildSettings::default());
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    assert!(bridge.on_build_end(Vec3::new(1.0, 0.0, 0.0), &mut ctx));

    assert_eq!(bridge.state(), BuildState::Committed);
    assert_eq!(bridge.pool().extensions.len(), 4);
    assert_eq!(container.live_count(), 4);
}

#[test]
fn test_drag_just_below_minimum_shows_nothing() {
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);
    let mut bridge = BridgeBuildHandler::new(
        BuildableId(1),
        BridgeStyle::default().with(SegmentRole::Extension, SegmentTemplate::new("plank", 0.25)),
        BridgeBuildSettings::default(),
    );

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    bridge.drain_events();
    bridge.on_build_drag(Vec3::new(0.99, 0.0, 0.0), &mut ctx);

    assert!(!bridge.length_valid());
    assert!(!bridge.is_bridge_visible());
    assert!(bridge.pool().is_empty());
    assert!(bridge.drain_events().is_empty());

    bridge.on_build_drag(Vec3::new(1.0, 0.0, 0.0), &mut ctx);

    assert!(bridge.length_valid());
    assert!(bridge.is_bridge_visible());
    assert_eq!(bridge.pool().extensions.len(), 4);
    assert_eq!(
        bridge.drain_events(),
        vec![BridgeEvent::DragStateChanged { visible: true }]
    );
}

#[test]
fn test_drag_back_below_minimum_hides_bridge() {
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);
    let mut bridge = stone_bridge();

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    bridge.on_build_drag(Vec3::new(13.0, 0.0, 0.0), &mut ctx);
    assert!(bridge.is_bridge_visible());
    bridge.on_build_drag(Vec3::new(0.5, 0.0, 0.0), &mut ctx);

    assert!(!bridge.is_bridge_visible());
    assert!(bridge.pool().is_empty());
    assert_eq!(container.live_count(), 0);
    assert_eq!(
        bridge.drain_events()
            .into_iter()
            .filter(|e| matches!(e, BridgeEvent::DragStateChanged { .. }))
            .collect::<Vec<_>>(),
        vec![
            BridgeEvent::DragStateChanged { visible: false },
            BridgeEvent::DragStateChanged { visible: true },
            BridgeEvent::DragStateChanged { visible: false },
        ]
    );
}

// ============================================================================
// Collision Gating
// ============================================================================

#[test]
fn test_rock_under_span_rejects_build() {
    let world = world_with_rock_at(6.5);
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    let mut bridge = stone_bridge();

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    bridge.on_build_drag(Vec3::new(13.0, 0.0, 0.0), &mut ctx);
    assert!(!bridge.collision_valid());

    let invalid: Vec<_> = bridge
        .drain_events()
        .into_iter()
        .filter(|e| {
            matches!(
                e,
                BridgeEvent::SegmentStateChanged {
                    state: MaterialState::Invalid,
                    ..
                }
            )
        })
        .collect();
    assert!(!invalid.is_empty());

    assert!(!bridge.on_build_end(Vec3::new(13.0, 0.0, 0.0), &mut ctx));
    assert_eq!(
        bridge.drain_events().last(),
        Some(&BridgeEvent::BuildFailed {
            length_valid: true,
            collision_valid: false,
        })
    );
    assert_eq!(container.live_count(), 0);
}

#[test]
fn test_rock_beside_span_allows_build() {
    let world = world_with_rock_at(30.0);
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    let mut bridge = stone_bridge();

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    assert!(bridge.on_build_end(Vec3::new(13.0, 0.0, 0.0), &mut ctx));
    assert!(bridge.pool().iter().all(|s| s.material == MaterialState::Valid));
    assert!(bridge.drain_events().contains(&BridgeEvent::BuildSucceeded));
}

#[test]
fn test_new_bridge_cannot_cross_placed_one() {
    let world = StaticWorld::new();
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::new(&mut container, Some(&world));
    let mut controller = GameBuildController::new(BuildablePreset {
        name: "Stone bridge".into(),
        style: stone_style(),
        settings: BridgeBuildSettings::default(),
    });

    controller.build_input_start(Vec3::ZERO, &mut ctx);
    assert!(controller.build_input_end(Vec3::new(13.0, 0.0, 0.0), &mut ctx));

    controller.build_input_start(Vec3::new(6.5, 0.0, -6.5), &mut ctx);
    controller.build_input_drag(Vec3::new(6.5, 0.0, 6.5), &mut ctx);
    assert_eq!(controller.active().map(|b| b.collision_valid()), Some(false));
    assert!(!controller.build_input_end(Vec3::new(6.5, 0.0, 6.5), &mut ctx));
    assert_eq!(controller.built().len(), 1);

    // Parallel and clear of the first one
    controller.build_input_start(Vec3::new(0.0, 0.0, 10.0), &mut ctx);
    assert!(controller.build_input_end(Vec3::new(13.0, 0.0, 10.0), &mut ctx));
    assert_eq!(controller.built().len(), 2);
    assert_eq!(controller.built_colliders().len(), 2);
}

#[test]
fn test_authoring_context_never_blocks() {
    let world = world_with_rock_at(6.5);
    assert_eq!(
        world.overlap_box(Vec3::new(6.5, 0.0, 0.0), Vec3::splat(0.5), Quat::IDENTITY, LayerMask::NONE),
        0,
        "empty layer mask matches nothing"
    );

    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);
    let mut bridge = stone_bridge();
    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    assert!(bridge.on_build_end(Vec3::new(13.0, 0.0, 0.0), &mut ctx));
    assert!(bridge.pool().iter().all(|s| s.material == MaterialState::Neutral));
}

// ============================================================================
// Refresh and Pool Lifetime
// ============================================================================

#[test]
fn test_refresh_is_idempotent() {
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);
    let mut bridge = stone_bridge();

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    bridge.on_build_drag(Vec3::new(21.0, 0.0, 0.0), &mut ctx);
    let positions: Vec<Vec3> = bridge.pool().iter().map(|s| s.position).collect();

    let again = bridge.refresh(&mut ctx).expect("endpoints are set");
    assert_eq!(again.created, 0);
    assert_eq!(again.removed, 0);
    let after: Vec<Vec3> = bridge.pool().iter().map(|s| s.position).collect();
    assert_eq!(positions, after);
}

#[test]
fn test_live_instances_track_requirement() {
    let mut container = SegmentContainer::new();
    let mut bridge = stone_bridge();

    for x in [3.0, 9.0, 25.0, 14.0, 4.5, 30.0, 2.0] {
        let mut ctx = BuildContext::authoring(&mut container);
        if bridge.state() != BuildState::Dragging {
            bridge.on_build_start(Vec3::ZERO, &mut ctx);
        }
        bridge.on_build_drag(Vec3::new(x, 0.0, 0.0), &mut ctx);
        bridge.flush_animations(&mut container);

        assert_eq!(container.live_count(), bridge.requirement().total(), "after drag to {x}");
        assert_eq!(bridge.pool().len(), bridge.requirement().total());
    }
}

#[test]
fn test_cancel_disposes_every_instance() {
    let mut container = SegmentContainer::new();
    let mut bridge = stone_bridge();
    {
        let mut ctx = BuildContext::authoring(&mut container);
        bridge.on_build_start(Vec3::ZERO, &mut ctx);
        bridge.on_build_drag(Vec3::new(25.0, 0.0, 0.0), &mut ctx);
        // Shrink so some instances are mid-removal when the cancel lands
        bridge.on_build_drag(Vec3::new(9.0, 0.0, 0.0), &mut ctx);
        assert!(!bridge.retiring().is_empty());
        bridge.on_build_cancel(&mut ctx);
    }

    assert_eq!(bridge.state(), BuildState::Idle);
    assert!(bridge.endpoints().is_none());
    assert!(bridge.pool().is_empty());
    assert!(bridge.retiring().is_empty());
    assert_eq!(container.live_count(), 0);
    assert_eq!(container.created_total, container.disposed_total);

    // Late ticks must not dispose anything twice
    bridge.tick(1.0, &mut container);
    assert_eq!(container.created_total, container.disposed_total);
}

#[test]
fn test_drag_ignored_outside_gesture() {
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);
    let mut bridge = stone_bridge();

    bridge.on_build_drag(Vec3::new(13.0, 0.0, 0.0), &mut ctx);
    assert_eq!(bridge.state(), BuildState::Idle);
    assert!(bridge.pool().is_empty());
    assert!(!bridge.on_build_end(Vec3::new(13.0, 0.0, 0.0), &mut ctx));
}

#[test]
fn test_style_without_segments_never_builds() {
    let mut bridge = BridgeBuildHandler::new(BuildableId(1), BridgeStyle::default(), BridgeBuildSettings::default());
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    bridge.on_build_drag(Vec3::new(10.0, 0.0, 0.0), &mut ctx);
    assert!(bridge.refresh(&mut ctx).is_none());
    assert!(!bridge.on_build_end(Vec3::new(10.0, 0.0, 0.0), &mut ctx));
    assert_eq!(container.created_total, 0);
}

// ============================================================================
// Presets
// ============================================================================

#[test]
fn test_preset_drives_handler() {
    let preset = BuildablePreset::from_json_str(
        r#"{
            "name": "Rope bridge",
            "style": { "extension": { "name": "plank", "length": 0.5 } },
            "settings": { "allow_odd_extension_counts": true, "minimum_bridge_length": 2.0 }
        }"#,
    )
    .expect("preset should parse");

    let mut bridge = BridgeBuildHandler::from_preset(BuildableId(3), &preset);
    let mut container = SegmentContainer::new();
    let mut ctx = BuildContext::authoring(&mut container);

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    assert!(!bridge.on_build_end(Vec3::new(1.5, 0.0, 0.0), &mut ctx));

    bridge.on_build_start(Vec3::ZERO, &mut ctx);
    assert!(bridge.on_build_end(Vec3::new(2.5, 0.0, 0.0), &mut ctx));
    assert_eq!(bridge.pool().extensions.len(), 5);
}
