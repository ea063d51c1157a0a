//! Bridge Sandbox - Headless Build Session
//!
//! Scripted session that exercises the bridge builder without a renderer:
//! enters build mode, drags a bridge across a small rocky world, fails one
//! build on a rock, then edits the placed bridge by dragging its end handle.
//! Every step is logged.
//!
//! Run with: `cargo run --bin bridge_sandbox [presets/stone_bridge.json]`
//! Set `RUST_LOG=debug` to see per-refresh detail.

use anyhow::Context;
use glam::{Quat, Vec3};

use bridge_forge_engine::game::bridge::{BridgeEvent, SegmentContainer, SegmentRole};
use bridge_forge_engine::game::buildables::{
    BuildContext, BuildInput, GameBuildController, PointerSample,
};
use bridge_forge_engine::game::config::{BridgeStyle, BuildablePreset, SegmentTemplate};
use bridge_forge_engine::game::edit_mode::{EditModeController, Endpoint, HandleKey};
use bridge_forge_engine::physics::{Obb, Ray, StaticWorld};

/// Simulated frame time (seconds)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Height of the overhead camera the pointer rays start from
const CAMERA_HEIGHT: f32 = 30.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Bridge Sandbox v{} starting...", env!("CARGO_PKG_VERSION"));

    let preset = match std::env::args().nth(1) {
        Some(path) => BuildablePreset::load(&path).with_context(|| format!("loading preset {path}"))?,
        None => {
            let preset = default_preset();
            preset.validate().context("built-in preset is invalid")?;
            preset
        }
    };

    let world = rocky_world();
    let mut container = SegmentContainer::new();
    let mut controller = GameBuildController::new(preset);
    let mut input = BuildInput::new();
    let mut time = 0.0f32;

    controller.try_enter_build_mode();

    // A drag straight through the rock at x = 20 is rejected
    drag_gesture(&mut input, &mut controller, &mut container, &world, Vec3::new(12.0, 0.0, 0.0), Vec3::new(28.0, 0.0, 0.0));
    report(&mut controller);

    // One clear of it is placed
    drag_gesture(&mut input, &mut controller, &mut container, &world, Vec3::new(0.0, 0.0, 6.0), Vec3::new(15.0, 0.0, 6.0));
    report(&mut controller);

    for _ in 0..30 {
        controller.tick(FRAME_DT, &mut container);
        time += FRAME_DT;
    }

    let mut ctx = BuildContext::new(&mut container, Some(&world));
    controller.try_exit_build_mode(&mut ctx);

    // Edit mode: hover, select, then reshape the bridge
    let Some(bridge_id) = controller.built().first().map(|bridge| bridge.id()) else {
        log::warn!("No bridge was placed, nothing to edit");
        return Ok(());
    };
    let mut edit = EditModeController::new();
    let over_bridge = overhead_ray(Vec3::new(7.5, 0.0, 6.0));
    edit.update_pointer(&over_bridge, false, time, controller.built_mut());
    edit.update_pointer(&over_bridge, true, time, controller.built_mut());
    report(&mut controller);

    let end_handle = HandleKey::new(bridge_id, Endpoint::End);
    let placed = controller.built_colliders();
    for target in [Vec3::new(19.0, 0.0, 6.0), Vec3::new(19.0, 0.0, 0.0)] {
        edit.begin_handle_drag(end_handle);
        let result = ctx.with_extra_colliders(&placed, |ctx| {
            edit.drag_handle(end_handle, target, controller.built_mut(), ctx);
            edit.end_handle_drag(end_handle, controller.built_mut(), ctx)
        });
        log::info!("Dragged end handle to {:?}: {:?}", target, result);
        report(&mut controller);
    }

    edit.clear_edit(controller.built_mut());
    report(&mut controller);

    for bridge in controller.built_mut() {
        bridge.flush_animations(&mut *ctx.factory);
    }
    drop(ctx);

    for bridge in controller.built() {
        log::info!(
            "{:?}: {:?}, {} segment(s) {:?}, endpoints {:?}, {} still animating",
            bridge.id(),
            bridge.state(),
            bridge.pool().len(),
            bridge.requirement(),
            bridge.endpoints(),
            bridge.animating_count()
        );
    }
    for role in SegmentRole::ALL {
        log::info!("{:?} segments alive: {}", role, container.live_of_role(role));
    }
    log::info!(
        "Segments alive: {} (created {}, disposed {})",
        container.live_count(),
        container.created_total,
        container.disposed_total
    );

    Ok(())
}

fn default_preset() -> BuildablePreset {
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

fn rocky_world() -> StaticWorld {
    let mut world = StaticWorld::new();
    world.add_box(Obb::new(Vec3::new(20.0, 0.5, 0.0), Vec3::new(1.5, 1.0, 1.5), Quat::IDENTITY));
    world.add_box(Obb::new(
        Vec3::new(-6.0, 0.5, 10.0),
        Vec3::new(2.0, 1.0, 1.0),
        Quat::from_rotation_y(0.6),
    ));
    world
}

fn overhead_ray(target: Vec3) -> Ray {
    Ray::new(target + Vec3::Y * CAMERA_HEIGHT, Vec3::NEG_Y)
}

/// Press at `from`, move in a few steps to `to`, release.
fn drag_gesture(
    input: &mut BuildInput,
    controller: &mut GameBuildController,
    container: &mut SegmentContainer,
    world: &StaticWorld,
    from: Vec3,
    to: Vec3,
) {
    let mut ctx = BuildContext::new(container, Some(world));
    let mut sample = PointerSample {
        ray: overhead_ray(from),
        primary_pressed: true,
        primary_held: true,
        over_ui: false,
    };
    input.update(&sample, controller, &mut ctx);

    sample.primary_pressed = false;
    for step in 1..=4 {
        sample.ray = overhead_ray(from.lerp(to, step as f32 / 4.0));
        input.update(&sample, controller, &mut ctx);
    }

    sample.primary_held = false;
    if let Some(gesture) = input.update(&sample, controller, &mut ctx) {
        log::info!("Gesture from {:?} to {:?}: {:?}", from, to, gesture);
    }
}

fn report(controller: &mut GameBuildController) {
    for (id, event) in controller.drain_events() {
        match event {
            BridgeEvent::SegmentStateChanged { .. } => log::debug!("{:?}: {:?}", id, event),
            _ => log::info!("{:?}: {:?}", id, event),
        }
    }
}
