//! Collision Validator
//!
//! Checks one placed segment against world geometry and records the result
//! on the segment's material marker.

use super::segment::{BridgeSegment, MaterialState};
use crate::game::config::BridgeBuildSettings;
use crate::physics::{LayerMask, OverlapQuery};

/// Per-segment overlap check against the world.
///
/// Without a world (authoring context, no physics available) every segment
/// passes and the marker is left untouched.
#[derive(Clone, Copy)]
pub struct CollisionValidator<'a> {
    world: Option<&'a dyn OverlapQuery>,
    shrink: f32,
    layers: LayerMask,
}

impl<'a> CollisionValidator<'a> {
    pub fn new(world: Option<&'a dyn OverlapQuery>, settings: &BridgeBuildSettings) -> Self {
        Self {
            world,
            shrink: settings.collision_shrink,
            layers: settings.collision_layers,
        }
    }

    /// True when a world is attached and checks actually run.
    pub fn is_active(&self) -> bool {
        self.world.is_some()
    }

    /// Overlap-test `segment` at its current pose and update its marker.
    pub fn validate(&self, segment: &mut BridgeSegment) -> bool {
        let Some(world) = self.world else {
            return true;
        };

        let obb = segment.collider(self.shrink);
        let hits = world.overlap_box(obb.center, obb.half_extents, obb.rotation, self.layers);
        if hits > 0 {
            log::debug!(
                "[Bridge] {:?} {:?} overlaps {} collider(s) at {:?}",
                segment.role,
                segment.id,
                hits,
                segment.position
            );
            segment.set_material(MaterialState::Invalid);
            false
        } else {
            segment.set_material(MaterialState::Valid);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::bridge::segment::{SegmentId, SegmentRole};
    use crate::game::config::SegmentTemplate;
    use crate::physics::{Obb, StaticWorld};
    use glam::{Quat, Vec3};

    fn segment_at(position: Vec3) -> BridgeSegment {
        let template = SegmentTemplate::new("deck", 2.0).with_size(Vec3::new(2.0, 1.0, 2.0));
        let mut seg = BridgeSegment::new(SegmentId(1), SegmentRole::Middle, &template);
        seg.position = position;
        seg
    }

    fn world_with_rock() -> StaticWorld {
        let mut world = StaticWorld::new();
        world.add_box(Obb::new(Vec3::new(10.0, 0.0, 0.0), Vec3::splat(1.0), Quat::IDENTITY));
        world
    }

    #[test]
    fn test_overlap_marks_invalid() {
        let world = world_with_rock();
        let validator = CollisionValidator::new(Some(&world), &BridgeBuildSettings::default());
        let mut seg = segment_at(Vec3::new(10.5, 0.0, 0.0));

        assert!(!validator.validate(&mut seg));
        assert_eq!(seg.material, MaterialState::Invalid);
    }

    #[test]
    fn test_clear_marks_valid() {
        let world = world_with_rock();
        let validator = CollisionValidator::new(Some(&world), &BridgeBuildSettings::default());
        let mut seg = segment_at(Vec3::new(0.0, 0.0, 0.0));

        assert!(validator.validate(&mut seg));
        assert_eq!(seg.material, MaterialState::Valid);
    }

    #[test]
    fn test_shrink_lets_neighbours_touch() {
        // Collider spans 1.0..3.0 on X unshrunk; the rock face sits at 3.0
        let mut world = StaticWorld::new();
        world.add_box(Obb::new(Vec3::new(4.0, 0.0, 0.0), Vec3::splat(1.0), Quat::IDENTITY));
        let validator = CollisionValidator::new(Some(&world), &BridgeBuildSettings::default());
        let mut seg = segment_at(Vec3::new(2.05, 0.0, 0.0));

        assert!(validator.validate(&mut seg));
    }

    #[test]
    fn test_other_layers_ignored() {
        let mut world = StaticWorld::new();
        world.add_on_layer(
            Obb::new(Vec3::ZERO, Vec3::splat(1.0), Quat::IDENTITY),
            LayerMask::BUILDABLE,
        );
        let validator = CollisionValidator::new(Some(&world), &BridgeBuildSettings::default());
        assert!(validator.validate(&mut segment_at(Vec3::ZERO)));
    }

    #[test]
    fn test_no_world_passes_without_marking() {
        let validator = CollisionValidator::new(None, &BridgeBuildSettings::default());
        let mut seg = segment_at(Vec3::ZERO);

        assert!(!validator.is_active());
        assert!(validator.validate(&mut seg));
        assert_eq!(seg.material, MaterialState::Neutral);
    }
}
