//! Build capability: the drag-to-place gesture every buildable reacts to.

use glam::Vec3;

use crate::game::bridge::SegmentFactory;
use crate::physics::{CombinedOverlap, OverlapQuery};

/// Host services a buildable needs while it is being placed or edited.
pub struct BuildContext<'a> {
    /// Creates and destroys segment instances in the host scene
    pub factory: &'a mut dyn SegmentFactory,
    /// World geometry to validate against. `None` in authoring contexts,
    /// where placement is never rejected for collisions.
    pub world: Option<&'a dyn OverlapQuery>,
}

impl<'a> BuildContext<'a> {
    pub fn new(factory: &'a mut dyn SegmentFactory, world: Option<&'a dyn OverlapQuery>) -> Self {
        Self { factory, world }
    }

    /// Context without a physics world.
    pub fn authoring(factory: &'a mut dyn SegmentFactory) -> Self {
        Self { factory, world: None }
    }

    /// Run `f` with `extra` queried alongside the world. A context without a
    /// world stays without one.
    pub fn with_extra_colliders<R>(
        &mut self,
        extra: &dyn OverlapQuery,
        f: impl FnOnce(&mut BuildContext<'_>) -> R,
    ) -> R {
        let combined = self.world.map(|world| CombinedOverlap {
            primary: world,
            secondary: extra,
        });
        let mut scoped = BuildContext::new(
            &mut *self.factory,
            combined.as_ref().map(|c| c as &dyn OverlapQuery),
        );
        f(&mut scoped)
    }
}

/// Drag-to-place gesture.
///
/// `on_build_start` is called on pointer press, `on_build_drag` while the
/// pointer moves, and either `on_build_end` on release or `on_build_cancel`
/// when the outer controller abandons the build.
pub trait BuildableHandler {
    fn on_build_start(&mut self, position: Vec3, ctx: &mut BuildContext<'_>);

    fn on_build_drag(&mut self, position: Vec3, ctx: &mut BuildContext<'_>);

    /// Returns whether the buildable was placed. On `false` the buildable has
    /// already cleaned up after itself.
    fn on_build_end(&mut self, position: Vec3, ctx: &mut BuildContext<'_>) -> bool;

    fn on_build_cancel(&mut self, ctx: &mut BuildContext<'_>);
}
