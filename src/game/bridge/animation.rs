//! Segment Animator
//!
//! Grow-in and shrink-out scale animations for segment instances. Tasks are
//! keyed by segment id; a segment has at most one running task and starting
//! a new one replaces whatever was running.

use std::collections::HashMap;

use super::segment::SegmentId;

/// Smooth ease in/out for animation progress.
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Scale 0 -> 1
    Create,
    /// Scale from the current value -> 0, then the instance is disposed
    Destroy,
}

#[derive(Debug, Clone, Copy)]
struct AnimationTask {
    kind: AnimationKind,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl AnimationTask {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    fn scale(&self) -> f32 {
        self.from + (self.to - self.from) * smoothstep(self.progress())
    }
}

/// Scale updates produced by one [`SegmentAnimator::tick`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AnimationFrame {
    /// New scale for every segment that was animating this tick
    pub scales: Vec<(SegmentId, f32)>,
    /// Tasks that completed this tick, sorted by id
    pub finished: Vec<(SegmentId, AnimationKind)>,
}

/// Drives per-segment scale animations.
#[derive(Debug, Default)]
pub struct SegmentAnimator {
    tasks: HashMap<SegmentId, AnimationTask>,
}

impl SegmentAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow `id` from nothing to full scale over `duration` seconds.
    pub fn start_create(&mut self, id: SegmentId, duration: f32) {
        self.start(id, AnimationKind::Create, 0.0, 1.0, duration);
    }

    /// Shrink `id` from `start_scale` to nothing over `duration` seconds.
    pub fn start_destroy(&mut self, id: SegmentId, duration: f32, start_scale: f32) {
        self.start(id, AnimationKind::Destroy, start_scale, 0.0, duration);
    }

    fn start(&mut self, id: SegmentId, kind: AnimationKind, from: f32, to: f32, duration: f32) {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        let task = AnimationTask {
            kind,
            from,
            to,
            duration,
            elapsed: 0.0,
        };
        if let Some(previous) = self.tasks.insert(id, task) {
            log::trace!("[Bridge] {:?} {:?} animation replaced by {:?}", id, previous.kind, kind);
        }
    }

    /// Drop the task for `id`, returning what it was doing.
    #[cfg(test)]
    pub fn cancel(&mut self, id: SegmentId) -> Option<AnimationKind> {
        self.tasks.remove(&id).map(|task| task.kind)
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_animating(&self, id: SegmentId) -> bool {
        self.tasks.contains_key(&id)
    }

    #[cfg(test)]
    pub fn kind(&self, id: SegmentId) -> Option<AnimationKind> {
        self.tasks.get(&id).map(|task| task.kind)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Advance every task by `dt` seconds.
    ///
    /// A zero-duration task jumps to its final scale and finishes on the
    /// first tick.
    pub fn tick(&mut self, dt: f32) -> AnimationFrame {
        let dt = dt.max(0.0);
        let mut frame = AnimationFrame::default();

        for (id, task) in self.tasks.iter_mut() {
            task.elapsed += dt;
            frame.scales.push((*id, task.scale()));
            if task.progress() >= 1.0 {
                frame.finished.push((*id, task.kind));
            }
        }

        for (id, _) in &frame.finished {
            self.tasks.remove(id);
        }
        frame.scales.sort_by_key(|(id, _)| *id);
        frame.finished.sort_by_key(|(id, _)| *id);
        frame
    }

    /// Complete every task immediately.
    pub fn finish_all(&mut self) -> AnimationFrame {
        let mut frame = AnimationFrame::default();
        for (id, task) in self.tasks.drain() {
            frame.scales.push((id, task.to));
            frame.finished.push((id, task.kind));
        }
        frame.scales.sort_by_key(|(id, _)| *id);
        frame.finished.sort_by_key(|(id, _)| *id);
        frame
    }
}
