//! Host-agnostic timing helpers.
//!
//! - [`Scheduler`] runs an action once after a delay ("invoke later").
//! - [`FixedStep`] turns variable frame time into a whole number of fixed ticks.

/// Deferred actions queued by the locomotion logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Re-arm the jump and end the exiting-slope window.
    ResetJump,
}

#[derive(Clone, Debug)]
struct Pending<A> {
    remaining: f32,
    action: A,
}

/// Fire-and-forget delayed actions.
///
/// Actions fire in the order they become due; ties keep insertion order.
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    pending: Vec<Pending<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<A> Scheduler<A> {
    /// Queue `action` to fire once `delay` seconds have been advanced.
    /// A zero or negative delay fires on the next [`Scheduler::advance`].
    pub fn after(&mut self, delay: f32, action: A) {
        let remaining = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.pending.push(Pending { remaining, action });
    }

    /// Advance time and return every action that came due, earliest first.
    pub fn advance(&mut self, dt: f32) -> Vec<A> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        for p in &mut self.pending {
            p.remaining -= dt;
        }

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.remaining <= 0.0);
        self.pending = waiting;

        // Stable sort keeps insertion order for equal deadlines.
        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining));
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Fixed-interval accumulator ("run every `step` seconds").
#[derive(Clone, Copy, Debug)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_ticks_per_advance: u32,
}

impl FixedStep {
    /// 50 Hz, the usual physics rate.
    pub const DEFAULT_STEP: f32 = 0.02;

    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            Self::DEFAULT_STEP
        };
        Self {
            step,
            accumulator: 0.0,
            max_ticks_per_advance: 8,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Accumulate `dt` and return how many fixed ticks are due.
    ///
    /// At most `max_ticks_per_advance` ticks are returned at once; the excess backlog is dropped
    /// so a long hitch doesn't spiral.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_advance {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_ticks_per_advance {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    /// Fraction of a step currently accumulated, in `[0, 1)`. Useful for render interpolation.
    pub fn overstep_fraction(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP)
    }
}
