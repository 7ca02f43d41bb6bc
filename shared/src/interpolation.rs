use crate::constants::EPS;

/// Resumable linear transition of the move speed toward a target.
///
/// The transition spans `|target - start|` units of "time"; callers advance it with a
/// rate-scaled step each frame, so a larger speed gap takes proportionally longer.
/// Restarting is plain reassignment: whoever holds the `Option<SpeedLerp>` replaces it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedLerp {
    start: f32,
    target: f32,
    elapsed: f32,
    span: f32,
}

impl SpeedLerp {
    pub fn new(start: f32, target: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            span: (target - start).abs(),
        }
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.span <= EPS || self.elapsed >= self.span
    }

    /// Current interpolated value; `target` once finished.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.target;
        }
        let t = (self.elapsed / self.span).clamp(0.0, 1.0);
        self.start + (self.target - self.start) * t
    }

    /// Advance by `step` units. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, step: f32) {
        if step.is_finite() && step > 0.0 {
            self.elapsed += step;
        }
    }

    /// Sample the current value, then advance. Returns the sampled value.
    pub fn tick(&mut self, step: f32) -> f32 {
        let v = self.value();
        self.advance(step);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_the_start_value() {
        let mut lerp = SpeedLerp::new(7.0, 30.0);
        assert_eq!(lerp.tick(0.1), 7.0);
        assert!(lerp.value() > 7.0);
    }

    #[test]
    fn samples_are_monotonic_and_end_on_target() {
        let mut lerp = SpeedLerp::new(7.0, 30.0);
        let mut last = lerp.value();
        let mut frames = 0;
        while !lerp.is_finished() {
            let v = lerp.tick(0.5);
            assert!(v >= last);
            assert!(v <= 30.0);
            last = v;
            frames += 1;
        }
        // span 23 at 0.5 per frame.
        assert_eq!(frames, 46);
        assert_eq!(lerp.value(), 30.0);
    }

    #[test]
    fn decreasing_transition_is_monotonic_too() {
        let mut lerp = SpeedLerp::new(30.0, 10.0);
        let mut last = lerp.value();
        for _ in 0..100 {
            let v = lerp.tick(0.3);
            assert!(v <= last);
            assert!(v >= 10.0);
            last = v;
        }
        assert!(lerp.is_finished());
    }

    #[test]
    fn zero_gap_is_already_finished() {
        let lerp = SpeedLerp::new(5.0, 5.0);
        assert!(lerp.is_finished());
        assert_eq!(lerp.value(), 5.0);
    }

    #[test]
    fn bogus_steps_do_not_advance() {
        let mut lerp = SpeedLerp::new(0.0, 10.0);
        lerp.advance(-1.0);
        lerp.advance(f32::NAN);
        assert_eq!(lerp.value(), 0.0);
    }
}
