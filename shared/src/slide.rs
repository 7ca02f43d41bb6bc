use log::debug;

use crate::{
    body::{BodyCommand, Commands},
    constants::{SLIDE_DOWN_IMPULSE, SLIDE_DOWNHILL_VERTICAL},
    input::InputSnapshot,
    math::{normalize_or_zero, up},
    movement::TickContext,
    settings::SlideSettings,
};

/// Why a slide ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideEnd {
    KeyReleased,
    TimerExpired,
}

/// Slide toggle, countdown and slide force.
///
/// A slide on a downhill slope doesn't count down, so it lasts as long as the key is held.
#[derive(Clone, Debug, Default)]
pub struct SlideController {
    sliding: bool,
    timer: f32,
}

impl SlideController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.sliding
    }

    /// Seconds left on the flat-ground countdown.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.timer
    }

    /// Key edges: start on a fresh press with movement input, stop on release.
    pub fn frame(&mut self, settings: &SlideSettings, input: &InputSnapshot, cmds: &mut Commands) {
        if input.slide.just_pressed && input.has_move_input() {
            self.start(settings, cmds);
        }
        if input.slide.just_released && self.sliding {
            self.stop(SlideEnd::KeyReleased);
        }
    }

    /// Slide force for one physics step. Returns how the slide ended, if it did.
    pub fn fixed_tick(
        &mut self,
        settings: &SlideSettings,
        ctx: TickContext<'_>,
        dt: f32,
        cmds: &mut Commands,
    ) -> Option<SlideEnd> {
        if !self.sliding {
            return None;
        }

        let contact = ctx.contact;
        let direction = ctx
            .orientation
            .move_direction(ctx.input.horizontal, ctx.input.vertical);
        let downhill = contact.on_slope(ctx.settings.max_slope_angle)
            && cmds.velocity().y <= -SLIDE_DOWNHILL_VERTICAL;

        if downhill {
            cmds.push(BodyCommand::AddForce(
                contact.slope_move_direction(direction) * settings.slide_force,
            ));
        } else {
            cmds.push(BodyCommand::AddForce(
                normalize_or_zero(direction) * settings.slide_force,
            ));
            self.timer -= dt.max(0.0);
        }

        if self.timer <= 0.0 {
            self.stop(SlideEnd::TimerExpired);
            return Some(SlideEnd::TimerExpired);
        }
        None
    }

    fn start(&mut self, settings: &SlideSettings, cmds: &mut Commands) {
        self.sliding = true;
        self.timer = settings.max_slide_time;
        cmds.push(BodyCommand::AddImpulse(-up() * SLIDE_DOWN_IMPULSE));
        debug!("slide start ({}s)", settings.max_slide_time);
    }

    fn stop(&mut self, reason: SlideEnd) {
        self.sliding = false;
        debug!("slide end: {reason:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ground::{GroundContact, RayHit, test_support::PlaneProbe},
        input::ButtonState,
        layers::LayerMask,
        look::Orientation,
        math::Vec3,
        settings::LocomotionSettings,
    };

    const FIXED_DT: f32 = 0.02;

    fn pressed(horizontal: f32, vertical: f32) -> InputSnapshot {
        let mut input = InputSnapshot::with_axes(horizontal, vertical);
        input.slide = ButtonState::PRESSED;
        input
    }

    fn tick(
        slide: &mut SlideController,
        input: &InputSnapshot,
        contact: &GroundContact,
        cmds: &mut Commands,
    ) -> Option<SlideEnd> {
        let locomotion = LocomotionSettings::default();
        slide.fixed_tick(
            &SlideSettings::default(),
            TickContext {
                settings: &locomotion,
                input,
                orientation: &Orientation::default(),
                contact,
            },
            FIXED_DT,
            cmds,
        )
    }

    fn flat() -> GroundContact {
        GroundContact::from_hit(Some(RayHit {
            normal: up(),
            distance: 1.0,
        }))
    }

    #[test]
    fn needs_movement_input_to_start() {
        let settings = SlideSettings::default();
        let mut slide = SlideController::new();
        let mut cmds = Commands::default();

        slide.frame(&settings, &pressed(0.0, 0.0), &mut cmds);
        assert!(!slide.is_sliding());
        assert!(cmds.is_empty());

        slide.frame(&settings, &pressed(0.0, 1.0), &mut cmds);
        assert!(slide.is_sliding());
        assert_eq!(
            cmds.as_slice(),
            &[BodyCommand::AddImpulse(Vec3::new(0.0, -SLIDE_DOWN_IMPULSE, 0.0))]
        );
        assert_eq!(slide.remaining(), settings.max_slide_time);
    }

    #[test]
    fn releasing_the_key_stops() {
        let settings = SlideSettings::default();
        let mut slide = SlideController::new();
        let mut cmds = Commands::default();
        slide.frame(&settings, &pressed(1.0, 0.0), &mut cmds);

        let mut released = InputSnapshot::with_axes(1.0, 0.0);
        released.slide = ButtonState::RELEASED;
        slide.frame(&settings, &released, &mut cmds);
        assert!(!slide.is_sliding());
    }

    #[test]
    fn flat_slide_ends_after_max_slide_time() {
        let settings = SlideSettings::default();
        let mut slide = SlideController::new();
        let mut input = pressed(0.0, 1.0);
        slide.frame(&settings, &input, &mut Commands::default());
        input.slide = ButtonState::HELD;

        let mut ticks = 0;
        let mut end = None;
        while end.is_none() {
            let mut cmds = Commands::default();
            end = tick(&mut slide, &input, &flat(), &mut cmds);
            assert!((cmds.total_force().norm() - settings.slide_force).abs() < 1.0e-3);
            ticks += 1;
            assert!(ticks < 1000);
        }

        assert_eq!(end, Some(SlideEnd::TimerExpired));
        assert!(!slide.is_sliding());
        let expected = (settings.max_slide_time / FIXED_DT).ceil() as i32;
        assert!((ticks - expected).abs() <= 1, "{ticks} vs {expected}");
    }

    #[test]
    fn downhill_slope_slide_never_times_out() {
        let settings = SlideSettings::default();
        let mut slide = SlideController::new();
        let mut input = pressed(0.0, 1.0);
        slide.frame(&settings, &input, &mut Commands::default());
        input.slide = ButtonState::HELD;

        let ramp = GroundContact::probe(
            &PlaneProbe::tilted(25.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.5,
            LayerMask::all(),
        );
        let falling = Vec3::new(0.0, -2.0, 4.0);

        for _ in 0..10_000 {
            let mut cmds = Commands::new(falling);
            let end = tick(&mut slide, &input, &ramp, &mut cmds);
            assert_eq!(end, None);
            // Force follows the ramp surface.
            let force = cmds.total_force();
            let normal = ramp.normal().unwrap_or_else(up);
            assert!(force.dot(&normal).abs() < 1.0e-2);
        }
        assert!(slide.is_sliding());
        assert_eq!(slide.remaining(), settings.max_slide_time);
    }

    #[test]
    fn uphill_on_a_slope_still_counts_down() {
        let settings = SlideSettings::default();
        let mut slide = SlideController::new();
        slide.frame(&settings, &pressed(0.0, 1.0), &mut Commands::default());

        let ramp = GroundContact::probe(
            &PlaneProbe::tilted(25.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.5,
            LayerMask::all(),
        );
        let mut cmds = Commands::new(Vec3::new(0.0, 0.5, -3.0));
        tick(&mut slide, &InputSnapshot::with_axes(0.0, 1.0), &ramp, &mut cmds);
        assert!(slide.remaining() < settings.max_slide_time);
    }

    #[test]
    fn idle_controller_does_nothing() {
        let mut slide = SlideController::new();
        let mut cmds = Commands::default();
        let end = tick(&mut slide, &InputSnapshot::with_axes(1.0, 1.0), &flat(), &mut cmds);
        assert_eq!(end, None);
        assert!(cmds.is_empty());
    }
}
