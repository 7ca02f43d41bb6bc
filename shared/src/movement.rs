use log::{debug, trace};

use crate::{
    body::{BodyCommand, Commands},
    constants::{
        CROUCH_DOWN_IMPULSE, FLAT_FORCE_MULTIPLIER, SLIDE_SPEED_MAX_VERTICAL,
        SLOPE_CREST_DOWNFORCE, SLOPE_FORCE_MULTIPLIER, SPEED_LERP_THRESHOLD,
    },
    ground::GroundContact,
    input::InputSnapshot,
    interpolation::SpeedLerp,
    look::Orientation,
    math::{Vec3, clamp_length, horizontal, normalize_or_zero, up},
    scheduler::{DeferredAction, Scheduler},
    settings::LocomotionSettings,
};

/// Locomotion mode, recomputed every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementState {
    #[default]
    Walking,
    Sprinting,
    Air,
    Crouching,
    Sliding,
}

/// Per-frame inputs of [`MovementController::frame`].
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub settings: &'a LocomotionSettings,
    pub input: &'a InputSnapshot,
    pub contact: &'a GroundContact,
    /// Whether the slide controller currently reports an active slide.
    pub sliding: bool,
    /// Whether there is room to stand up (only consulted when a stand-up is pending).
    pub headroom: bool,
    pub dt: f32,
}

/// Per-tick inputs of [`MovementController::fixed_tick`].
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub settings: &'a LocomotionSettings,
    pub input: &'a InputSnapshot,
    pub orientation: &'a Orientation,
    pub contact: &'a GroundContact,
}

/// Walking / sprinting / crouching / air / sliding controller for a force-driven rigid body.
///
/// Frame work (input edges, jump, speed clamp, state selection and speed smoothing) happens in
/// [`MovementController::frame`]; force application in [`MovementController::fixed_tick`].
/// Both append to a [`Commands`] list instead of touching the body directly.
#[derive(Clone, Debug)]
pub struct MovementController {
    state: MovementState,
    move_speed: f32,
    target_speed: f32,
    previous_target_speed: f32,
    speed_lerp: Option<SpeedLerp>,
    ready_to_jump: bool,
    exiting_slope: bool,
    crouched: bool,
    drag: Option<f32>,
    gravity: Option<bool>,
    timers: Scheduler<DeferredAction>,
}

impl Default for MovementController {
    fn default() -> Self {
        Self {
            state: MovementState::Walking,
            move_speed: 0.0,
            target_speed: 0.0,
            previous_target_speed: 0.0,
            speed_lerp: None,
            ready_to_jump: true,
            exiting_slope: false,
            crouched: false,
            drag: None,
            gravity: None,
            timers: Scheduler::default(),
        }
    }
}

impl MovementController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> MovementState {
        self.state
    }

    /// Speed the body is currently driven and clamped at.
    #[inline]
    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    #[inline]
    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    #[inline]
    pub fn is_interpolating(&self) -> bool {
        self.speed_lerp.is_some()
    }

    #[inline]
    pub fn is_ready_to_jump(&self) -> bool {
        self.ready_to_jump
    }

    /// Inside the post-jump window that suppresses slope handling.
    #[inline]
    pub fn is_exiting_slope(&self) -> bool {
        self.exiting_slope
    }

    /// Collider is shrunk for a crouch.
    #[inline]
    pub fn is_crouched(&self) -> bool {
        self.crouched
    }

    /// Crouch key is up but the collider is still crouched (blocked by a ceiling last frame).
    #[inline]
    pub fn wants_to_stand(&self, input: &InputSnapshot) -> bool {
        self.crouched && !input.crouch.held
    }

    /// Once-per-frame update.
    pub fn frame(&mut self, ctx: FrameContext<'_>, cmds: &mut Commands) {
        self.run_timers(ctx.dt);
        self.handle_jump(ctx, cmds);
        self.handle_crouch(ctx, cmds);
        self.control_speed(ctx, cmds);
        self.apply_drag(ctx, cmds);
        self.select_state(ctx, cmds.velocity());
    }

    /// Once-per-physics-step force application.
    pub fn fixed_tick(&mut self, ctx: TickContext<'_>, cmds: &mut Commands) {
        let settings = ctx.settings;
        let direction = ctx
            .orientation
            .move_direction(ctx.input.horizontal, ctx.input.vertical);
        let on_slope = ctx.contact.on_slope(settings.max_slope_angle);

        if on_slope && !self.exiting_slope {
            let along = ctx.contact.slope_move_direction(direction);
            cmds.push(BodyCommand::AddForce(
                along * self.move_speed * SLOPE_FORCE_MULTIPLIER,
            ));
            // Keep the body glued to the surface when cresting.
            if cmds.velocity().y > 0.0 {
                cmds.push(BodyCommand::AddForce(-up() * SLOPE_CREST_DOWNFORCE));
            }
        } else {
            let mut force = normalize_or_zero(direction) * self.move_speed * FLAT_FORCE_MULTIPLIER;
            if !ctx.contact.grounded() {
                force *= settings.air_multiplier;
            }
            cmds.push(BodyCommand::AddForce(force));
        }

        // Slope-follow forces would fight gravity on a ramp.
        let gravity = !on_slope;
        if self.gravity != Some(gravity) {
            self.gravity = Some(gravity);
            cmds.push(BodyCommand::SetGravityEnabled(gravity));
        }
    }

    fn run_timers(&mut self, dt: f32) {
        for action in self.timers.advance(dt) {
            match action {
                DeferredAction::ResetJump => {
                    self.ready_to_jump = true;
                    self.exiting_slope = false;
                }
            }
        }
    }

    fn handle_jump(&mut self, ctx: FrameContext<'_>, cmds: &mut Commands) {
        // Held, not just pressed: holding the key re-jumps once per cooldown.
        if !(ctx.input.jump.held && self.ready_to_jump && ctx.contact.grounded()) {
            return;
        }

        self.ready_to_jump = false;
        self.exiting_slope = true;

        let v = cmds.velocity();
        cmds.push(BodyCommand::SetVelocity(Vec3::new(v.x, 0.0, v.z)));
        cmds.push(BodyCommand::AddImpulse(up() * ctx.settings.jump_force));
        self.timers
            .after(ctx.settings.jump_cooldown, DeferredAction::ResetJump);

        debug!("jump (force {})", ctx.settings.jump_force);
    }

    fn handle_crouch(&mut self, ctx: FrameContext<'_>, cmds: &mut Commands) {
        if ctx.input.crouch.just_pressed && !self.crouched {
            self.crouched = true;
            // The shrunken collider would otherwise hang in the air for a few frames.
            cmds.push(BodyCommand::AddImpulse(-up() * CROUCH_DOWN_IMPULSE));
            debug!("crouch down");
        } else if self.wants_to_stand(ctx.input) {
            if ctx.headroom {
                self.crouched = false;
                debug!("crouch up");
            } else {
                trace!("crouch up deferred: no headroom");
            }
        }
    }

    /// Cap the body speed at the current move speed.
    ///
    /// On a slope the full 3D velocity is capped; elsewhere only the planar part, so jumps and
    /// falls keep their vertical speed.
    fn control_speed(&mut self, ctx: FrameContext<'_>, cmds: &mut Commands) {
        let v = cmds.velocity();
        let on_slope = ctx.contact.on_slope(ctx.settings.max_slope_angle);

        if on_slope && !self.exiting_slope {
            if v.norm() > self.move_speed {
                cmds.push(BodyCommand::SetVelocity(clamp_length(v, self.move_speed)));
            }
        } else {
            let flat = horizontal(v);
            if flat.norm() > self.move_speed {
                let limited = clamp_length(flat, self.move_speed);
                cmds.push(BodyCommand::SetVelocity(Vec3::new(limited.x, v.y, limited.z)));
            }
        }
    }

    fn apply_drag(&mut self, ctx: FrameContext<'_>, cmds: &mut Commands) {
        let drag = if ctx.contact.grounded() {
            ctx.settings.ground_drag
        } else {
            0.0
        };
        if self.drag != Some(drag) {
            self.drag = Some(drag);
            cmds.push(BodyCommand::SetDrag(drag));
        }
    }

    /// Pick the state (sliding > crouching > sprinting > walking > air) and move the speed
    /// toward its target.
    fn select_state(&mut self, ctx: FrameContext<'_>, velocity: Vec3) {
        let settings = ctx.settings;
        let input = ctx.input;
        let grounded = ctx.contact.grounded();
        let on_slope = ctx.contact.on_slope(settings.max_slope_angle);

        let state = if ctx.sliding {
            self.target_speed = if on_slope && velocity.y < SLIDE_SPEED_MAX_VERTICAL {
                settings.slide_speed
            } else {
                settings.sprint_speed
            };
            MovementState::Sliding
        } else if input.crouch.held || self.crouched {
            self.target_speed = settings.crouch_speed;
            MovementState::Crouching
        } else if grounded && input.sprint.held {
            self.target_speed = settings.sprint_speed;
            MovementState::Sprinting
        } else if grounded {
            self.target_speed = settings.walk_speed;
            MovementState::Walking
        } else {
            // Air keeps whatever target the last grounded state picked.
            MovementState::Air
        };

        if state != self.state {
            debug!(
                "movement state {:?} -> {:?} (target speed {})",
                self.state, state, self.target_speed
            );
            self.state = state;
        }

        let gap = (self.previous_target_speed - self.target_speed).abs();
        if gap > SPEED_LERP_THRESHOLD && self.move_speed != 0.0 {
            trace!(
                "smoothing speed {} -> {}",
                self.move_speed, self.target_speed
            );
            self.speed_lerp = Some(SpeedLerp::new(self.move_speed, self.target_speed));
        } else if !self
            .speed_lerp
            .is_some_and(|lerp| lerp.target() == self.target_speed)
        {
            self.speed_lerp = None;
            self.move_speed = self.target_speed;
        }
        self.previous_target_speed = self.target_speed;

        let rate = self.lerp_rate(ctx, on_slope);
        if let Some(lerp) = self.speed_lerp.as_mut() {
            if lerp.is_finished() {
                self.move_speed = lerp.target();
                self.speed_lerp = None;
            } else {
                self.move_speed = lerp.tick(ctx.dt * rate);
            }
        }
    }

    /// Steeper slopes build speed faster.
    fn lerp_rate(&self, ctx: FrameContext<'_>, on_slope: bool) -> f32 {
        let settings = ctx.settings;
        if on_slope {
            let angle_boost = 1.0 + ctx.contact.slope_angle / 90.0;
            settings.speed_increase_multiplier * settings.slope_increase_multiplier * angle_boost
        } else {
            settings.speed_increase_multiplier
        }
    }
}
