//! The player-facing facade: one value that owns the look angles, the movement and slide
//! controllers and the last ground contact, and turns input into [`BodyCommand`]s.
//!
//! The host calls [`Locomotion::frame`] once per rendered frame and [`Locomotion::fixed_tick`]
//! once per physics step, then replays the returned commands on the player body.

use log::{debug, warn};

use crate::{
    body::{BodyCommand, Commands},
    constants::{CEILING_MARGIN, STANDING_SCALE},
    ground::{GroundContact, GroundProbe},
    input::{InputSnapshot, LookDelta},
    layers::LayerMask,
    look::{LookAngles, Orientation},
    math::{Quat, Vec3, up},
    movement::{FrameContext, MovementController, MovementState, TickContext},
    settings::{LocomotionSettings, LookSettings, SettingsError, SlideSettings},
    slide::SlideController,
};

/// All tunables of one character.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocomotionConfig {
    pub movement: LocomotionSettings,
    pub slide: SlideSettings,
    pub look: LookSettings,
}

impl LocomotionConfig {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.movement
            .validate()
            .and_then(|()| self.slide.validate())
            .and_then(|()| self.look.validate())
            .inspect_err(|e| warn!("rejected locomotion settings: {e}"))
    }
}

#[derive(Clone, Debug)]
pub struct Locomotion {
    look: LookAngles,
    movement: MovementController,
    slide: SlideController,
    contact: GroundContact,
    input: InputSnapshot,
    height_scale: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            look: LookAngles::default(),
            movement: MovementController::new(),
            slide: SlideController::new(),
            contact: GroundContact::none(),
            input: InputSnapshot::default(),
            height_scale: STANDING_SCALE,
        }
    }
}

impl Locomotion {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn look(&self) -> &LookAngles {
        &self.look
    }

    #[inline]
    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    #[inline]
    pub fn slide(&self) -> &SlideController {
        &self.slide
    }

    #[inline]
    pub fn state(&self) -> MovementState {
        self.movement.state()
    }

    /// Ground contact from the most recent probe.
    #[inline]
    pub fn contact(&self) -> &GroundContact {
        &self.contact
    }

    /// Collider height scale last sent to the host.
    #[inline]
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    pub fn camera_rotation(&self) -> Quat {
        self.look.camera_rotation()
    }

    pub fn orientation(&self) -> Orientation {
        self.look.orientation()
    }

    /// Per-frame update: mouse look, ground probe, slide edges, jump, crouch, speed clamp,
    /// drag and state selection.
    ///
    /// `position` is the body centre and `velocity` its current linear velocity.
    #[allow(clippy::too_many_arguments)]
    pub fn frame(
        &mut self,
        cfg: &LocomotionConfig,
        input: InputSnapshot,
        look_delta: LookDelta,
        probe: &impl GroundProbe,
        position: Vec3,
        velocity: Vec3,
        dt: f32,
    ) -> Commands {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.input = input;
        self.look.apply(look_delta, &cfg.look);
        self.contact = ground_contact(&cfg.movement, probe, position);

        let mut cmds = Commands::new(velocity);
        self.slide.frame(&cfg.slide, &self.input, &mut cmds);

        let headroom = if self.movement.wants_to_stand(&self.input) {
            self.has_headroom(&cfg.movement, probe, position)
        } else {
            true
        };

        self.movement.frame(
            FrameContext {
                settings: &cfg.movement,
                input: &self.input,
                contact: &self.contact,
                sliding: self.slide.is_sliding(),
                headroom,
                dt,
            },
            &mut cmds,
        );

        self.sync_height_scale(cfg, &mut cmds);
        cmds
    }

    /// Per-physics-step update: movement force, slope gravity toggle and slide force.
    pub fn fixed_tick(
        &mut self,
        cfg: &LocomotionConfig,
        probe: &impl GroundProbe,
        position: Vec3,
        velocity: Vec3,
        dt: f32,
    ) -> Commands {
        self.contact = ground_contact(&cfg.movement, probe, position);
        let orientation = self.look.orientation();
        let ctx = TickContext {
            settings: &cfg.movement,
            input: &self.input,
            orientation: &orientation,
            contact: &self.contact,
        };

        let mut cmds = Commands::new(velocity);
        self.movement.fixed_tick(ctx, &mut cmds);
        if self.slide.fixed_tick(&cfg.slide, ctx, dt, &mut cmds).is_some() {
            self.sync_height_scale(cfg, &mut cmds);
        }
        cmds
    }

    /// No geometry between the crouched body centre and the top of a standing collider.
    fn has_headroom(
        &self,
        settings: &LocomotionSettings,
        probe: &impl GroundProbe,
        position: Vec3,
    ) -> bool {
        let reach = settings.player_height * (1.0 - self.height_scale * 0.5) + CEILING_MARGIN;
        probe
            .cast_ray(position, up(), reach, LayerMask::all())
            .is_none()
    }

    /// Collider height is the smallest of the active shrink levels.
    fn sync_height_scale(&mut self, cfg: &LocomotionConfig, cmds: &mut Commands) {
        let mut scale = STANDING_SCALE;
        if self.movement.is_crouched() {
            scale = scale.min(cfg.movement.crouch_y_scale);
        }
        if self.slide.is_sliding() {
            scale = scale.min(cfg.slide.slide_y_scale);
        }
        if scale != self.height_scale {
            debug!("collider height scale {} -> {}", self.height_scale, scale);
            self.height_scale = scale;
            cmds.push(BodyCommand::SetHeightScale(scale));
        }
    }
}

fn ground_contact(
    settings: &LocomotionSettings,
    probe: &impl GroundProbe,
    position: Vec3,
) -> GroundContact {
    GroundContact::probe(
        probe,
        position,
        settings.ground_probe_distance(),
        settings.ground_layers,
    )
}
