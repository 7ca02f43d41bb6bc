//! Headless harness: a rapier world, one player and the locomotion facade, stepped the way a
//! game loop would (variable frames feeding a fixed-step accumulator).

use stride_core::{
    BodyHandle, ColliderShapeDef, FixedStep, InputSnapshot, Layer, LayerMask, Locomotion,
    LocomotionConfig, LookDelta, PhysicsWorld, Vec3, WorldStaticDef,
    physics::rapier3d::na::UnitQuaternion,
};

pub const FRAME_DT: f32 = 1.0 / 60.0;
pub const PLAYER_RADIUS: f32 = 0.5;

pub struct Sim {
    pub cfg: LocomotionConfig,
    pub world: PhysicsWorld,
    pub locomotion: Locomotion,
    pub fixed: FixedStep,
    pub elapsed: f32,
}

pub fn floor() -> WorldStaticDef {
    WorldStaticDef {
        id: 0,
        translation: Vec3::zeros(),
        rotation: UnitQuaternion::identity(),
        shape: ColliderShapeDef::Plane {
            offset_along_normal: 0.0,
        },
        layers: LayerMask::from_flags(&[Layer::Ground]),
    }
}

/// A wide ramp tilted `angle_deg` about X, centred at `(0, 2, -20)`.
pub fn ramp(angle_deg: f32) -> WorldStaticDef {
    WorldStaticDef {
        id: 1,
        translation: Vec3::new(0.0, 2.0, -20.0),
        rotation: UnitQuaternion::from_axis_angle(&Vec3::x_axis(), angle_deg.to_radians()),
        shape: ColliderShapeDef::Cuboid {
            half_extents: Vec3::new(5.0, 0.25, 10.0),
        },
        layers: LayerMask::from_flags(&[Layer::Ground]),
    }
}

impl Sim {
    pub fn new(statics: Vec<WorldStaticDef>, spawn: Vec3) -> Self {
        let cfg = LocomotionConfig::default();
        cfg.validate().expect("default settings are valid");

        let fixed = FixedStep::default();
        let mut world = PhysicsWorld::new(fixed.step());
        world.add_statics(statics).expect("valid level");
        world
            .spawn_player(spawn, cfg.movement.player_height, PLAYER_RADIUS)
            .expect("valid capsule");

        Self {
            cfg,
            world,
            locomotion: Locomotion::new(),
            fixed,
            elapsed: 0.0,
        }
    }

    pub fn on_floor() -> Self {
        Self::new(vec![floor()], Vec3::new(0.0, 1.0, 0.0))
    }

    pub fn position(&self) -> Vec3 {
        self.world.player_position().expect("player spawned")
    }

    pub fn velocity(&self) -> Vec3 {
        self.world.velocity()
    }

    /// One rendered frame followed by whatever fixed steps came due.
    pub fn frame(&mut self, input: InputSnapshot) {
        let cmds = self.locomotion.frame(
            &self.cfg,
            input,
            LookDelta::default(),
            &self.world,
            self.position(),
            self.velocity(),
            FRAME_DT,
        );
        self.world.apply_all(cmds.as_slice());

        for _ in 0..self.fixed.advance(FRAME_DT) {
            let cmds = self.locomotion.fixed_tick(
                &self.cfg,
                &self.world,
                self.position(),
                self.velocity(),
                self.fixed.step(),
            );
            self.world.apply_all(cmds.as_slice());
            self.world.step();
        }
        self.elapsed += FRAME_DT;
    }

    pub fn run(&mut self, seconds: f32, input: InputSnapshot) {
        let frames = (seconds / FRAME_DT).round() as u32;
        for _ in 0..frames {
            self.frame(input);
        }
    }
}
