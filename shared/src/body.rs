use crate::math::Vec3;

/// A single mutation the locomotion logic asks the host to perform on the player body.
///
/// Forces are continuous (integrated over the physics step, scaled by mass); impulses change
/// velocity immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyCommand {
    SetVelocity(Vec3),
    AddForce(Vec3),
    AddImpulse(Vec3),
    /// Linear drag coefficient.
    SetDrag(f32),
    SetGravityEnabled(bool),
    /// Collider height relative to standing height, in `(0, 1]`.
    SetHeightScale(f32),
}

/// The host side of the player's rigid body.
pub trait BodyHandle {
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    fn add_force(&mut self, force: Vec3);
    fn add_impulse(&mut self, impulse: Vec3);
    fn set_drag(&mut self, drag: f32);
    fn set_gravity_enabled(&mut self, enabled: bool);
    fn set_height_scale(&mut self, scale: f32);

    fn apply(&mut self, command: BodyCommand) {
        match command {
            BodyCommand::SetVelocity(v) => self.set_velocity(v),
            BodyCommand::AddForce(f) => self.add_force(f),
            BodyCommand::AddImpulse(i) => self.add_impulse(i),
            BodyCommand::SetDrag(d) => self.set_drag(d),
            BodyCommand::SetGravityEnabled(e) => self.set_gravity_enabled(e),
            BodyCommand::SetHeightScale(s) => self.set_height_scale(s),
        }
    }

    fn apply_all(&mut self, commands: &[BodyCommand]) {
        for &c in commands {
            self.apply(c);
        }
    }
}

/// Ordered command list for one frame or tick.
///
/// Tracks the body velocity as the commands would leave it, so later decisions in the same
/// update see earlier `SetVelocity` writes. Impulses are tracked too, assuming unit mass.
#[derive(Clone, Debug, PartialEq)]
pub struct Commands {
    commands: Vec<BodyCommand>,
    velocity: Vec3,
}

impl Default for Commands {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

impl Commands {
    pub fn new(velocity: Vec3) -> Self {
        Self {
            commands: Vec::new(),
            velocity,
        }
    }

    /// Velocity after the commands pushed so far.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn push(&mut self, command: BodyCommand) {
        match command {
            BodyCommand::SetVelocity(v) => self.velocity = v,
            BodyCommand::AddImpulse(i) => self.velocity += i,
            _ => {}
        }
        self.commands.push(command);
    }

    pub fn as_slice(&self) -> &[BodyCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sum of all `AddForce` commands.
    pub fn total_force(&self) -> Vec3 {
        self.commands
            .iter()
            .filter_map(|c| match c {
                BodyCommand::AddForce(f) => Some(*f),
                _ => None,
            })
            .fold(Vec3::zeros(), |acc, f| acc + f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        velocity: Vec3,
        forces: Vec3,
        drag: f32,
        gravity: bool,
        scale: f32,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                velocity: Vec3::zeros(),
                forces: Vec3::zeros(),
                drag: 0.0,
                gravity: false,
                scale: 1.0,
            }
        }
    }

    impl BodyHandle for Recorder {
        fn velocity(&self) -> Vec3 {
            self.velocity
        }
        fn set_velocity(&mut self, velocity: Vec3) {
            self.velocity = velocity;
        }
        fn add_force(&mut self, force: Vec3) {
            self.forces += force;
        }
        fn add_impulse(&mut self, impulse: Vec3) {
            self.velocity += impulse;
        }
        fn set_drag(&mut self, drag: f32) {
            self.drag = drag;
        }
        fn set_gravity_enabled(&mut self, enabled: bool) {
            self.gravity = enabled;
        }
        fn set_height_scale(&mut self, scale: f32) {
            self.scale = scale;
        }
    }

    #[test]
    fn commands_track_velocity_in_order() {
        let mut cmds = Commands::new(Vec3::new(1.0, -3.0, 0.0));
        cmds.push(BodyCommand::SetVelocity(Vec3::new(1.0, 0.0, 0.0)));
        cmds.push(BodyCommand::AddImpulse(Vec3::new(0.0, 12.0, 0.0)));
        cmds.push(BodyCommand::AddForce(Vec3::new(5.0, 0.0, 0.0)));

        assert_eq!(cmds.velocity(), Vec3::new(1.0, 12.0, 0.0));
        assert_eq!(cmds.total_force(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn apply_all_replays_every_command() {
        let mut body = Recorder::new();
        let mut cmds = Commands::new(Vec3::zeros());
        cmds.push(BodyCommand::SetDrag(4.0));
        cmds.push(BodyCommand::SetGravityEnabled(true));
        cmds.push(BodyCommand::SetHeightScale(0.5));
        cmds.push(BodyCommand::AddImpulse(Vec3::new(0.0, -0.5, 0.0)));
        cmds.push(BodyCommand::AddForce(Vec3::new(0.0, 0.0, 2.0)));

        body.apply_all(cmds.as_slice());

        assert_eq!(body.drag, 4.0);
        assert!(body.gravity);
        assert_eq!(body.scale, 0.5);
        assert_eq!(body.velocity, cmds.velocity());
        assert_eq!(body.forces, cmds.total_force());
    }
}
