use nalgebra as na;

use crate::{
    constants::PITCH_LIMIT_DEG,
    input::LookDelta,
    math::{Quat, Vec3},
    settings::LookSettings,
};

/// Accumulated mouse-look angles in degrees.
///
/// Conventions (right-handed, -Z forward, +Y up):
/// - positive yaw turns left (counter-clockwise seen from above),
/// - positive pitch looks up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookAngles {
    pub pitch_deg: f32,
    pub yaw_deg: f32,
}

impl LookAngles {
    /// Apply one frame of mouse motion. Moving the mouse right turns right; moving it up looks up.
    /// Pitch is clamped to ±90° no matter how much motion accumulates.
    pub fn apply(&mut self, delta: LookDelta, settings: &LookSettings) {
        if delta.x.is_finite() {
            self.yaw_deg = (self.yaw_deg - delta.x * settings.sensitivity_x) % 360.0;
        }
        if delta.y.is_finite() {
            self.pitch_deg = (self.pitch_deg + delta.y * settings.sensitivity_y)
                .clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
        }
    }

    /// Camera rotation: yaw about +Y, then pitch about the yawed +X.
    pub fn camera_rotation(&self) -> Quat {
        self.orientation_rotation()
            * na::UnitQuaternion::from_axis_angle(&Vec3::x_axis(), self.pitch_deg.to_radians())
    }

    /// Yaw-only rotation used for movement direction.
    pub fn orientation_rotation(&self) -> Quat {
        na::UnitQuaternion::from_axis_angle(&Vec3::y_axis(), self.yaw_deg.to_radians())
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_rotation(self.orientation_rotation())
    }
}

/// Planar movement frame (no pitch).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::from_rotation(Quat::identity())
    }
}

impl Orientation {
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            forward: rotation * Vec3::new(0.0, 0.0, -1.0),
            right: rotation * Vec3::new(1.0, 0.0, 0.0),
        }
    }

    /// Unnormalized desired direction: `forward * vertical + right * horizontal`.
    #[inline]
    pub fn move_direction(&self, horizontal: f32, vertical: f32) -> Vec3 {
        self.forward * vertical + self.right * horizontal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pitch_never_leaves_the_limit() {
        let settings = LookSettings::default();
        let mut look = LookAngles::default();

        for _ in 0..1000 {
            look.apply(LookDelta { x: 0.0, y: 500.0 }, &settings);
            assert!(look.pitch_deg <= PITCH_LIMIT_DEG);
        }
        assert_eq!(look.pitch_deg, PITCH_LIMIT_DEG);

        for _ in 0..1000 {
            look.apply(LookDelta { x: 0.0, y: -500.0 }, &settings);
            assert!(look.pitch_deg >= -PITCH_LIMIT_DEG);
        }
        assert_eq!(look.pitch_deg, -PITCH_LIMIT_DEG);
    }

    #[test]
    fn orientation_ignores_pitch() {
        let look = LookAngles {
            pitch_deg: 60.0,
            yaw_deg: 0.0,
        };
        let frame = look.orientation();
        assert_relative_eq!(frame.forward, Vec3::new(0.0, 0.0, -1.0), epsilon = 1.0e-6);
        assert_relative_eq!(frame.right, Vec3::new(1.0, 0.0, 0.0), epsilon = 1.0e-6);

        // The camera does tilt.
        let cam_forward = look.camera_rotation() * Vec3::new(0.0, 0.0, -1.0);
        assert!(cam_forward.y > 0.8);
    }

    #[test]
    fn mouse_right_turns_right() {
        let settings = LookSettings {
            sensitivity_x: 1.0,
            sensitivity_y: 1.0,
        };
        let mut look = LookAngles::default();
        look.apply(LookDelta { x: 90.0, y: 0.0 }, &settings);

        let frame = look.orientation();
        assert_relative_eq!(frame.forward, Vec3::new(1.0, 0.0, 0.0), epsilon = 1.0e-5);
        assert_relative_eq!(frame.right, Vec3::new(0.0, 0.0, 1.0), epsilon = 1.0e-5);
    }

    #[test]
    fn non_finite_motion_is_ignored() {
        let mut look = LookAngles::default();
        look.apply(
            LookDelta {
                x: f32::NAN,
                y: f32::INFINITY,
            },
            &LookSettings::default(),
        );
        assert_eq!(look, LookAngles::default());
    }
}
