/*!
Designer-facing locomotion tunables.

These are the knobs a level designer adjusts per character. The defaults match the
reference test course shipped with the client. Call [`LocomotionSettings::validate`]
(and friends) once before the simulation runs; the runtime assumes validated values.

Notes
- Distances are in meters, time in seconds, angles in degrees.
- Speeds are the magnitude the velocity clamp caps the body at, not force values.
*/

use thiserror::Error;

use crate::layers::{Layer, LayerMask};

/// A tunable failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("`{name}` must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("`{name}` must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("`{name}` must lie in {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("ground layer mask is empty; the ground probe would never hit")]
    EmptyGroundMask,
}

fn finite(name: &'static str, value: f32) -> Result<f32, SettingsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SettingsError::NotFinite { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), SettingsError> {
    if finite(name, value)? < 0.0 {
        return Err(SettingsError::Negative { name, value });
    }
    Ok(())
}

fn positive(name: &'static str, value: f32) -> Result<(), SettingsError> {
    if finite(name, value)? <= 0.0 {
        return Err(SettingsError::NotPositive { name, value });
    }
    Ok(())
}

/// Checks `min < value <= max`.
fn in_half_open(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), SettingsError> {
    let value = finite(name, value)?;
    if value <= min || value > max {
        return Err(SettingsError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Movement, jump, crouch, ground check and slope tunables.
#[derive(Clone, Debug, PartialEq)]
pub struct LocomotionSettings {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    /// Target speed while sliding down a slope.
    pub slide_speed: f32,
    pub crouch_speed: f32,
    /// Linear drag applied while grounded (0 in the air).
    pub ground_drag: f32,

    /// Rate at which a smoothed speed transition advances.
    pub speed_increase_multiplier: f32,
    /// Extra rate factor applied to smoothed transitions while on a slope.
    pub slope_increase_multiplier: f32,

    pub jump_force: f32,
    /// Seconds before another jump can fire; also the length of the exiting-slope window.
    pub jump_cooldown: f32,
    /// Force multiplier applied to planar input while airborne.
    pub air_multiplier: f32,

    /// Collider height scale while crouched (fraction of standing height).
    pub crouch_y_scale: f32,

    /// Standing capsule height (meters).
    pub player_height: f32,
    pub ground_layers: LayerMask,

    /// Steepest surface (degrees from flat) treated as a walkable slope.
    pub max_slope_angle: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            sprint_speed: 10.0,
            slide_speed: 30.0,
            crouch_speed: 3.5,
            ground_drag: 4.0,
            speed_increase_multiplier: 1.5,
            slope_increase_multiplier: 2.5,
            jump_force: 12.0,
            jump_cooldown: 0.25,
            air_multiplier: 0.4,
            crouch_y_scale: 0.5,
            player_height: 2.0,
            ground_layers: LayerMask::from_flags(&[Layer::Ground]),
            max_slope_angle: 40.0,
        }
    }
}

impl LocomotionSettings {
    /// Length of the downward ground probe from the body center.
    #[inline]
    pub fn ground_probe_distance(&self) -> f32 {
        self.player_height * 0.5 + crate::constants::GROUND_PROBE_MARGIN
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        non_negative("walk_speed", self.walk_speed)?;
        non_negative("sprint_speed", self.sprint_speed)?;
        non_negative("slide_speed", self.slide_speed)?;
        non_negative("crouch_speed", self.crouch_speed)?;
        non_negative("ground_drag", self.ground_drag)?;
        positive("speed_increase_multiplier", self.speed_increase_multiplier)?;
        positive("slope_increase_multiplier", self.slope_increase_multiplier)?;
        non_negative("jump_force", self.jump_force)?;
        non_negative("jump_cooldown", self.jump_cooldown)?;
        non_negative("air_multiplier", self.air_multiplier)?;
        in_half_open("crouch_y_scale", self.crouch_y_scale, 0.0, 1.0)?;
        positive("player_height", self.player_height)?;
        in_half_open("max_slope_angle", self.max_slope_angle, 0.0, 90.0)?;
        if self.ground_layers.is_empty() {
            return Err(SettingsError::EmptyGroundMask);
        }
        Ok(())
    }
}

/// Slide tunables.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideSettings {
    /// Seconds a slide lasts on flat ground.
    pub max_slide_time: f32,
    pub slide_force: f32,
    /// Collider height scale while sliding.
    pub slide_y_scale: f32,
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            max_slide_time: 0.75,
            slide_force: 200.0,
            slide_y_scale: 0.5,
        }
    }
}

impl SlideSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        non_negative("max_slide_time", self.max_slide_time)?;
        non_negative("slide_force", self.slide_force)?;
        in_half_open("slide_y_scale", self.slide_y_scale, 0.0, 1.0)?;
        Ok(())
    }
}

/// Mouse-look tunables.
#[derive(Clone, Debug, PartialEq)]
pub struct LookSettings {
    /// Degrees of yaw per unit of horizontal mouse motion.
    pub sensitivity_x: f32,
    /// Degrees of pitch per unit of vertical mouse motion.
    pub sensitivity_y: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            sensitivity_x: 0.12,
            sensitivity_y: 0.12,
        }
    }
}

impl LookSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        non_negative("sensitivity_x", self.sensitivity_x)?;
        non_negative("sensitivity_y", self.sensitivity_y)?;
        Ok(())
    }
}
