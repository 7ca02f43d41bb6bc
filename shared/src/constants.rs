//! Fixed tuning constants of the locomotion model.
//!
//! Designer-facing tunables live in [`crate::settings`]. The values here are the
//! multipliers baked into the force model and are not meant to be changed per actor.

/// Extra ray length added below the capsule half-height when probing for ground (meters).
pub const GROUND_PROBE_MARGIN: f32 = 0.3;

/// Minimum jump in target speed that triggers a smoothed transition instead of a snap.
pub const SPEED_LERP_THRESHOLD: f32 = 4.0;

/// Force multiplier for flat-ground and air movement.
pub const FLAT_FORCE_MULTIPLIER: f32 = 10.0;

/// Force multiplier for movement along a slope.
pub const SLOPE_FORCE_MULTIPLIER: f32 = 20.0;

/// Downward force applied while moving up over a slope crest with positive vertical velocity.
pub const SLOPE_CREST_DOWNFORCE: f32 = 80.0;

/// Downward impulse applied when the collider shrinks for a crouch, so the body doesn't float.
pub const CROUCH_DOWN_IMPULSE: f32 = 0.5;

/// Downward impulse applied when a slide starts.
pub const SLIDE_DOWN_IMPULSE: f32 = 5.0;

/// A slide on a slope uses `slide_speed` only while vertical velocity stays below this (m/s).
pub const SLIDE_SPEED_MAX_VERTICAL: f32 = 0.1;

/// A slide counts as a downhill slope slide (no countdown) when vertical velocity is at
/// or below the negation of this value (m/s).
pub const SLIDE_DOWNHILL_VERTICAL: f32 = 0.1;

/// Camera pitch limit in degrees (both directions).
pub const PITCH_LIMIT_DEG: f32 = 90.0;

/// Extra clearance kept above the standing capsule when checking whether it's safe to stand up.
pub const CEILING_MARGIN: f32 = 0.05;

/// Full collider height scale.
pub const STANDING_SCALE: f32 = 1.0;

/// Practical small value for float comparisons.
pub const EPS: f32 = 1.0e-6;
