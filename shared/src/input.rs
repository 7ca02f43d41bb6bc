/// Edge and level state of a single button for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this frame.
    pub just_pressed: bool,
    /// Currently down.
    pub held: bool,
    /// Went up this frame.
    pub just_released: bool,
}

impl ButtonState {
    /// A button that went down this frame.
    pub const PRESSED: Self = Self {
        just_pressed: true,
        held: true,
        just_released: false,
    };

    /// A button that stays down.
    pub const HELD: Self = Self {
        just_pressed: false,
        held: true,
        just_released: false,
    };

    /// A button that went up this frame.
    pub const RELEASED: Self = Self {
        just_pressed: false,
        held: false,
        just_released: true,
    };

    /// Derive this frame's state from the previous and current level.
    pub fn from_levels(was_down: bool, is_down: bool) -> Self {
        Self {
            just_pressed: is_down && !was_down,
            held: is_down,
            just_released: was_down && !is_down,
        }
    }
}

/// Everything the locomotion logic reads from the player for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Strafe axis, -1 (left) ..= 1 (right).
    pub horizontal: f32,
    /// Forward axis, -1 (back) ..= 1 (forward).
    pub vertical: f32,
    pub jump: ButtonState,
    pub sprint: ButtonState,
    pub crouch: ButtonState,
    pub slide: ButtonState,
}

impl InputSnapshot {
    /// Build a snapshot from axes, clamping them into -1..=1. Non-finite axes read as 0.
    pub fn with_axes(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal: sanitize_axis(horizontal),
            vertical: sanitize_axis(vertical),
            ..Default::default()
        }
    }

    /// True when either movement axis is deflected.
    #[inline]
    pub fn has_move_input(&self) -> bool {
        self.horizontal != 0.0 || self.vertical != 0.0
    }
}

#[inline]
fn sanitize_axis(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Raw mouse motion for one frame, in the host's units, with +y meaning "look up".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LookDelta {
    pub x: f32,
    pub y: f32,
}
