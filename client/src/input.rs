use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use stride_core::{ButtonState, InputSnapshot, LookDelta};

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(DualAxis)]
    Look,
    Jump,
    Sprint,
    Crouch,
    Slide,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    app.insert_resource(default_input_map());
    app.insert_resource(ActionState::<InputAction>::default());
}

pub fn default_input_map() -> InputMap<InputAction> {
    InputMap::default()
        .with_dual_axis(InputAction::Move, VirtualDPad::wasd())
        .with_dual_axis(InputAction::Look, MouseMove::default())
        .with(InputAction::Jump, KeyCode::Space)
        .with(InputAction::Sprint, KeyCode::ShiftLeft)
        .with(InputAction::Crouch, KeyCode::ControlLeft)
        .with(InputAction::Slide, KeyCode::AltLeft)
}

fn button(actions: &ActionState<InputAction>, action: InputAction) -> ButtonState {
    ButtonState {
        just_pressed: actions.just_pressed(&action),
        held: actions.pressed(&action),
        just_released: actions.just_released(&action),
    }
}

/// This frame's movement axes and button edges.
pub fn snapshot(actions: &ActionState<InputAction>) -> InputSnapshot {
    let axes = actions.axis_pair(&InputAction::Move);
    InputSnapshot {
        jump: button(actions, InputAction::Jump),
        sprint: button(actions, InputAction::Sprint),
        crouch: button(actions, InputAction::Crouch),
        slide: button(actions, InputAction::Slide),
        ..InputSnapshot::with_axes(axes.x, axes.y)
    }
}

/// Mouse motion with +y meaning "look up" (window coordinates grow downward).
pub fn look_delta(actions: &ActionState<InputAction>) -> LookDelta {
    let motion = actions.axis_pair(&InputAction::Look);
    LookDelta {
        x: motion.x,
        y: -motion.y,
    }
}
