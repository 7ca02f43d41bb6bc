use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow, WindowFocused},
};

/// Whether the cursor is captured for mouse look.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorLocked(pub bool);

pub(super) fn plugin(app: &mut App) {
    // Captured from the start; Escape releases, a left click captures again.
    app.insert_resource(CursorLocked(true));

    app.add_systems(
        Update,
        (
            (release_on_escape, lock_on_click, release_on_focus_lost),
            apply_cursor.run_if(resource_changed::<CursorLocked>),
        )
            .chain(),
    );
}

fn apply_cursor(
    locked: Res<CursorLocked>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if locked.0 {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}

fn release_on_escape(keys: Res<ButtonInput<KeyCode>>, mut locked: ResMut<CursorLocked>) {
    if keys.just_pressed(KeyCode::Escape) && locked.0 {
        locked.0 = false;
    }
}

fn lock_on_click(mouse: Res<ButtonInput<MouseButton>>, mut locked: ResMut<CursorLocked>) {
    if mouse.just_pressed(MouseButton::Left) && !locked.0 {
        locked.0 = true;
    }
}

fn release_on_focus_lost(
    mut messages: MessageReader<WindowFocused>,
    mut locked: ResMut<CursorLocked>,
) {
    for message in messages.read() {
        if !message.focused && locked.0 {
            locked.0 = false;
        }
    }
}
