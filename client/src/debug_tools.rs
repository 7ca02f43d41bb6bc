//! Debug/performance tooling for native dev builds.
//!
//! Compiled only with `dev_native`: the perf overlay plus a live locomotion readout.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;
use stride_core::{BodyHandle, math::horizontal};

use crate::{
    physics::Physics,
    player::{Player, PlayerLocomotion},
    settings::Tuning,
};

#[derive(Component)]
struct LocomotionReadout;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.add_systems(Startup, (spawn_perf_ui, spawn_readout));
    app.add_systems(Update, update_readout);
}

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn spawn_readout(mut commands: Commands) {
    commands.spawn((
        LocomotionReadout,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

fn update_readout(
    player: Single<&PlayerLocomotion, With<Player>>,
    physics: Res<Physics>,
    tuning: Res<Tuning>,
    mut readout: Single<&mut Text, With<LocomotionReadout>>,
) {
    let movement = player.movement();
    let contact = player.contact();
    let speed = horizontal(physics.velocity()).norm();

    readout.0 = format!(
        "state {:?}\nspeed {:.2}  move {:.2}  target {:.2}{}\ngrounded {}  slope {:.1} deg{}\nslide {}  height x{:.2}",
        player.state(),
        speed,
        movement.move_speed(),
        movement.target_speed(),
        if movement.is_interpolating() { " (lerp)" } else { "" },
        contact.grounded(),
        contact.slope_angle,
        if contact.on_slope(tuning.movement.max_slope_angle) { " (on slope)" } else { "" },
        if player.slide().is_sliding() {
            format!("{:.2}s", player.slide().remaining())
        } else {
            "-".to_string()
        },
        player.height_scale(),
    );
}
