//! The local player: spawns the rigid body, feeds input into the locomotion core every frame,
//! applies forces every physics step and smooths the rendered transform toward the simulation.

use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;
use stride_core::{BodyHandle, Locomotion, LookDelta};

use crate::{
    convert::{from_core, quat_from_core, to_core},
    cursor::CursorLocked,
    input::{self, InputAction},
    physics::{Physics, PhysicsSet},
    settings::Tuning,
};

pub const PLAYER_RADIUS: f32 = 0.5;
const SPAWN: Vec3 = Vec3::new(0.0, 1.0, 8.0);
/// How fast the rendered body catches up with the simulated one.
const RENDER_DECAY_RATE: f32 = 30.0;

#[derive(Component, Debug)]
pub struct Player;

#[derive(Component, Debug, Default, Deref, DerefMut)]
pub struct PlayerLocomotion(pub Locomotion);

/// Body centre as of the last physics step.
#[derive(Component, Debug, Clone, Copy)]
pub struct SimTransform {
    pub translation: Vec3,
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_player);
    app.add_systems(Update, (drive_frame, interpolate).chain());
    app.add_systems(FixedUpdate, fixed_tick.in_set(PhysicsSet::Forces));
    app.add_systems(FixedUpdate, sync_sim_transform.in_set(PhysicsSet::Sync));
}

fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tuning: Res<Tuning>,
    mut physics: ResMut<Physics>,
) {
    let height = tuning.movement.player_height;
    if let Err(err) = physics.spawn_player(to_core(SPAWN), height, PLAYER_RADIUS) {
        error!("could not spawn player: {err}");
        return;
    }

    let segment = (height - 2.0 * PLAYER_RADIUS).max(0.0);
    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerLocomotion::default(),
        SimTransform { translation: SPAWN },
        Transform::from_translation(SPAWN),
        Mesh3d(meshes.add(Capsule3d::new(PLAYER_RADIUS, segment))),
        MeshMaterial3d(materials.add(Color::srgb(0.85, 0.55, 0.3))),
    ));
    info!("player spawned at {SPAWN}");
}

/// Look, jump, crouch, slide edges, speed clamp and state selection.
fn drive_frame(
    time: Res<Time>,
    tuning: Res<Tuning>,
    actions: Res<ActionState<InputAction>>,
    cursor: Res<CursorLocked>,
    mut physics: ResMut<Physics>,
    player: Single<&mut PlayerLocomotion, With<Player>>,
) {
    let mut locomotion = player.into_inner();
    let Some(position) = physics.player_position() else {
        return;
    };

    let look = if cursor.0 {
        input::look_delta(&actions)
    } else {
        LookDelta::default()
    };
    let velocity = physics.velocity();
    let cmds = locomotion.frame(
        &tuning.0,
        input::snapshot(&actions),
        look,
        &physics.0,
        position,
        velocity,
        time.delta_secs(),
    );
    physics.apply_all(cmds.as_slice());
}

fn fixed_tick(
    time: Res<Time>,
    tuning: Res<Tuning>,
    mut physics: ResMut<Physics>,
    player: Single<&mut PlayerLocomotion, With<Player>>,
) {
    let mut locomotion = player.into_inner();
    let Some(position) = physics.player_position() else {
        return;
    };

    let velocity = physics.velocity();
    let cmds = locomotion.fixed_tick(&tuning.0, &physics.0, position, velocity, time.delta_secs());
    physics.apply_all(cmds.as_slice());
}

fn sync_sim_transform(physics: Res<Physics>, mut sim: Single<&mut SimTransform, With<Player>>) {
    if let Some(position) = physics.player_position() {
        sim.translation = from_core(position);
    }
}

fn interpolate(
    time: Res<Time>,
    player: Single<(&mut Transform, &SimTransform, &PlayerLocomotion), With<Player>>,
) {
    let (mut render, sim, locomotion) = player.into_inner();
    render
        .translation
        .smooth_nudge(&sim.translation, RENDER_DECAY_RATE, time.delta_secs());
    render.rotation = quat_from_core(locomotion.look().orientation_rotation());
    render.scale.y = locomotion.height_scale();
}
