use bevy::{prelude::*, transform::TransformSystems};

use crate::{
    convert::quat_from_core,
    player::{Player, PlayerLocomotion},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(
        PostUpdate,
        follow_head.before(TransformSystems::Propagate),
    );
}

/// Eye position above the body centre, as a fraction of the current collider height.
const EYE_HEIGHT_FRACTION: f32 = 0.4;
const FOV_DEG: f32 = 80.0;

fn add_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEG.to_radians(),
            ..default()
        }),
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Transform::default(),
        DistanceFog {
            color: Color::srgba(0.35, 0.48, 0.66, 1.0),
            directional_light_color: Color::srgba(1.0, 0.95, 0.85, 0.5),
            directional_light_exponent: 30.0,
            falloff: FogFalloff::from_visibility_colors(
                300.0,
                Color::srgb(0.35, 0.5, 0.66),
                Color::srgb(0.8, 0.8, 0.7),
            ),
        },
    ));
}

/// First-person camera: sits at the head of the rendered body and takes the look rotation
/// as-is, so looking around never lags.
fn follow_head(
    mut camera: Single<&mut Transform, With<Camera3d>>,
    player: Single<(&Transform, &PlayerLocomotion), (With<Player>, Without<Camera3d>)>,
    tuning: Res<crate::settings::Tuning>,
) {
    let (body, locomotion) = player.into_inner();
    let height = tuning.movement.player_height * body.scale.y;
    camera.translation = body.translation + Vec3::Y * height * EYE_HEIGHT_FRACTION;
    camera.rotation = quat_from_core(locomotion.camera_rotation());
}
