use bevy::prelude::*;
use stride_core::LocomotionConfig;

/// Character tunables, validated once before the player spawns.
#[derive(Resource, Debug, Clone, Default, Deref)]
pub struct Tuning(pub LocomotionConfig);

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Tuning>();
    app.add_systems(PreStartup, validate_tuning);
}

fn validate_tuning(mut tuning: ResMut<Tuning>) {
    if let Err(err) = tuning.0.validate() {
        error!("invalid locomotion settings ({err}), falling back to defaults");
        tuning.0 = LocomotionConfig::default();
    }
}
