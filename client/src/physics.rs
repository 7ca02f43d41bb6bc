use bevy::prelude::*;
use stride_core::PhysicsWorld;

/// Fixed physics rate (Hz).
pub const PHYSICS_HZ: f64 = 50.0;

/// The rapier scene holding the level and the player body.
#[derive(Resource, Deref, DerefMut)]
pub struct Physics(pub PhysicsWorld);

/// Ordering inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    /// Locomotion forces for this step.
    Forces,
    Step,
    /// Copy simulated poses back into ECS components.
    Sync,
}

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ));
    app.insert_resource(Physics(PhysicsWorld::new(1.0 / PHYSICS_HZ as f32)));

    app.configure_sets(
        FixedUpdate,
        (PhysicsSet::Forces, PhysicsSet::Step, PhysicsSet::Sync).chain(),
    );
    app.add_systems(FixedUpdate, step.in_set(PhysicsSet::Step));
}

fn step(mut physics: ResMut<Physics>) {
    physics.step();
}
