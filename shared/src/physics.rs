//! Rapier-backed host for the player rigid body and static level geometry.
//!
//! The world owns the full rapier pipeline. Level colliders are inserted parentless (they never
//! move); the player is a rotation-locked dynamic body with a unit-mass capsule. Layer bits
//! live in each collider's `user_data` so ray queries can be filtered by [`LayerMask`].

// Re-export Rapier so the client can build shapes without depending on `rapier3d` directly.
pub use rapier3d;

use log::debug;
use rapier3d::{
    na::{Isometry3, Point3, Translation3, UnitQuaternion},
    prelude::*,
};
use thiserror::Error;

use crate::{
    body::BodyHandle,
    ground::{GroundProbe, RayHit},
    layers::{Layer, LayerMask, mask_from_user_data, mask_to_user_data},
    math::Vec3,
};

/// Standard earth gravity (m/s^2, pointing down).
pub const GRAVITY: f32 = -9.81;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("player capsule needs a positive, finite height and radius (got {height} x {radius})")]
    InvalidCapsule { height: f32, radius: f32 },
    #[error("static collider {id} has a non-finite pose or size")]
    InvalidStatic { id: u32 },
}

/// Definition of an immutable level collider.
///
/// Units are meters. For planes the normal is `rotation * +Y`, offset along that normal by
/// `offset_along_normal`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable identifier; statics are inserted in `id` order.
    pub id: u32,
    pub translation: Vec3,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
    pub layers: LayerMask,
}

#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite half-space.
    Plane { offset_along_normal: f32 },
    Cuboid { half_extents: Vec3 },
    Sphere { radius: f32 },
    CylinderY { radius: f32, half_height: f32 },
}

impl WorldStaticDef {
    fn is_finite(&self) -> bool {
        let pose = self.translation.iter().all(|v| v.is_finite())
            && self.rotation.coords.iter().all(|v| v.is_finite());
        let shape = match &self.shape {
            ColliderShapeDef::Plane {
                offset_along_normal,
            } => offset_along_normal.is_finite(),
            ColliderShapeDef::Cuboid { half_extents } => half_extents.iter().all(|v| v.is_finite()),
            ColliderShapeDef::Sphere { radius } => radius.is_finite(),
            ColliderShapeDef::CylinderY {
                radius,
                half_height,
            } => radius.is_finite() && half_height.is_finite(),
        };
        pose && shape
    }
}

/// Build a parentless collider positioned by the definition's pose.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let mut translation = def.translation;
    let shape = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            translation += (def.rotation * Vec3::y()) * *offset_along_normal;
            SharedShape::halfspace(Vector::y_axis())
        }
        ColliderShapeDef::Cuboid { half_extents } => {
            SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
        ColliderShapeDef::Sphere { radius } => SharedShape::ball(*radius),
        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => SharedShape::cylinder(*half_height, *radius),
    };

    ColliderBuilder::new(shape)
        .position(Isometry3::from_parts(
            Translation3::from(translation),
            def.rotation,
        ))
        .user_data(mask_to_user_data(def.layers))
        .build()
}

#[derive(Clone, Copy, Debug)]
struct PlayerBody {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    height: f32,
    radius: f32,
}

/// A Y-aligned capsule of total height `height * scale`, centered on the body.
fn player_capsule(height: f32, radius: f32, scale: f32) -> SharedShape {
    let half_total = height * scale * 0.5;
    let radius = radius.min(half_total);
    SharedShape::capsule_y((half_total - radius).max(0.0), radius)
}

/// Dynamic rapier scene with one player body.
pub struct PhysicsWorld {
    gravity: Vector<f32>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    player: Option<PlayerBody>,
}

impl PhysicsWorld {
    /// Empty world stepping `dt` seconds at a time.
    pub fn new(dt: f32) -> Self {
        Self {
            gravity: vector![0.0, GRAVITY, 0.0],
            params: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            player: None,
        }
    }

    /// Insert level geometry, sorted by `id` so equal inputs build equal worlds.
    ///
    /// Statics become queryable immediately, before the first step.
    pub fn add_statics(
        &mut self,
        defs: impl IntoIterator<Item = WorldStaticDef>,
    ) -> Result<(), PhysicsError> {
        let mut defs: Vec<_> = defs.into_iter().collect();
        defs.sort_by_key(|d| d.id);
        if let Some(bad) = defs.iter().find(|d| !d.is_finite()) {
            return Err(PhysicsError::InvalidStatic { id: bad.id });
        }

        let handles: Vec<_> = defs
            .iter()
            .map(|def| self.colliders.insert(collider_from_def(def)))
            .collect();
        self.refresh_broad_phase(&handles);
        debug!("inserted {} static colliders", handles.len());
        Ok(())
    }

    /// Spawn (or replace) the player capsule with its centre at `position`.
    pub fn spawn_player(
        &mut self,
        position: Vec3,
        height: f32,
        radius: f32,
    ) -> Result<(), PhysicsError> {
        if !(height.is_finite() && radius.is_finite() && height > 0.0 && radius > 0.0) {
            return Err(PhysicsError::InvalidCapsule { height, radius });
        }
        if let Some(old) = self.player.take() {
            self.bodies.remove(
                old.body,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(position)
            .lock_rotations()
            .ccd_enabled(true)
            .build();
        let body = self.bodies.insert(body);
        let collider = ColliderBuilder::new(player_capsule(height, radius, 1.0))
            .mass(1.0)
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .user_data(mask_to_user_data(LayerMask::from_flags(&[Layer::Player])))
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }
        self.refresh_broad_phase(&[collider]);

        self.player = Some(PlayerBody {
            body,
            collider,
            height,
            radius,
        });
        debug!("player spawned at {position:?}");
        Ok(())
    }

    /// Advance the simulation by one fixed step, then clear accumulated forces.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        if let Some(body) = self.player_body_mut() {
            body.reset_forces(false);
        }
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.params.dt
    }

    pub fn player_position(&self) -> Option<Vec3> {
        self.player_body().map(|b| *b.translation())
    }

    /// Current collider height (meters).
    pub fn player_height(&self) -> Option<f32> {
        let player = self.player?;
        let collider = self.colliders.get(player.collider)?;
        let capsule = collider.shape().as_capsule()?;
        Some(capsule.height() + 2.0 * capsule.radius)
    }

    fn player_body(&self) -> Option<&RigidBody> {
        self.bodies.get(self.player?.body)
    }

    fn player_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.bodies.get_mut(self.player?.body)
    }

    fn refresh_broad_phase(&mut self, modified: &[ColliderHandle]) {
        let mut events = Vec::new();
        self.broad_phase.update(
            &self.params,
            &self.colliders,
            &self.bodies,
            modified,
            &[],
            &mut events,
        );
    }
}

impl GroundProbe for PhysicsWorld {
    fn cast_ray(
        &self,
        origin: Vec3,
        dir: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let layers = |_: ColliderHandle, collider: &Collider| {
            mask_from_user_data(collider.user_data).intersects(mask)
        };
        let mut filter = QueryFilter::default().predicate(&layers);
        if let Some(player) = self.player {
            filter = filter.exclude_rigid_body(player.body);
        }

        let query = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        );
        let ray = Ray::new(Point3::from(origin), dir);
        let (_, hit) = query.cast_ray_and_get_normal(&ray, max_distance, true)?;
        Some(RayHit {
            normal: hit.normal,
            distance: hit.time_of_impact,
        })
    }
}

impl BodyHandle for PhysicsWorld {
    fn velocity(&self) -> Vec3 {
        self.player_body()
            .map_or_else(Vec3::zeros, |b| *b.linvel())
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        if let Some(body) = self.player_body_mut() {
            body.set_linvel(velocity, true);
        }
    }

    fn add_force(&mut self, force: Vec3) {
        if let Some(body) = self.player_body_mut() {
            body.add_force(force, true);
        }
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        if let Some(body) = self.player_body_mut() {
            body.apply_impulse(impulse, true);
        }
    }

    fn set_drag(&mut self, drag: f32) {
        if let Some(body) = self.player_body_mut() {
            body.set_linear_damping(drag);
        }
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        if let Some(body) = self.player_body_mut() {
            body.set_gravity_scale(if enabled { 1.0 } else { 0.0 }, true);
        }
    }

    fn set_height_scale(&mut self, scale: f32) {
        let Some(player) = self.player else {
            return;
        };
        if let Some(collider) = self.colliders.get_mut(player.collider) {
            collider.set_shape(player_capsule(player.height, player.radius, scale));
        }
    }
}
