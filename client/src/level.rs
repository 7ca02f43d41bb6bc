//! The test course: a floor, ramps of increasing steepness, a low bar to crouch under and a
//! few props. Every piece gets a mesh and a matching static collider.

use bevy::prelude::*;
use stride_core::{ColliderShapeDef, Layer, LayerMask, WorldStaticDef};

use crate::{
    convert::{quat_to_core, to_core},
    physics::Physics,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
}

#[derive(Clone, Copy, Debug)]
enum PieceShape {
    /// Square floor of the given side; collides as an infinite plane.
    Floor { size: f32 },
    Block { size: Vec3 },
    Ball { radius: f32 },
    Pillar { radius: f32, height: f32 },
}

#[derive(Clone, Copy, Debug)]
struct Piece {
    translation: Vec3,
    rotation: Quat,
    shape: PieceShape,
    layer: Layer,
    color: Color,
}

impl Piece {
    fn ground(translation: Vec3, rotation: Quat, shape: PieceShape) -> Self {
        Self {
            translation,
            rotation,
            shape,
            layer: Layer::Ground,
            color: Color::srgb(0.45, 0.47, 0.5),
        }
    }

    fn prop(translation: Vec3, shape: PieceShape) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            shape,
            layer: Layer::Props,
            color: Color::srgb_u8(124, 144, 255),
        }
    }

    fn collider(&self, id: u32) -> WorldStaticDef {
        let shape = match self.shape {
            PieceShape::Floor { .. } => ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
            PieceShape::Block { size } => ColliderShapeDef::Cuboid {
                half_extents: to_core(size * 0.5),
            },
            PieceShape::Ball { radius } => ColliderShapeDef::Sphere { radius },
            PieceShape::Pillar { radius, height } => ColliderShapeDef::CylinderY {
                radius,
                half_height: height * 0.5,
            },
        };
        WorldStaticDef {
            id,
            translation: to_core(self.translation),
            rotation: quat_to_core(self.rotation),
            shape,
            layers: LayerMask::from_flags(&[self.layer]),
        }
    }

    fn mesh(&self) -> Mesh {
        match self.shape {
            PieceShape::Floor { size } => Plane3d::default().mesh().size(size, size).build(),
            PieceShape::Block { size } => Cuboid::from_size(size).into(),
            PieceShape::Ball { radius } => Sphere::new(radius).into(),
            PieceShape::Pillar { radius, height } => Cylinder::new(radius, height).into(),
        }
    }
}

/// A 16m long, 6m wide ramp climbing toward -Z, its low edge resting on the floor at `z`.
fn ramp(x: f32, z: f32, angle_deg: f32) -> Piece {
    let length = 16.0;
    let thickness = 0.5;
    let angle = angle_deg.to_radians();
    let rotation = Quat::from_rotation_x(angle);
    // Centre so that the top face's near edge meets the floor.
    let centre = Vec3::new(x, 0.0, z) + rotation * Vec3::new(0.0, -thickness * 0.5, -length * 0.5);
    Piece::ground(
        centre,
        rotation,
        PieceShape::Block {
            size: Vec3::new(6.0, thickness, length),
        },
    )
}

fn course() -> Vec<Piece> {
    let mut pieces = vec![Piece::ground(
        Vec3::ZERO,
        Quat::IDENTITY,
        PieceShape::Floor { size: 120.0 },
    )];

    pieces.extend([ramp(-12.0, -6.0, 15.0), ramp(0.0, -6.0, 30.0), ramp(12.0, -6.0, 50.0)]);

    // Crouch tunnel: two walls and a roof 1.5m above the floor.
    let tunnel_z = 14.0;
    pieces.extend([
        Piece::prop(
            Vec3::new(-21.5, 1.0, tunnel_z),
            PieceShape::Block {
                size: Vec3::new(1.0, 2.0, 6.0),
            },
        ),
        Piece::prop(
            Vec3::new(-18.5, 1.0, tunnel_z),
            PieceShape::Block {
                size: Vec3::new(1.0, 2.0, 6.0),
            },
        ),
        Piece::prop(
            Vec3::new(-20.0, 1.75, tunnel_z),
            PieceShape::Block {
                size: Vec3::new(4.0, 0.5, 6.0),
            },
        ),
    ]);

    pieces.extend([
        Piece::prop(
            Vec3::new(8.0, 0.5, 10.0),
            PieceShape::Block {
                size: Vec3::splat(1.0),
            },
        ),
        Piece::prop(Vec3::new(10.0, 0.75, 14.0), PieceShape::Ball { radius: 0.75 }),
        Piece::prop(
            Vec3::new(14.0, 2.0, 8.0),
            PieceShape::Pillar {
                radius: 0.6,
                height: 4.0,
            },
        ),
    ]);
    pieces
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut physics: ResMut<Physics>,
) {
    let pieces = course();
    let mut statics = Vec::with_capacity(pieces.len());

    for (id, piece) in (0u32..).zip(pieces.iter()) {
        statics.push(piece.collider(id));
        commands.spawn((
            Transform::from_translation(piece.translation).with_rotation(piece.rotation),
            Mesh3d(meshes.add(piece.mesh())),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: piece.color,
                perceptual_roughness: 1.0,
                metallic: 0.0,
                ..default()
            })),
        ));
    }

    match physics.add_statics(statics) {
        Ok(()) => info!("course built: {} pieces", pieces.len()),
        Err(err) => error!("course colliders rejected: {err}"),
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 40.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_low_edge_meets_the_floor() {
        let piece = ramp(0.0, -6.0, 30.0);
        let PieceShape::Block { size } = piece.shape else {
            panic!("ramp is a block");
        };
        // Near edge of the top face, in world space.
        let edge = piece.translation + piece.rotation * Vec3::new(0.0, size.y * 0.5, size.z * 0.5);
        assert!(edge.y.abs() < 1.0e-4, "edge at {edge}");
        assert!((edge.z + 6.0).abs() < 1.0e-4, "edge at {edge}");

        // Climbing toward -Z.
        let far = piece.translation + piece.rotation * Vec3::new(0.0, size.y * 0.5, -size.z * 0.5);
        assert!(far.y > 7.0);
    }

    #[test]
    fn every_piece_becomes_a_collider() {
        let pieces = course();
        let statics: Vec<_> = (0u32..).zip(pieces.iter()).map(|(id, p)| p.collider(id)).collect();
        assert_eq!(statics.len(), pieces.len());
        assert!(
            statics
                .iter()
                .any(|s| matches!(s.shape, ColliderShapeDef::Plane { .. }))
        );
    }
}
