//! Bevy (glam) <-> core (nalgebra) math conversions.

use bevy::math::{Quat, Vec3};
use nalgebra as na;

#[inline]
pub fn to_core(v: Vec3) -> stride_core::Vec3 {
    stride_core::Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn from_core(v: stride_core::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn quat_to_core(q: Quat) -> stride_core::Quat {
    na::UnitQuaternion::from_quaternion(na::Quaternion::new(q.w, q.x, q.y, q.z))
}

pub fn quat_from_core(q: stride_core::Quat) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_agree_on_both_sides() {
        let q = Quat::from_rotation_y(0.7) * Quat::from_rotation_x(-0.3);
        let v = Vec3::new(0.0, 0.0, -1.0);

        let ours = from_core(quat_to_core(q) * to_core(v));
        assert!((ours - q * v).length() < 1.0e-5);
        assert!(quat_from_core(quat_to_core(q)).angle_between(q) < 1.0e-4);
    }
}
