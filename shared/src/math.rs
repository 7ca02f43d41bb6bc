use nalgebra as na;

use crate::constants::EPS;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// World up (+Y).
#[inline]
pub fn up() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

/// Normalize `v`, or return zero when it is too short to have a direction.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(EPS).unwrap_or_else(Vec3::zeros)
}

/// Planar (XZ) part of a vector.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Remove the component of `v` along `normal`.
///
/// `normal` doesn't need to be unit length; a zero normal returns `v` unchanged.
#[inline]
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.norm_squared();
    if len_sq <= EPS * EPS {
        return v;
    }
    v - normal * (v.dot(&normal) / len_sq)
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
///
/// Returns 0 when either vector is degenerate.
#[inline]
pub fn angle_between_deg(a: Vec3, b: Vec3) -> f32 {
    let denom = (a.norm_squared() * b.norm_squared()).sqrt();
    if denom <= EPS {
        return 0.0;
    }
    (a.dot(&b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Clamp the magnitude of `v` to `max_len`, keeping its direction.
#[inline]
pub fn clamp_length(v: Vec3, max_len: f32) -> Vec3 {
    let max_len = max_len.max(0.0);
    let len = v.norm();
    if len > max_len && len > EPS {
        v * (max_len / len)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projecting_onto_a_tilted_plane_removes_the_normal_component() {
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        let projected = project_on_plane(Vec3::new(0.0, 0.0, 1.0), normal);

        assert_relative_eq!(projected.dot(&normal), 0.0, epsilon = 1.0e-6);
        assert_relative_eq!(projected, Vec3::new(0.0, -0.5, 0.5), epsilon = 1.0e-6);
    }

    #[test]
    fn angle_between_up_and_a_45_degree_normal() {
        let normal = Vec3::new(1.0, 1.0, 0.0);
        assert_relative_eq!(angle_between_deg(up(), normal), 45.0, epsilon = 1.0e-4);
        assert_eq!(angle_between_deg(up(), Vec3::zeros()), 0.0);
    }

    #[test]
    fn clamp_length_only_shrinks() {
        let v = Vec3::new(3.0, 0.0, 4.0);
        assert_relative_eq!(clamp_length(v, 10.0), v);
        assert_relative_eq!(clamp_length(v, 2.5).norm(), 2.5, epsilon = 1.0e-6);
    }

    #[test]
    fn normalize_or_zero_handles_zero() {
        assert_eq!(normalize_or_zero(Vec3::zeros()), Vec3::zeros());
        assert_relative_eq!(normalize_or_zero(Vec3::new(0.0, 0.0, -2.0)).z, -1.0);
    }
}
