use crate::{
    constants::EPS,
    layers::LayerMask,
    math::{Vec3, angle_between_deg, normalize_or_zero, project_on_plane, up},
};

/// Nearest ray intersection reported by a [`GroundProbe`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World-space surface normal at the hit point.
    pub normal: Vec3,
    /// Distance from the ray origin (meters).
    pub distance: f32,
}

/// Scene query used by the locomotion logic.
///
/// Implementations must ignore the player's own collider.
pub trait GroundProbe {
    /// Cast a ray from `origin` along the unit vector `dir`, up to `max_distance`, reporting
    /// the nearest hit on a collider whose layers intersect `mask`.
    fn cast_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32, mask: LayerMask)
    -> Option<RayHit>;
}

/// Result of the per-frame downward probe.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GroundContact {
    pub hit: Option<RayHit>,
    /// Angle between world up and the hit normal, in degrees (0 when airborne).
    pub slope_angle: f32,
}

impl GroundContact {
    /// Probe straight down from `origin` up to `max_distance` on the `mask` layers.
    pub fn probe(
        probe: &impl GroundProbe,
        origin: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Self {
        let hit = probe.cast_ray(origin, -up(), max_distance, mask);
        Self::from_hit(hit)
    }

    pub fn from_hit(hit: Option<RayHit>) -> Self {
        let slope_angle = hit.map_or(0.0, |h| angle_between_deg(up(), h.normal));
        Self { hit, slope_angle }
    }

    /// Airborne contact.
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.hit.is_some()
    }

    /// Standing on a surface tilted strictly between flat and `max_slope_angle` degrees.
    pub fn on_slope(&self, max_slope_angle: f32) -> bool {
        self.hit.is_some() && self.slope_angle > EPS && self.slope_angle < max_slope_angle
    }

    /// `direction` projected onto the surface plane and normalized.
    ///
    /// Falls back to the normalized `direction` when airborne, and to zero when the
    /// projection is degenerate.
    pub fn slope_move_direction(&self, direction: Vec3) -> Vec3 {
        match self.hit {
            Some(hit) => normalize_or_zero(project_on_plane(direction, hit.normal)),
            None => normalize_or_zero(direction),
        }
    }

    /// Surface normal of the last hit, if any.
    pub fn normal(&self) -> Option<Vec3> {
        self.hit.map(|h| h.normal)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::PlaneProbe;
    use super::*;
    use crate::layers::Layer;
    use approx::assert_relative_eq;

    #[test]
    fn flat_ground_is_grounded_but_not_a_slope() {
        let contact = GroundContact::probe(
            &PlaneProbe::flat(),
            Vec3::new(0.0, 1.0, 0.0),
            1.3,
            LayerMask::all(),
        );
        assert!(contact.grounded());
        assert!(!contact.on_slope(40.0));
        assert_relative_eq!(contact.hit.map(|h| h.distance).unwrap_or(-1.0), 1.0);
    }

    #[test]
    fn probe_misses_when_too_high() {
        let contact = GroundContact::probe(
            &PlaneProbe::flat(),
            Vec3::new(0.0, 2.0, 0.0),
            1.3,
            LayerMask::all(),
        );
        assert!(!contact.grounded());
        assert_eq!(contact.slope_angle, 0.0);
    }

    #[test]
    fn slope_requires_angle_strictly_inside_the_limit() {
        let ramp = GroundContact::from_hit(PlaneProbe::tilted(30.0).cast_ray(
            Vec3::new(0.0, 1.0, 0.0),
            -up(),
            1.5,
            LayerMask::all(),
        ));
        assert_relative_eq!(ramp.slope_angle, 30.0, epsilon = 1.0e-3);
        assert!(ramp.on_slope(40.0));
        assert!(!ramp.on_slope(30.0));
        assert!(!ramp.on_slope(20.0));
    }

    #[test]
    fn slope_direction_follows_the_surface() {
        let contact = GroundContact::from_hit(Some(RayHit {
            normal: Vec3::new(0.0, 1.0, 1.0).normalize(),
            distance: 1.0,
        }));
        // Walking toward -Z climbs this ramp.
        let dir = contact.slope_move_direction(Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(dir.norm(), 1.0, epsilon = 1.0e-6);
        assert!(dir.y > 0.0);
        assert_relative_eq!(dir.dot(&contact.normal().unwrap_or_else(Vec3::zeros)), 0.0, epsilon = 1.0e-6);

        assert_eq!(contact.slope_move_direction(Vec3::zeros()), Vec3::zeros());
    }

    #[test]
    fn mask_filters_hits() {
        let mut probe = PlaneProbe::flat();
        probe.mask = LayerMask::from_flags(&[Layer::Props]);
        let contact = GroundContact::probe(
            &probe,
            Vec3::new(0.0, 1.0, 0.0),
            1.3,
            LayerMask::from_flags(&[Layer::Ground]),
        );
        assert!(!contact.grounded());
    }
}
