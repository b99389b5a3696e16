//! Fixed incidence geometry and Snell's law
//!
//! Scene coordinates are canvas pixels: +x to the right, +y downward.
//! The incoming ray travels straight down and the plate is tilted so the
//! first surface normal sits at 45° to it.

use glam::DVec2;

use crate::consts::{INCIDENCE_ANGLE_DEG, MIN_REFRACTIVE_INDEX};
use crate::sign_or_positive;

/// The fixed optical setup, derived once and never mutated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidenceGeometry {
    /// Incoming ray direction (unit, straight down)
    pub incoming: DVec2,
    /// Surface normal, pointing into the plate
    pub n_hat: DVec2,
    /// Tangential unit vector along the surfaces (`n_hat` rotated -90°)
    pub t_hat: DVec2,
    /// Angle of incidence (radians)
    pub incidence_angle: f64,
}

impl Default for IncidenceGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl IncidenceGeometry {
    pub fn new() -> Self {
        let incidence_angle = INCIDENCE_ANGLE_DEG.to_radians();
        // Downward axis rotated +45° toward +x
        let n_hat = DVec2::new(incidence_angle.sin(), incidence_angle.cos()).normalize_or_zero();
        let t_hat = DVec2::new(-n_hat.y, n_hat.x);

        Self {
            incoming: DVec2::Y,
            n_hat,
            t_hat,
            incidence_angle,
        }
    }

    /// Lateral sense of the incoming ray along the surface (+1 or -1)
    #[inline]
    pub fn tangential_sign(&self) -> f64 {
        sign_or_positive(self.incoming.dot(self.t_hat))
    }

    /// Refraction angle inside the plate (radians)
    ///
    /// `sin(r) = sin(i) / n`, with `n` floored at 1.0 and the `asin`
    /// argument capped at 1.0.
    pub fn refraction_angle(&self, refractive_index: f64) -> f64 {
        let n = refractive_index.max(MIN_REFRACTIVE_INDEX);
        let sin_r = (self.incidence_angle.sin() / n).min(1.0);
        sin_r.asin()
    }

    /// Unit direction of the ray inside the plate
    ///
    /// Bends toward the normal but keeps the incoming ray's lateral sense.
    pub fn internal_direction(&self, refractive_index: f64) -> DVec2 {
        let r = self.refraction_angle(refractive_index);
        let tangential = self.t_hat * (self.tangential_sign() * r.sin());
        let normal = self.n_hat * r.cos();
        (tangential + normal).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_basis_is_orthonormal() {
        let g = IncidenceGeometry::new();
        assert!((g.n_hat.length() - 1.0).abs() < EPS);
        assert!((g.t_hat.length() - 1.0).abs() < EPS);
        assert!(g.n_hat.dot(g.t_hat).abs() < EPS);
    }

    #[test]
    fn test_t_hat_is_n_hat_rotated() {
        let g = IncidenceGeometry::new();
        assert_eq!(g.t_hat, DVec2::new(-g.n_hat.y, g.n_hat.x));
    }

    #[test]
    fn test_incidence_is_45_degrees() {
        let g = IncidenceGeometry::new();
        assert!((g.incidence_angle - FRAC_PI_4).abs() < EPS);
        // Angle between incoming ray and normal
        let angle = g.incoming.dot(g.n_hat).acos();
        assert!((angle - FRAC_PI_4).abs() < 1e-9);
    }

    #[test]
    fn test_refraction_angle_at_unit_index() {
        let g = IncidenceGeometry::new();
        assert!((g.refraction_angle(1.0) - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_refraction_angle_glass() {
        let g = IncidenceGeometry::new();
        let r = g.refraction_angle(1.5).to_degrees();
        assert!((r - 28.126).abs() < 0.001, "got {r}");
    }

    #[test]
    fn test_refraction_angle_never_exceeds_incidence() {
        let g = IncidenceGeometry::new();
        for i in 0..200 {
            let n = 1.0 + i as f64 * 0.05;
            assert!(g.refraction_angle(n) <= g.incidence_angle + EPS);
        }
    }

    #[test]
    fn test_sub_unity_index_is_floored() {
        let g = IncidenceGeometry::new();
        assert_eq!(g.refraction_angle(0.2), g.refraction_angle(1.0));
        assert_eq!(g.refraction_angle(-3.0), g.refraction_angle(1.0));
        assert!(g.refraction_angle(f64::NAN).is_finite());
    }

    #[test]
    fn test_no_bending_at_unit_index() {
        let g = IncidenceGeometry::new();
        let d = g.internal_direction(1.0);
        assert!((d - g.incoming).length() < 1e-12);
    }

    #[test]
    fn test_internal_direction_keeps_lateral_sense() {
        let g = IncidenceGeometry::new();
        for n in [1.0, 1.2, 1.5, 2.4, 10.0] {
            let d = g.internal_direction(n);
            assert!(d.dot(g.t_hat) * g.incoming.dot(g.t_hat) >= 0.0);
            // Travels into the plate
            assert!(d.dot(g.n_hat) > 0.0);
        }
    }
}
