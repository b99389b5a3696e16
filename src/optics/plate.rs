//! Plate configuration and surface planes
//!
//! Each surface is the set of points `p` with `n_hat · p = c`.

use glam::DVec2;
use serde::Serialize;

use super::geometry::IncidenceGeometry;
use crate::consts::{MAX_THICKNESS_MM, MIN_REFRACTIVE_INDEX, MIN_THICKNESS_MM};

/// User-controlled plate parameters, always within their valid ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlateConfig {
    refractive_index: f64,
    thickness_mm: f64,
}

impl PlateConfig {
    /// Clamp raw inputs into range
    ///
    /// The index is floored at 1.0 and the thickness clamped to
    /// [0.3, 10.0] mm. NaN falls to the lower bound.
    pub fn new(refractive_index: f64, thickness_mm: f64) -> Self {
        Self {
            refractive_index: refractive_index.max(MIN_REFRACTIVE_INDEX),
            thickness_mm: thickness_mm.max(MIN_THICKNESS_MM).min(MAX_THICKNESS_MM),
        }
    }

    #[inline]
    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }

    #[inline]
    pub fn thickness_mm(&self) -> f64 {
        self.thickness_mm
    }

    /// Surface separation in scene units
    #[inline]
    pub fn thickness_px(&self, px_per_mm: f64) -> f64 {
        self.thickness_mm * px_per_mm
    }
}

/// Offsets of the near (`c1`) and far (`c2`) surface planes along `n_hat`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlateSurfaces {
    pub near: f64,
    pub far: f64,
}

impl PlateSurfaces {
    /// Place both surfaces symmetrically about `center`
    pub fn centered(geometry: &IncidenceGeometry, center: DVec2, thickness_px: f64) -> Self {
        let mid = center.dot(geometry.n_hat);
        Self {
            near: mid - thickness_px * 0.5,
            far: mid + thickness_px * 0.5,
        }
    }

    /// Distance between the planes along `n_hat`
    #[inline]
    pub fn separation(&self) -> f64 {
        self.far - self.near
    }

    /// Point on a plane closest to the scene origin
    #[inline]
    pub fn foot_point(geometry: &IncidenceGeometry, offset: f64) -> DVec2 {
        geometry.n_hat * offset
    }

    /// Corners of the plate quad, extending `half_length` each way along `t_hat`
    ///
    /// Order: near-, near+, far+, far-.
    pub fn outline(&self, geometry: &IncidenceGeometry, half_length: f64) -> [DVec2; 4] {
        let p1 = Self::foot_point(geometry, self.near);
        let p2 = Self::foot_point(geometry, self.far);
        let along = geometry.t_hat * half_length;
        [p1 - along, p1 + along, p2 + along, p2 - along]
    }
}
