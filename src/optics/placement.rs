//! Where the incoming ray meets the near surface
//!
//! Purely presentational: the ray's horizontal position has no effect on
//! the shift, it only decides whether the entry point is visible.
//!
//! Two steps:
//! 1. Default: the ray starts at a fixed fraction of the viewport width.
//! 2. Fallback: if that entry lands within `edge_margin_px` of the top or
//!    bottom edge, pick the x that puts the entry at a fixed fraction of the
//!    viewport height instead.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::engine::Viewport;
use super::geometry::IncidenceGeometry;

/// Which placement step produced the entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Placement {
    Default,
    Fallback,
}

/// Entry point on the near surface and how it was chosen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryPoint {
    pub point: DVec2,
    pub placement: Placement,
}

/// Tunable entry placement policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementPolicy {
    /// Default incoming x as a fraction of viewport width
    pub default_x_fraction: f64,
    /// Minimum distance of the entry point from the top/bottom edge (px)
    pub edge_margin_px: f64,
    /// Target entry y as a fraction of viewport height when falling back
    pub fallback_y_fraction: f64,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            default_x_fraction: 0.35,
            edge_margin_px: 20.0,
            fallback_y_fraction: 0.2,
        }
    }
}

impl PlacementPolicy {
    /// Whether an entry height is far enough from the viewport edges
    #[inline]
    pub fn is_visible(&self, y: f64, viewport: Viewport) -> bool {
        y >= self.edge_margin_px && y <= viewport.height - self.edge_margin_px
    }

    /// The default step alone
    pub fn default_entry(&self, geometry: &IncidenceGeometry, near: f64, viewport: Viewport) -> DVec2 {
        let x = viewport.width * self.default_x_fraction;
        DVec2::new(x, y_on_plane(geometry, near, x))
    }

    /// The fallback step alone
    pub fn fallback_entry(&self, geometry: &IncidenceGeometry, near: f64, viewport: Viewport) -> DVec2 {
        let target_y = viewport.height * self.fallback_y_fraction;
        let x = x_on_plane(geometry, near, target_y);
        DVec2::new(x, y_on_plane(geometry, near, x))
    }

    /// Choose the entry point on the plane `n_hat · p = near`
    pub fn place(&self, geometry: &IncidenceGeometry, near: f64, viewport: Viewport) -> EntryPoint {
        let point = self.default_entry(geometry, near, viewport);
        if self.is_visible(point.y, viewport) {
            return EntryPoint {
                point,
                placement: Placement::Default,
            };
        }

        EntryPoint {
            point: self.fallback_entry(geometry, near, viewport),
            placement: Placement::Fallback,
        }
    }
}

/// y where the vertical line at `x` crosses the plane `n_hat · p = c`
#[inline]
fn y_on_plane(geometry: &IncidenceGeometry, c: f64, x: f64) -> f64 {
    (c - geometry.n_hat.x * x) / geometry.n_hat.y
}

/// x where the horizontal line at `y` crosses the plane `n_hat · p = c`
#[inline]
fn x_on_plane(geometry: &IncidenceGeometry, c: f64, y: f64) -> f64 {
    (c - geometry.n_hat.y * y) / geometry.n_hat.x
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn near_offset(g: &IncidenceGeometry, viewport: Viewport, thickness_px: f64) -> f64 {
        viewport.center().dot(g.n_hat) - thickness_px * 0.5
    }

    #[test]
    fn test_default_placement_on_standard_canvas() {
        let g = IncidenceGeometry::new();
        let viewport = Viewport::new(800.0, 500.0);
        let policy = PlacementPolicy::default();
        let near = near_offset(&g, viewport, 30.0);

        let entry = policy.place(&g, near, viewport);
        assert_eq!(entry.placement, Placement::Default);
        assert!((entry.point.x - 280.0).abs() < 1e-9);
        assert!((entry.point.dot(g.n_hat) - near).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_on_wide_short_canvas() {
        let g = IncidenceGeometry::new();
        let viewport = Viewport::new(2000.0, 300.0);
        let policy = PlacementPolicy::default();
        let near = near_offset(&g, viewport, 30.0);

        // Default would put the entry below the canvas
        let default = policy.default_entry(&g, near, viewport);
        assert!(!policy.is_visible(default.y, viewport));

        let entry = policy.place(&g, near, viewport);
        assert_eq!(entry.placement, Placement::Fallback);
        assert!((entry.point.y - 60.0).abs() < 1e-9);
        assert!((entry.point.dot(g.n_hat) - near).abs() < 1e-9);
    }

    #[test]
    fn test_margin_is_tunable() {
        let g = IncidenceGeometry::new();
        let viewport = Viewport::new(800.0, 500.0);
        let near = near_offset(&g, viewport, 30.0);
        // Margin so large nothing counts as visible
        let policy = PlacementPolicy {
            edge_margin_px: 400.0,
            ..Default::default()
        };
        assert_eq!(policy.place(&g, near, viewport).placement, Placement::Fallback);
    }

    #[test]
    fn test_policy_from_partial_json() {
        let policy: PlacementPolicy = serde_json::from_str(r#"{"edge_margin_px": 5.0}"#).unwrap();
        assert_eq!(policy.edge_margin_px, 5.0);
        assert_eq!(policy.default_x_fraction, 0.35);
        assert_eq!(policy.fallback_y_fraction, 0.2);
    }

    proptest! {
        #[test]
        fn prop_placement_contract(
            width in 100.0f64..4000.0,
            height in 100.0f64..4000.0,
            thickness_px in 0.0f64..400.0,
            default_x_fraction in 0.0f64..1.0,
            edge_margin_px in 0.0f64..60.0,
            fallback_y_fraction in 0.0f64..1.0,
        ) {
            let g = IncidenceGeometry::new();
            let viewport = Viewport::new(width, height);
            let policy = PlacementPolicy { default_x_fraction, edge_margin_px, fallback_y_fraction };
            let near = near_offset(&g, viewport, thickness_px);
            let tol = 1e-9 * width.max(height);

            let entry = policy.place(&g, near, viewport);
            prop_assert!((entry.point.dot(g.n_hat) - near).abs() < tol);
            match entry.placement {
                Placement::Default => {
                    prop_assert!(policy.is_visible(entry.point.y, viewport));
                    prop_assert!((entry.point.x - width * default_x_fraction).abs() < tol);
                }
                Placement::Fallback => {
                    let default = policy.default_entry(&g, near, viewport);
                    prop_assert!(!policy.is_visible(default.y, viewport));
                    prop_assert!((entry.point.y - height * fallback_y_fraction).abs() < tol);
                }
            }
        }
    }
}
