//! Ray path computation
//!
//! Given a clamped [`PlateConfig`] and the scene framing, trace the ray
//! from the top of the viewport through both plate surfaces and out the
//! bottom, and measure how far the plate displaced it.

use glam::DVec2;
use serde::Serialize;

use super::geometry::IncidenceGeometry;
use super::placement::{Placement, PlacementPolicy};
use super::plate::{PlateConfig, PlateSurfaces};
use crate::consts::{DEFAULT_PX_PER_MM, DENOM_EPSILON, MAX_THICKNESS_MM};
use crate::format_shift_mm;

/// Visible scene size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Framing shared by the engine and the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    viewport: Viewport,
    px_per_mm: f64,
    placement: PlacementPolicy,
}

impl SceneConfig {
    /// A non-positive or non-finite scale is replaced by the default, as is
    /// one that overflows at the thickest plate
    pub fn new(viewport: Viewport, px_per_mm: f64, placement: PlacementPolicy) -> Self {
        let valid = px_per_mm > 0.0 && (px_per_mm * MAX_THICKNESS_MM).is_finite();
        let px_per_mm = if valid {
            px_per_mm
        } else {
            log::warn!("Invalid scale {px_per_mm} px/mm, using {DEFAULT_PX_PER_MM}");
            DEFAULT_PX_PER_MM
        };

        Self {
            viewport,
            px_per_mm,
            placement,
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn px_per_mm(&self) -> f64 {
        self.px_per_mm
    }

    #[inline]
    pub fn placement(&self) -> &PlacementPolicy {
        &self.placement
    }

    /// Same framing, different canvas size
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}

/// Everything needed to draw one configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RayPath {
    /// Inputs actually used, after clamping
    pub plate: PlateConfig,
    pub surfaces: PlateSurfaces,
    pub placement: Placement,
    /// Where the incoming ray enters the viewport (top edge)
    pub source_point: DVec2,
    pub entry_point: DVec2,
    pub exit_point: DVec2,
    /// Where the outgoing ray leaves the viewport (bottom edge)
    pub sink_point: DVec2,
    pub internal_direction: DVec2,
    /// Refraction angle inside the plate (radians)
    pub refraction_angle: f64,
    pub lateral_shift_mm: f64,
}

impl RayPath {
    /// Text for the readout element
    pub fn readout(&self) -> String {
        format!("Light Shift: {}", format_shift_mm(self.lateral_shift_mm))
    }

    /// Text for the in-scene measurement label
    pub fn label(&self) -> String {
        format!("Shift = {}", format_shift_mm(self.lateral_shift_mm))
    }
}

/// Trace the ray through the plate
pub fn compute_ray_path(
    geometry: &IncidenceGeometry,
    plate: PlateConfig,
    scene: &SceneConfig,
) -> RayPath {
    let viewport = scene.viewport();
    let thickness_px = plate.thickness_px(scene.px_per_mm());
    let surfaces = PlateSurfaces::centered(geometry, viewport.center(), thickness_px);

    let entry = scene.placement().place(geometry, surfaces.near, viewport);
    let entry_point = entry.point;
    let source_point = DVec2::new(entry_point.x, 0.0);

    let refraction_angle = geometry.refraction_angle(plate.refractive_index());
    let internal_direction = geometry.internal_direction(plate.refractive_index());

    // Travel along the internal direction until n_hat · p = far
    let denom = internal_direction.dot(geometry.n_hat).max(DENOM_EPSILON);
    let travel = (surfaces.far - entry_point.dot(geometry.n_hat)) / denom;
    let exit_point = entry_point + internal_direction * travel;

    // Same medium on both sides: outgoing ray is parallel to the incoming one
    let sink_point = DVec2::new(exit_point.x, viewport.height);

    // Incoming ray is vertical, so the horizontal offset is the lateral shift
    let lateral_shift_mm = (exit_point.x - entry_point.x) / scene.px_per_mm();

    log::debug!(
        "n={:.4} t={:.2}mm r={:.3}° placement={:?} shift={:.4}mm",
        plate.refractive_index(),
        plate.thickness_mm(),
        refraction_angle.to_degrees(),
        entry.placement,
        lateral_shift_mm
    );

    RayPath {
        plate,
        surfaces,
        placement: entry.placement,
        source_point,
        entry_point,
        exit_point,
        sink_point,
        internal_direction,
        refraction_angle,
        lateral_shift_mm,
    }
}
