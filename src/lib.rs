//! Optical Flat - light path through a parallel plate at 45° incidence
//!
//! Core modules:
//! - `optics`: Pure geometry engine (Snell's law, surface intersections, lateral shift)
//! - `controls`: Paired slider/number input handling
//! - `renderer`: WebGPU rendering of the plate, rays and shift annotation
//! - `settings`: Rendering scale, viewport and placement configuration

pub mod controls;
pub mod optics;
pub mod renderer;
pub mod settings;

pub use optics::{IncidenceGeometry, PlateConfig, RayPath, SceneConfig, compute_ray_path};
pub use settings::Settings;

/// Optical and presentation constants
pub mod consts {
    /// Fixed angle of incidence at the first surface (degrees)
    pub const INCIDENCE_ANGLE_DEG: f64 = 45.0;

    /// Plate material is never less dense than the surrounding air
    pub const MIN_REFRACTIVE_INDEX: f64 = 1.0;
    /// Plate thickness bounds (mm)
    pub const MIN_THICKNESS_MM: f64 = 0.3;
    pub const MAX_THICKNESS_MM: f64 = 10.0;

    /// Default rendering scale (pixels per millimeter)
    pub const DEFAULT_PX_PER_MM: f64 = 6.0;

    /// Floor for the normal component of the internal direction
    pub const DENOM_EPSILON: f64 = 1e-6;

    /// Default canvas size in pixels
    pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 500.0;

    /// Initial control values
    pub const DEFAULT_REFRACTIVE_INDEX: f64 = 1.5;
    pub const DEFAULT_THICKNESS_MM: f64 = 5.0;
}

/// Sign of a value, treating zero as positive
#[inline]
pub fn sign_or_positive(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Format a lateral shift for display (three decimals, mm suffix)
pub fn format_shift_mm(shift_mm: f64) -> String {
    // Avoid printing "-0.000" for tiny negative rounding noise
    let rounded = (shift_mm * 1000.0).round() / 1000.0;
    let value = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{value:.3} mm")
}
