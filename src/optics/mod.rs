//! Optical geometry engine
//!
//! Pure functions of (refractive index, thickness) producing the ray path
//! through a parallel plate. This module must stay free of I/O:
//! - No DOM or GPU access
//! - No ambient state, every input is passed explicitly
//! - Identical inputs give bit-identical output

pub mod engine;
pub mod geometry;
pub mod placement;
pub mod plate;

pub use engine::{RayPath, SceneConfig, Viewport, compute_ray_path};
pub use geometry::IncidenceGeometry;
pub use placement::{EntryPoint, Placement, PlacementPolicy};
pub use plate::{PlateConfig, PlateSurfaces};
