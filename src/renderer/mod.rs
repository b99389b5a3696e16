//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into a flat-colored triangle list and
//! drawn in one pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState};
pub use scene::{SceneFrame, ShiftLabel, build_scene};
pub use vertex::Vertex;
