//! Scene assembly
//!
//! Turns one [`RayPath`] into a vertex list plus the text overlays. Sizes
//! are in pixels at the default scale and grow with `px_per_mm`.

use glam::{DVec2, Vec2};

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::DEFAULT_PX_PER_MM;
use crate::optics::{IncidenceGeometry, PlateSurfaces, RayPath, SceneConfig};

/// Plate quad half-length along the surface
const PLATE_HALF_LENGTH: f64 = 2000.0;
const PLATE_EDGE_WIDTH: f32 = 1.0;

const RAY_WIDTH: f32 = 2.0;
const RAY_HEAD: f32 = 8.0;

/// Normal tick half-length
const NORMAL_HALF_LENGTH: f32 = 16.0;
const NORMAL_WIDTH: f32 = 1.0;

const SHIFT_WIDTH: f32 = 1.8;
const SHIFT_HEAD: f32 = 8.0;
const SHIFT_DASH: f32 = 5.0;
const SHIFT_GAP: f32 = 4.0;
/// Measurement line sits this far below the exit point...
const SHIFT_DROP: f64 = 42.0;
/// ...but no higher than this and no closer to the bottom than `SHIFT_BOTTOM_MARGIN`
const SHIFT_MIN_Y: f64 = 48.0;
const SHIFT_BOTTOM_MARGIN: f64 = 24.0;
/// Gap between the measurement line and the label baseline
const LABEL_LIFT: f32 = 7.0;

/// Marker size multiplier is kept within these bounds
const MARKER_SCALE_RANGE: (f32, f32) = (0.5, 3.0);

/// Text placed over the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftLabel {
    pub text: String,
    /// Bottom-center of the text, in scene pixels
    pub anchor: Vec2,
}

/// Everything drawn for one recompute
#[derive(Debug, Clone)]
pub struct SceneFrame {
    pub vertices: Vec<Vertex>,
    pub label: ShiftLabel,
    /// `Light Shift: <value> mm`
    pub readout: String,
}

/// Marker size multiplier for a scene scale (1.0 at the default scale)
pub fn marker_scale(scene: &SceneConfig) -> f32 {
    let (lo, hi) = MARKER_SCALE_RANGE;
    ((scene.px_per_mm() / DEFAULT_PX_PER_MM) as f32).clamp(lo, hi)
}

/// Height of the shift measurement line
pub fn measurement_y(exit_y: f64, viewport_height: f64) -> f64 {
    // Not `clamp`: on tiny viewports the bottom bound may be above the top one
    (exit_y + SHIFT_DROP)
        .max(SHIFT_MIN_Y)
        .min(viewport_height - SHIFT_BOTTOM_MARGIN)
}

#[inline]
fn px(p: DVec2) -> Vec2 {
    p.as_vec2()
}

/// Build the full scene for one ray path
pub fn build_scene(geometry: &IncidenceGeometry, path: &RayPath, scene: &SceneConfig) -> SceneFrame {
    let k = marker_scale(scene);
    let mut vertices = Vec::with_capacity(256);

    // Plate
    let corners = path.surfaces.outline(geometry, PLATE_HALF_LENGTH).map(px);
    vertices.extend(shapes::quad(corners, colors::PLATE_FILL));
    vertices.extend(shapes::outline(&corners, PLATE_EDGE_WIDTH, colors::PLATE_EDGE));

    // Rays
    let head = RAY_HEAD * k;
    for (from, to) in [
        (path.source_point, path.entry_point),
        (path.entry_point, path.exit_point),
        (path.exit_point, path.sink_point),
    ] {
        vertices.extend(shapes::arrow(px(from), px(to), RAY_WIDTH, head, colors::RAY));
    }

    // Surface normals
    let n_hat = px(geometry.n_hat);
    for offset in [path.surfaces.near, path.surfaces.far] {
        let foot = px(PlateSurfaces::foot_point(geometry, offset));
        let half = n_hat * (NORMAL_HALF_LENGTH * k);
        vertices.extend(shapes::line(
            foot - half,
            foot + half,
            NORMAL_WIDTH,
            colors::NORMAL_MARKER,
        ));
    }

    // Shift measurement
    let y = measurement_y(path.exit_point.y, scene.viewport().height) as f32;
    let x_in = path.entry_point.x as f32;
    let x_out = path.exit_point.x as f32;

    for (x, y_from) in [
        (x_in, path.entry_point.y as f32),
        (x_out, path.exit_point.y as f32),
    ] {
        vertices.extend(shapes::dashed_line(
            Vec2::new(x, y_from),
            Vec2::new(x, y),
            SHIFT_WIDTH,
            SHIFT_DASH,
            SHIFT_GAP,
            colors::SHIFT_MARKER,
        ));
    }
    vertices.extend(shapes::double_arrow(
        Vec2::new(x_in, y),
        Vec2::new(x_out, y),
        SHIFT_WIDTH,
        SHIFT_HEAD * k,
        colors::SHIFT_MARKER,
    ));

    SceneFrame {
        vertices,
        label: ShiftLabel {
            text: path.label(),
            anchor: Vec2::new((x_in + x_out) * 0.5, y - LABEL_LIFT),
        },
        readout: path.readout(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{PlacementPolicy, PlateConfig, Viewport, compute_ray_path};

    fn scene(px_per_mm: f64) -> SceneConfig {
        SceneConfig::new(Viewport::new(800.0, 500.0), px_per_mm, PlacementPolicy::default())
    }

    fn frame(n: f64, t: f64) -> (RayPath, SceneFrame) {
        let g = IncidenceGeometry::new();
        let s = scene(6.0);
        let path = compute_ray_path(&g, PlateConfig::new(n, t), &s);
        let frame = build_scene(&g, &path, &s);
        (path, frame)
    }

    #[test]
    fn test_measurement_y_bounds() {
        assert_eq!(measurement_y(100.0, 500.0), 142.0);
        assert_eq!(measurement_y(0.0, 500.0), 48.0);
        assert_eq!(measurement_y(470.0, 500.0), 476.0);
        // Bottom bound wins on tiny viewports
        assert_eq!(measurement_y(0.0, 40.0), 16.0);
    }

    #[test]
    fn test_marker_scale() {
        assert_eq!(marker_scale(&scene(6.0)), 1.0);
        assert_eq!(marker_scale(&scene(12.0)), 2.0);
        assert_eq!(marker_scale(&scene(100.0)), 3.0);
        assert_eq!(marker_scale(&scene(1.0)), 0.5);
    }

    #[test]
    fn test_frame_texts() {
        let (_, frame) = frame(1.5, 5.0);
        assert_eq!(frame.readout, "Light Shift: 1.646 mm");
        assert_eq!(frame.label.text, "Shift = 1.646 mm");
    }

    #[test]
    fn test_label_centered_between_rays() {
        let (path, frame) = frame(1.5, 5.0);
        let mid = ((path.entry_point.x + path.exit_point.x) * 0.5) as f32;
        assert!((frame.label.anchor.x - mid).abs() < 1e-3);
        let y = measurement_y(path.exit_point.y, 500.0) as f32;
        assert!((frame.label.anchor.y - (y - LABEL_LIFT)).abs() < 1e-3);
    }

    #[test]
    fn test_vertices_form_triangles() {
        let (_, frame) = frame(1.5, 5.0);
        assert!(!frame.vertices.is_empty());
        assert_eq!(frame.vertices.len() % 3, 0);
        assert!(frame
            .vertices
            .iter()
            .all(|v| v.position.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn test_ray_color_present() {
        let (_, frame) = frame(1.33, 2.0);
        assert!(frame.vertices.iter().any(|v| v.color == colors::RAY));
        assert!(frame.vertices.iter().any(|v| v.color == colors::SHIFT_MARKER));
        assert!(frame.vertices.iter().any(|v| v.color == colors::NORMAL_MARKER));
    }
}
