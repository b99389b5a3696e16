//! Shape generation for 2D primitives
//!
//! Everything is tessellated into triangle lists in scene pixels.

use glam::Vec2;

use super::vertex::Vertex;

/// Head half-width as a fraction of head length
const HEAD_SPREAD: f32 = 0.6;

/// Single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Filled quad from four corners in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    let mut vertices = triangle(a, b, c, color);
    vertices.extend(triangle(a, c, d, color));
    vertices
}

/// Straight line of the given width (a thin quad); empty if degenerate
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    quad([from + perp, to + perp, to - perp, from - perp], color)
}

/// Closed outline through `points`
pub fn outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        vertices.extend(line(p, next, width, color));
    }
    vertices
}

/// Dashed line: `dash` on, `gap` off, starting with a dash at `from`
pub fn dashed_line(
    from: Vec2,
    to: Vec2,
    width: f32,
    dash: f32,
    gap: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let total = (to - from).length();
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO || dash <= 0.0 {
        return Vec::new();
    }

    let period = dash + gap.max(0.0);
    let mut vertices = Vec::new();
    let mut t = 0.0;
    while t < total {
        let end = (t + dash).min(total);
        vertices.extend(line(from + dir * t, from + dir * end, width, color));
        t += period;
    }
    vertices
}

/// Triangular arrow head with its tip at `tip`, pointing along `dir`
pub fn arrow_head(tip: Vec2, dir: Vec2, head: f32, color: [f32; 4]) -> Vec<Vertex> {
    let u = dir.normalize_or_zero();
    let back = tip - u * head;
    let side = Vec2::new(-u.y, u.x) * (head * HEAD_SPREAD);
    triangle(tip, back + side, back - side, color)
}

/// Line with an arrow head at `to`
pub fn arrow(from: Vec2, to: Vec2, width: f32, head: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = line(from, to, width, color);
    vertices.extend(arrow_head(to, to - from, head, color));
    vertices
}

/// Line with arrow heads at both ends
pub fn double_arrow(a: Vec2, b: Vec2, width: f32, head: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = line(a, b, width, color);
    vertices.extend(arrow_head(a, a - b, head, color));
    vertices.extend(arrow_head(b, b - a, head, color));
    vertices
}
