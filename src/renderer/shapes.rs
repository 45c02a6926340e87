//! Shape generation for 2D primitives
//!
//! Everything renders as triangle lists in world space; the pipeline maps
//! world coordinates to NDC at upload time.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned rectangle from its top-left corner
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let a = pos;
    let b = pos + Vec2::new(size.x, 0.0);
    let c = pos + size;
    let d = pos + Vec2::new(0.0, size.y);

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Rectangle rotated about its own center
pub fn rotated_rect(center: Vec2, size: Vec2, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (sin, cos) = angle.sin_cos();
    let half = size / 2.0;

    let corner = |dx: f32, dy: f32| {
        let local = Vec2::new(dx * half.x, dy * half.y);
        let rotated = Vec2::new(
            local.x * cos - local.y * sin,
            local.x * sin + local.y * cos,
        );
        center + rotated
    };

    let a = corner(-1.0, -1.0);
    let b = corner(1.0, -1.0);
    let c = corner(1.0, 1.0);
    let d = corner(-1.0, 1.0);

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Filled ellipse as a triangle fan
pub fn ellipse(center: Vec2, rx: f32, ry: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + rx * theta1.cos(),
            center.y + ry * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + rx * theta2.cos(),
            center.y + ry * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, radius, radius, color, segments)
}
