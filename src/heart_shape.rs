//! The heart outline shared by every heart in the field.
//!
//! The outline lives in a 24x24 viewbox with canvas orientation (y down), described as
//! six cubic Bézier segments followed by a short closing line back to the bottom tip.

use bevy::asset::RenderAssetUsages;
use bevy::math::Vec2;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;

pub const HEART_VIEWBOX: f32 = 24.0;

const HEART_TIP: Vec2 = Vec2::new(12.0, 21.35);

/// `(control 1, control 2, end)` of each cubic segment, starting from `HEART_TIP`.
const HEART_CURVES: [[Vec2; 3]; 6] = [
    [Vec2::new(5.4, 15.36), Vec2::new(2.0, 12.28), Vec2::new(2.0, 8.5)],
    [Vec2::new(2.0, 5.42), Vec2::new(4.42, 3.0), Vec2::new(7.5, 3.0)],
    [Vec2::new(9.24, 3.0), Vec2::new(10.91, 3.81), Vec2::new(12.0, 5.09)],
    [Vec2::new(13.09, 3.81), Vec2::new(14.76, 3.0), Vec2::new(16.5, 3.0)],
    [Vec2::new(19.58, 3.0), Vec2::new(22.0, 5.42), Vec2::new(22.0, 8.5)],
    [Vec2::new(22.0, 12.28), Vec2::new(18.6, 15.36), Vec2::new(13.55, 20.04)],
];

/// Every ray from here crosses the outline exactly once, so the fill can be a fan.
const FAN_CENTER: Vec2 = Vec2::new(12.0, 11.0);

pub const STEPS_PER_CURVE: usize = 12;

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Flattens the outline into a closed polygon (the first point is not repeated at the end).
pub fn outline(steps_per_curve: usize) -> Vec<Vec2> {
    let steps = steps_per_curve.max(1);
    let mut points = Vec::with_capacity(HEART_CURVES.len() * steps + 1);
    points.push(HEART_TIP);

    let mut start = HEART_TIP;
    for [c1, c2, end] in HEART_CURVES {
        for step in 1..=steps {
            points.push(cubic(start, c1, c2, end, step as f32 / steps as f32));
        }
        start = end;
    }
    // The closing line segment back to the tip is implied by the polygon being closed.
    points
}

/// Converts a viewbox point to mesh space: centred on the origin, y up.
fn to_mesh_space(point: Vec2) -> Vec2 {
    let half = HEART_VIEWBOX / 2.0;
    Vec2::new(point.x - half, half - point.y)
}

/// Triangulates the outline as a fan. Returns mesh-space vertices (centre first) and
/// counter-clockwise triangle indices.
pub fn triangulate(outline: &[Vec2]) -> (Vec<Vec2>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(outline.len() + 1);
    vertices.push(to_mesh_space(FAN_CENTER));
    vertices.extend(outline.iter().copied().map(to_mesh_space));

    let n = outline.len() as u32;
    let mut indices = Vec::with_capacity(outline.len() * 3);
    for i in 0..n {
        let a = 1 + i;
        let b = 1 + (i + 1) % n;
        // The outline runs clockwise once flipped to y-up, so swap to get CCW triangles.
        indices.extend_from_slice(&[0, b, a]);
    }
    (vertices, indices)
}

/// A unit heart mesh, 24 units across, to be scaled per heart by `size / 24`.
pub fn heart_mesh() -> Mesh {
    let (vertices, indices) = triangulate(&outline(STEPS_PER_CURVE));
    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [v.x / HEART_VIEWBOX + 0.5, 0.5 - v.y / HEART_VIEWBOX])
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_starts_at_tip_and_visits_every_segment_end() {
        let points = outline(STEPS_PER_CURVE);
        assert_eq!(points.len(), HEART_CURVES.len() * STEPS_PER_CURVE + 1);
        assert_eq!(points[0], HEART_TIP);
        for (i, [_, _, end]) in HEART_CURVES.iter().enumerate() {
            let p = points[(i + 1) * STEPS_PER_CURVE];
            assert!((p - *end).length() < 1e-4, "segment {i} ends at {p}, expected {end}");
        }
    }

    #[test]
    fn outline_fits_in_viewbox() {
        for p in outline(32) {
            assert!(p.x >= 0.0 && p.x <= HEART_VIEWBOX);
            assert!(p.y >= 0.0 && p.y <= HEART_VIEWBOX);
        }
    }

    #[test]
    fn fan_triangles_are_counter_clockwise() {
        let (vertices, indices) = triangulate(&outline(STEPS_PER_CURVE));
        assert_eq!(indices.len() % 3, 0);
        for tri in indices.chunks(3) {
            let a = vertices[tri[0] as usize];
            let b = vertices[tri[1] as usize];
            let c = vertices[tri[2] as usize];
            let area = (b - a).perp_dot(c - a);
            assert!(area > 0.0, "triangle {tri:?} has area {area}");
        }
    }

    #[test]
    fn tip_points_down_in_mesh_space() {
        let (vertices, _) = triangulate(&outline(STEPS_PER_CURVE));
        let tip = vertices[1];
        assert!(tip.y < 0.0);
        assert!(vertices.iter().skip(1).all(|v| v.y >= tip.y - 1e-4));
    }
}
