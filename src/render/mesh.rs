//! Procedural 2D mesh builders for the backdrop layers.
//!
//! Everything is built in world units around the origin, with vertex
//! colours where a layer needs a gradient.

use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

#[derive(Default)]
struct MeshData {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
}

impl MeshData {
    fn vertex(&mut self, p: Vec2, color: Color) -> u32 {
        let l = color.to_linear();
        self.positions.push([p.x, p.y, 0.0]);
        self.colors.push([l.red, l.green, l.blue, l.alpha]);
        (self.positions.len() - 1) as u32
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    fn into_mesh(self) -> Mesh {
        let count = self.positions.len();
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![[0.0, 0.0, 1.0]; count])
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, vec![[0.0, 0.0]; count])
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors)
        .with_inserted_indices(Indices::U32(self.indices))
    }
}

/// Axis-aligned rectangle centred on the origin, `top` colour along the
/// upper edge blending to `bottom` along the lower one.
pub fn gradient_quad(size: Vec2, top: Color, bottom: Color) -> Mesh {
    let h = size * 0.5;
    let mut m = MeshData::default();
    let tl = m.vertex(Vec2::new(-h.x, h.y), top);
    let tr = m.vertex(Vec2::new(h.x, h.y), top);
    let br = m.vertex(Vec2::new(h.x, -h.y), bottom);
    let bl = m.vertex(Vec2::new(-h.x, -h.y), bottom);
    m.triangle(tl, bl, br);
    m.triangle(tl, br, tr);
    m.into_mesh()
}

/// Point on a cubic Bezier curve at `t` in [0,1].
pub fn cubic_bezier(p: [Vec2; 4], t: f32) -> Vec2 {
    let u = 1.0 - t;
    p[0] * (u * u * u) + p[1] * (3.0 * u * u * t) + p[2] * (3.0 * u * t * t) + p[3] * (t * t * t)
}

/// Closed shape under a cubic Bezier ridge, filled down to `floor_y`.
pub fn ridge_fill(curve: [Vec2; 4], floor_y: f32, color: Color, samples: usize) -> Mesh {
    let samples = samples.max(2);
    let mut m = MeshData::default();
    let mut prev: Option<(u32, u32)> = None;
    for i in 0..=samples {
        let top = cubic_bezier(curve, i as f32 / samples as f32);
        let upper = m.vertex(top, color);
        let lower = m.vertex(Vec2::new(top.x, floor_y), color);
        if let Some((pu, pl)) = prev {
            m.triangle(pu, pl, lower);
            m.triangle(pu, lower, upper);
        }
        prev = Some((upper, lower));
    }
    m.into_mesh()
}

/// Filled disc, `inner` at the centre fading to `outer` at the rim.
pub fn radial_disc(radius: f32, inner: Color, outer: Color, segments: usize) -> Mesh {
    let segments = segments.max(3);
    let mut m = MeshData::default();
    let centre = m.vertex(Vec2::ZERO, inner);
    let first = m.vertex(Vec2::new(radius, 0.0), outer);
    let mut prev = first;
    for i in 1..segments {
        let a = i as f32 / segments as f32 * TAU;
        let next = m.vertex(Vec2::from_angle(a) * radius, outer);
        m.triangle(centre, prev, next);
        prev = next;
    }
    m.triangle(centre, prev, first);
    m.into_mesh()
}

/// `count` evenly spaced triangular rays between two radii.
pub fn ray_wedges(count: usize, inner: f32, outer: f32, half_width: f32, color: Color) -> Mesh {
    let mut m = MeshData::default();
    for i in 0..count {
        let a = i as f32 / count as f32 * TAU;
        let l = m.vertex(Vec2::from_angle(a - half_width) * inner, color);
        let r = m.vertex(Vec2::from_angle(a + half_width) * inner, color);
        let tip = m.vertex(Vec2::from_angle(a) * outer, color);
        m.triangle(l, r, tip);
    }
    m.into_mesh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_hits_its_end_points() {
        let p = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 40.0),
            Vec2::new(30.0, 40.0),
            Vec2::new(40.0, 0.0),
        ];
        assert_eq!(cubic_bezier(p, 0.0), p[0]);
        assert!(cubic_bezier(p, 1.0).distance(p[3]) < 1e-4);
        assert!(cubic_bezier(p, 0.5).y > 0.0);
    }

    #[test]
    fn test_mesh_sizes() {
        let ridge = ridge_fill([Vec2::ZERO, Vec2::ONE, Vec2::ONE, Vec2::X], -10.0, Color::WHITE, 8);
        assert_eq!(ridge.count_vertices(), 18);
        assert_eq!(ridge.indices().map(|i| i.len()), Some(8 * 6));

        let disc = radial_disc(5.0, Color::WHITE, Color::BLACK, 12);
        assert_eq!(disc.count_vertices(), 13);
        assert_eq!(disc.indices().map(|i| i.len()), Some(12 * 3));

        let rays = ray_wedges(8, 10.0, 20.0, 0.1, Color::WHITE);
        assert_eq!(rays.count_vertices(), 24);
    }
}
