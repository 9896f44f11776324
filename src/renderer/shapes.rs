//! Mesh builders for the scene primitives
//!
//! Everything is emitted as flat-shaded triangle lists into a shared vertex
//! vector; the pipeline rebuilds the buffer each frame.

use std::f32::consts::TAU;

use glam::Vec3;

use super::vertex::Vertex;
use super::vertex::colors;
use crate::sim::{Obstacle, ObstacleKind};

fn push_tri(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
    let normal = (b - a).cross(c - a).normalize_or_zero();
    let n = normal.to_array();
    out.push(Vertex::new(a.to_array(), n, color));
    out.push(Vertex::new(b.to_array(), n, color));
    out.push(Vertex::new(c.to_array(), n, color));
}

/// Flat disc in the ground plane at y = 0, normal up
pub fn ground_disc(out: &mut Vec<Vertex>, radius: f32, segments: u32) {
    let up = [0.0, 1.0, 0.0];
    for i in 0..segments {
        let t1 = i as f32 / segments as f32 * TAU;
        let t2 = (i + 1) as f32 / segments as f32 * TAU;
        out.push(Vertex::new([0.0, 0.0, 0.0], up, colors::GROUND));
        out.push(Vertex::new(
            [radius * t2.cos(), 0.0, radius * t2.sin()],
            up,
            colors::GROUND,
        ));
        out.push(Vertex::new(
            [radius * t1.cos(), 0.0, radius * t1.sin()],
            up,
            colors::GROUND,
        ));
    }
}

/// Open cone: base ring at `base_y`, apex at `base_y + height`
pub fn cone(
    out: &mut Vec<Vertex>,
    center: Vec3,
    base_y: f32,
    radius: f32,
    height: f32,
    color: [f32; 4],
    segments: u32,
) {
    let apex = Vec3::new(center.x, base_y + height, center.z);
    for i in 0..segments {
        let t1 = i as f32 / segments as f32 * TAU;
        let t2 = (i + 1) as f32 / segments as f32 * TAU;
        let p1 = Vec3::new(
            center.x + radius * t1.cos(),
            base_y,
            center.z + radius * t1.sin(),
        );
        let p2 = Vec3::new(
            center.x + radius * t2.cos(),
            base_y,
            center.z + radius * t2.sin(),
        );
        push_tri(out, p1, apex, p2, color);
    }
}

/// Tapered cylinder between `base_y` and `base_y + height`
pub fn cylinder(
    out: &mut Vec<Vertex>,
    center: Vec3,
    base_y: f32,
    radius_bottom: f32,
    radius_top: f32,
    height: f32,
    color: [f32; 4],
    segments: u32,
) {
    let top_y = base_y + height;
    for i in 0..segments {
        let t1 = i as f32 / segments as f32 * TAU;
        let t2 = (i + 1) as f32 / segments as f32 * TAU;
        let (c1, s1) = (t1.cos(), t1.sin());
        let (c2, s2) = (t2.cos(), t2.sin());

        let b1 = Vec3::new(center.x + radius_bottom * c1, base_y, center.z + radius_bottom * s1);
        let b2 = Vec3::new(center.x + radius_bottom * c2, base_y, center.z + radius_bottom * s2);
        let u1 = Vec3::new(center.x + radius_top * c1, top_y, center.z + radius_top * s1);
        let u2 = Vec3::new(center.x + radius_top * c2, top_y, center.z + radius_top * s2);

        push_tri(out, b1, u1, b2, color);
        push_tri(out, b2, u1, u2, color);
    }
}

/// Axis-aligned box from its center and half extents
pub fn box_mesh(out: &mut Vec<Vertex>, center: Vec3, half: Vec3, color: [f32; 4]) {
    let (cx, cy, cz) = (center.x, center.y, center.z);
    let (hx, hy, hz) = (half.x, half.y, half.z);

    let corners = [
        Vec3::new(cx - hx, cy - hy, cz - hz),
        Vec3::new(cx + hx, cy - hy, cz - hz),
        Vec3::new(cx + hx, cy + hy, cz - hz),
        Vec3::new(cx - hx, cy + hy, cz - hz),
        Vec3::new(cx - hx, cy - hy, cz + hz),
        Vec3::new(cx + hx, cy - hy, cz + hz),
        Vec3::new(cx + hx, cy + hy, cz + hz),
        Vec3::new(cx - hx, cy + hy, cz + hz),
    ];
    // Each face wound so the normal points outward
    let faces: [[usize; 4]; 6] = [
        [1, 0, 3, 2], // -z
        [4, 5, 6, 7], // +z
        [0, 4, 7, 3], // -x
        [5, 1, 2, 6], // +x
        [3, 7, 6, 2], // +y
        [0, 1, 5, 4], // -y
    ];
    for face in faces {
        let [a, b, c, d] = face.map(|i| corners[i]);
        push_tri(out, a, b, c, color);
        push_tri(out, a, c, d, color);
    }
}

/// Tree: tapered trunk plus a leaf cone, scaled about its ground anchor
pub fn tree(out: &mut Vec<Vertex>, obstacle: &Obstacle, segments: u32) {
    let s = obstacle.scale;
    if s <= 0.0 {
        return;
    }
    let pos = obstacle.pos;
    cylinder(
        out,
        pos,
        0.0,
        0.35 * s,
        0.25 * s,
        1.6 * s,
        colors::TRUNK,
        segments,
    );
    cone(out, pos, 0.9 * s, 1.4 * s, 2.2 * s, colors::LEAVES, segments);
}

/// House: base box plus a four-sided roof cone
pub fn house(out: &mut Vec<Vertex>, obstacle: &Obstacle) {
    let pos = obstacle.pos;
    box_mesh(
        out,
        Vec3::new(pos.x, 0.8, pos.z),
        Vec3::new(1.2, 0.8, 1.0),
        colors::HOUSE_BASE,
    );
    cone(out, pos, 1.6, 1.6, 1.0, colors::HOUSE_ROOF, 4);
}

/// Dispatch on obstacle kind
pub fn obstacle(out: &mut Vec<Vertex>, o: &Obstacle, segments: u32) {
    match o.kind {
        ObstacleKind::Tree => tree(out, o, segments),
        ObstacleKind::House => house(out, o),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_disc_triangle_count() {
        let mut out = Vec::new();
        ground_disc(&mut out, 250.0, 16);
        assert_eq!(out.len(), 16 * 3);
    }

    #[test]
    fn fully_shrunk_tree_emits_nothing() {
        let mut o = Obstacle::new(0, ObstacleKind::Tree, Vec3::ZERO);
        o.scale = 0.0;
        let mut out = Vec::new();
        tree(&mut out, &o, 8);
        assert!(out.is_empty());
    }

    #[test]
    fn box_normals_point_outward() {
        let mut out = Vec::new();
        box_mesh(&mut out, Vec3::ZERO, Vec3::ONE, colors::HOUSE_BASE);
        assert_eq!(out.len(), 36);
        for v in &out {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert!(p.dot(n) > 0.0, "normal {n} points inward at {p}");
        }
    }
}
