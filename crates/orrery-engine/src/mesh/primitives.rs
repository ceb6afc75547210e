//! Procedural primitive geometry.
//!
//! Generators for the shapes the demo scenes are built from. Every generator
//! produces a fully validated [`MeshBuffer`] with `position`, `normal`, and
//! `uv` attributes and counter-clockwise outward-facing winding.

use std::f32::consts::PI;

use glam::Vec3;

use super::{ATTR_NORMAL, ATTR_POSITION, ATTR_UV, MeshBuffer};

/// Axis-aligned rectangle in the XY plane, centered on the origin, facing +Z.
pub fn plane(width: f32, height: f32) -> MeshBuffer {
    let (hw, hh) = (0.5 * width, 0.5 * height);
    let positions = vec![
        -hw, -hh, 0.0, //
        hw, -hh, 0.0, //
        -hw, hh, 0.0, //
        hw, hh, 0.0,
    ];
    let normals = vec![
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0,
    ];
    let uvs = vec![
        0.0, 0.0, //
        1.0, 0.0, //
        0.0, 1.0, //
        1.0, 1.0,
    ];

    MeshBuffer::builder()
        .attribute(ATTR_POSITION, 3, positions)
        .attribute(ATTR_NORMAL, 3, normals)
        .attribute(ATTR_UV, 2, uvs)
        .indices(vec![0, 1, 2, 2, 1, 3])
        .build()
        .expect("generated plane geometry is valid by construction")
}

/// Axis-aligned box centered on the origin, 24 vertices (4 per face) so each
/// face keeps a flat normal.
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshBuffer {
    let half = Vec3::new(0.5 * width, 0.5 * height, 0.5 * depth);

    // (normal, u axis, v axis) per face, with u × v = normal so the shared
    // corner pattern below winds counter-clockwise from outside.
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut positions = Vec::with_capacity(24 * 3);
    let mut normals = Vec::with_capacity(24 * 3);
    let mut uvs = Vec::with_capacity(24 * 2);
    let mut indices = Vec::with_capacity(36);

    for (face, (normal, u_axis, v_axis)) in faces.iter().enumerate() {
        let center = *normal * normal.abs().dot(half);
        let u_extent = *u_axis * u_axis.abs().dot(half);
        let v_extent = *v_axis * v_axis.abs().dot(half);

        for (du, dv) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
            let corner = center + u_extent * du + v_extent * dv;
            positions.extend_from_slice(&[corner.x, corner.y, corner.z]);
            normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
            uvs.extend_from_slice(&[0.5 * (du + 1.0), 0.5 * (dv + 1.0)]);
        }

        let base = (face * 4) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
    }

    MeshBuffer::builder()
        .attribute(ATTR_POSITION, 3, positions)
        .attribute(ATTR_NORMAL, 3, normals)
        .attribute(ATTR_UV, 2, uvs)
        .indices(indices)
        .build()
        .expect("generated box geometry is valid by construction")
}

/// UV sphere centered on the origin.
///
/// `width_segments` is clamped to at least 3 and `height_segments` to at
/// least 2. Normals point radially outward.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshBuffer {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();

    for ring in 0..=hs {
        let v = ring as f32 / hs as f32;
        let theta = v * PI;
        for seg in 0..=ws {
            let u = seg as f32 / ws as f32;
            let phi = u * 2.0 * PI;

            let dir = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let p = dir * radius;
            positions.extend_from_slice(&[p.x, p.y, p.z]);
            normals.extend_from_slice(&[dir.x, dir.y, dir.z]);
            uvs.extend_from_slice(&[u, 1.0 - v]);
        }
    }

    let stride = ws + 1;
    let mut indices = Vec::new();
    for ring in 0..hs {
        for seg in 0..ws {
            let a = ring * stride + seg;
            let b = a + stride;

            // The row touching a pole collapses one triangle of each quad to
            // zero area; skip it.
            if ring != 0 {
                indices.extend_from_slice(&[a, a + 1, b]);
            }
            if ring != hs - 1 {
                indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }
    }

    MeshBuffer::builder()
        .attribute(ATTR_POSITION, 3, positions)
        .attribute(ATTR_NORMAL, 3, normals)
        .attribute(ATTR_UV, 2, uvs)
        .indices(indices)
        .build()
        .expect("generated sphere geometry is valid by construction")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn stored_normals(buffer: &MeshBuffer) -> Vec<f32> {
        buffer.attribute(ATTR_NORMAL).unwrap().data().to_vec()
    }

    // ── plane ─────────────────────────────────────────────────────────────

    #[test]
    fn plane_winding_matches_its_stored_normals() {
        let buffer = plane(2.0, 2.0);
        // Normals recomputed from the index winding must agree with the
        // stored +Z normals, proving the CCW convention holds.
        let recomputed = buffer.computed_vertex_normals();
        for (a, b) in recomputed.iter().zip(stored_normals(&buffer).iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-5);
        }
    }

    // ── box ───────────────────────────────────────────────────────────────

    #[test]
    fn box_has_four_vertices_per_face() {
        let buffer = box_mesh(1.0, 2.0, 3.0);
        assert_eq!(buffer.vertex_count(), 24);
        assert_eq!(buffer.triangle_count(), 12);
    }

    #[test]
    fn box_normals_point_away_from_center() {
        let buffer = box_mesh(2.0, 2.0, 2.0);
        let positions = buffer.attribute(ATTR_POSITION).unwrap().data().to_vec();
        let normals = stored_normals(&buffer);

        for i in 0..buffer.vertex_count() {
            let p = Vec3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]);
            let n = Vec3::new(normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]);
            assert!(p.dot(n) > 0.0);
        }
    }

    #[test]
    fn box_winding_is_counter_clockwise_from_outside() {
        let buffer = box_mesh(2.0, 2.0, 2.0);
        // Each face is flat, so winding-derived normals equal the stored
        // per-face normals exactly when the winding is correct.
        let recomputed = buffer.computed_vertex_normals();
        for (a, b) in recomputed.iter().zip(stored_normals(&buffer).iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-5);
        }
    }

    // ── sphere ────────────────────────────────────────────────────────────

    #[test]
    fn sphere_normals_are_radial_unit_vectors() {
        let radius = 3.0;
        let buffer = uv_sphere(radius, 12, 8);
        let positions = buffer.attribute(ATTR_POSITION).unwrap().data().to_vec();
        let normals = stored_normals(&buffer);

        for i in 0..buffer.vertex_count() {
            let p = Vec3::new(positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]);
            let n = Vec3::new(normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]);
            assert_abs_diff_eq!(p.length(), radius, epsilon = 1e-4);
            assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-5);
            assert_abs_diff_eq!((p / radius - n).length(), 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn sphere_winding_faces_outward() {
        let buffer = uv_sphere(1.0, 8, 6);
        let positions = buffer.attribute(ATTR_POSITION).unwrap().data().to_vec();
        let read = |i: u32| {
            let at = i as usize * 3;
            Vec3::new(positions[at], positions[at + 1], positions[at + 2])
        };

        for triangle in buffer.indices().chunks_exact(3) {
            let (a, b, c) = (read(triangle[0]), read(triangle[1]), read(triangle[2]));
            let face = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn sphere_clamps_tiny_segment_counts() {
        let buffer = uv_sphere(1.0, 1, 1);
        // 3 × 2 segments minimum.
        assert_eq!(buffer.vertex_count(), 4 * 3);
        assert!(buffer.triangle_count() > 0);
    }
}
