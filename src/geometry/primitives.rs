use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::{MeshData, Topology, Vertex};

/// Axis-aligned box centered at the origin, one flat-shaded quad per face.
#[must_use]
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let h = Vec3::new(width, height, depth) * 0.5;
    // (normal, u axis, v axis) per face
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut mesh = MeshData::new(Topology::Triangles);
    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        let center = normal * h;
        let du = u * h;
        let dv = v * h;
        let corners = [
            (center - du - dv, [0.0, 1.0]),
            (center + du - dv, [1.0, 1.0]),
            (center + du + dv, [1.0, 0.0]),
            (center - du + dv, [0.0, 0.0]),
        ];
        for (p, uv) in corners {
            mesh.vertices.push(Vertex::new(p, normal, uv));
        }
        mesh.indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
        ]);
    }
    mesh
}

/// The 12 edges of an origin-centered box as a line list.
#[must_use]
pub fn cuboid_edges(width: f32, height: f32, depth: f32) -> MeshData {
    let h = Vec3::new(width, height, depth) * 0.5;
    let mut mesh = MeshData::new(Topology::Lines);
    for i in 0..8u32 {
        let sign = |bit: u32| if i & bit == 0 { -1.0 } else { 1.0 };
        let corner = Vec3::new(sign(1) * h.x, sign(2) * h.y, sign(4) * h.z);
        mesh.vertices.push(Vertex::at(corner));
    }
    // Corners differing in exactly one bit share an edge.
    for a in 0..8u32 {
        for bit in [1, 2, 4] {
            if a & bit == 0 {
                mesh.indices.extend_from_slice(&[a, a | bit]);
            }
        }
    }
    mesh
}

fn plane_vertices(
    width: f32,
    height: f32,
    segments_w: u32,
    segments_h: u32,
) -> Vec<Vertex> {
    let segments_w = segments_w.max(1);
    let segments_h = segments_h.max(1);
    let mut vertices =
        Vec::with_capacity(((segments_w + 1) * (segments_h + 1)) as usize);
    for iy in 0..=segments_h {
        let fy = iy as f32 / segments_h as f32;
        let y = height * 0.5 - fy * height;
        for ix in 0..=segments_w {
            let fx = ix as f32 / segments_w as f32;
            let x = fx * width - width * 0.5;
            vertices.push(Vertex::new(
                Vec3::new(x, y, 0.0),
                Vec3::Z,
                [fx, fy],
            ));
        }
    }
    vertices
}

/// Segmented plane in the XY plane facing +Z.
#[must_use]
pub fn plane(
    width: f32,
    height: f32,
    segments_w: u32,
    segments_h: u32,
) -> MeshData {
    let mut mesh = MeshData::new(Topology::Triangles);
    mesh.vertices = plane_vertices(width, height, segments_w, segments_h);
    let (sw, sh) = (segments_w.max(1), segments_h.max(1));
    let row = sw + 1;
    for iy in 0..sh {
        for ix in 0..sw {
            let a = iy * row + ix;
            let b = a + row;
            mesh.indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    mesh
}

/// Segmented plane drawn as its grid lines (rows and columns, no diagonals).
///
/// Vertex order matches [`plane`], so per-vertex animation can index both
/// the same way.
#[must_use]
pub fn plane_wireframe(
    width: f32,
    height: f32,
    segments_w: u32,
    segments_h: u32,
) -> MeshData {
    let mut mesh = MeshData::new(Topology::Lines);
    mesh.vertices = plane_vertices(width, height, segments_w, segments_h);
    let (sw, sh) = (segments_w.max(1), segments_h.max(1));
    let row = sw + 1;
    for iy in 0..=sh {
        for ix in 0..sw {
            let a = iy * row + ix;
            mesh.indices.extend_from_slice(&[a, a + 1]);
        }
    }
    for ix in 0..=sw {
        for iy in 0..sh {
            let a = iy * row + ix;
            mesh.indices.extend_from_slice(&[a, a + row]);
        }
    }
    mesh
}

/// Filled disc in the XY plane facing +Z. Uvs map the disc into the unit
/// square, so `uv.y` runs from the bottom edge (0) to the top edge (1).
#[must_use]
pub fn circle(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::new(Topology::Triangles);
    mesh.vertices
        .push(Vertex::new(Vec3::ZERO, Vec3::Z, [0.5, 0.5]));
    for s in 0..=segments {
        let theta = s as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(cos * radius, sin * radius, 0.0),
            Vec3::Z,
            [(cos + 1.0) * 0.5, (sin + 1.0) * 0.5],
        ));
    }
    for s in 1..=segments {
        mesh.indices.extend_from_slice(&[0, s, s + 1]);
    }
    mesh
}

/// Y-aligned (frustum) cylinder centered at the origin, capped at both ends.
#[must_use]
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> MeshData {
    let radial = radial_segments.max(3);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    let mut mesh = MeshData::new(Topology::Triangles);

    // Side wall: two rings.
    for (ring, (y, r)) in [(half, radius_top), (-half, radius_bottom)]
        .into_iter()
        .enumerate()
    {
        for s in 0..=radial {
            let u = s as f32 / radial as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalize();
            mesh.vertices.push(Vertex::new(
                Vec3::new(r * sin, y, r * cos),
                normal,
                [u, ring as f32],
            ));
        }
    }
    let row = radial + 1;
    for s in 0..radial {
        let a = s;
        let b = s + row;
        mesh.indices
            .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
    }

    // Caps.
    for (y, r, normal) in
        [(half, radius_top, Vec3::Y), (-half, radius_bottom, Vec3::NEG_Y)]
    {
        if r <= 0.0 {
            continue;
        }
        let center = mesh.vertices.len() as u32;
        mesh.vertices
            .push(Vertex::new(Vec3::new(0.0, y, 0.0), normal, [0.5, 0.5]));
        for s in 0..=radial {
            let theta = s as f32 / radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.push(Vertex::new(
                Vec3::new(r * sin, y, r * cos),
                normal,
                [(sin + 1.0) * 0.5, (cos + 1.0) * 0.5],
            ));
        }
        for s in 1..=radial {
            if normal.y > 0.0 {
                mesh.indices
                    .extend_from_slice(&[center, center + s, center + s + 1]);
            } else {
                mesh.indices
                    .extend_from_slice(&[center, center + s + 1, center + s]);
            }
        }
    }
    mesh
}

/// Torus in the XY plane around the Z axis. `arc` below `TAU` yields an
/// open ring starting at +X and sweeping counter-clockwise, so `arc = PI`
/// is an upright half-ring.
#[must_use]
pub fn torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
    arc: f32,
) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::new(Topology::Triangles);

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * arc;
            let (su, cu) = u.sin_cos();
            let (sv, cv) = v.sin_cos();
            let position = Vec3::new(
                (radius + tube * cv) * cu,
                (radius + tube * cv) * su,
                tube * sv,
            );
            let center = Vec3::new(radius * cu, radius * su, 0.0);
            mesh.vertices.push(Vertex::new(
                position,
                (position - center).normalize_or_zero(),
                [i as f32 / tubular as f32, j as f32 / radial as f32],
            ));
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Connected polyline through the given points, as a line list.
#[must_use]
pub fn polyline(points: &[Vec3]) -> MeshData {
    let mut mesh = MeshData::new(Topology::Lines);
    mesh.vertices = points.iter().copied().map(Vertex::at).collect();
    for i in 1..points.len() as u32 {
        mesh.indices.extend_from_slice(&[i - 1, i]);
    }
    mesh
}

/// Point cloud, one sprite per position.
#[must_use]
pub fn points(positions: &[Vec3]) -> MeshData {
    let mut mesh = MeshData::new(Topology::Points);
    mesh.vertices = positions.iter().copied().map(Vertex::at).collect();
    mesh
}

/// Flat rectangle in the XY plane with a given size (unsegmented plane).
#[must_use]
pub fn quad(size: Vec2) -> MeshData {
    plane(size.x, size.y, 1, 1)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn assert_indices_valid(mesh: &MeshData) {
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn cuboid_has_six_faces() {
        let mesh = cuboid(1.0, 2.0, 3.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.primitive_count(), 12);
        assert_indices_valid(&mesh);
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(hi - lo, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn cuboid_faces_wind_outward() {
        let mesh = cuboid(1.0, 1.0, 1.0);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] =
                [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let face = (b.pos() - a.pos()).cross(c.pos() - a.pos());
            assert!(face.dot(Vec3::from_array(a.normal)) > 0.0);
        }
    }

    #[test]
    fn cuboid_edges_are_axis_aligned() {
        let mesh = cuboid_edges(2.0, 4.0, 6.0);
        assert_eq!(mesh.primitive_count(), 12);
        for seg in mesh.indices.chunks(2) {
            let d = mesh.vertices[seg[1] as usize].pos()
                - mesh.vertices[seg[0] as usize].pos();
            let nonzero =
                [d.x, d.y, d.z].iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(nonzero, 1);
        }
    }

    #[test]
    fn plane_and_wireframe_share_vertices() {
        let solid = plane(800.0, 1000.0, 4, 5);
        let wire = plane_wireframe(800.0, 1000.0, 4, 5);
        assert_eq!(solid.vertices, wire.vertices);
        assert_eq!(solid.vertex_count(), 5 * 6);
        assert_eq!(solid.primitive_count(), 4 * 5 * 2);
        // 6 rows of 4 segments + 5 columns of 5 segments
        assert_eq!(wire.primitive_count(), 6 * 4 + 5 * 5);
        assert_indices_valid(&solid);
        assert_indices_valid(&wire);
    }

    #[test]
    fn circle_uv_spans_height() {
        let mesh = circle(200.0, 64);
        let top = mesh
            .vertices
            .iter()
            .max_by(|a, b| a.position[1].total_cmp(&b.position[1]))
            .unwrap();
        assert!((top.uv[1] - 1.0).abs() < 1e-3);
        assert_indices_valid(&mesh);
    }

    #[test]
    fn cylinder_bounds_match_dimensions() {
        let mesh = cylinder(0.3, 0.5, 1.5, 6);
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((hi.y - 0.75).abs() < 1e-6);
        assert!((lo.y + 0.75).abs() < 1e-6);
        assert!(hi.x <= 0.5 + 1e-6);
        assert_indices_valid(&mesh);
    }

    #[test]
    fn half_torus_stays_above_axis() {
        let mesh = torus(55.0, 0.8, 8, 50, PI);
        let (lo, hi) = mesh.bounds().unwrap();
        assert!(lo.y > -0.81);
        assert!((hi.y - 55.8).abs() < 0.1);
        assert!((hi.x - 55.8).abs() < 0.1);
        assert_indices_valid(&mesh);
    }

    #[test]
    fn polyline_connects_consecutive_points() {
        let pts = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        let mesh = polyline(&pts);
        assert_eq!(mesh.indices, vec![0, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn points_have_no_indices() {
        let mesh = points(&[Vec3::ZERO, Vec3::ONE]);
        assert!(mesh.indices.is_empty());
        assert_eq!(mesh.primitive_count(), 2);
    }
}
