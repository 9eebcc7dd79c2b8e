use glam::{Vec2, Vec3};

use super::{MeshData, Topology, Vertex};

/// Twice the signed area of a polygon (positive = counter-clockwise).
fn signed_area2(polygon: &[Vec2]) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| polygon[i].perp_dot(polygon[(i + 1) % n]))
        .sum()
}

/// Drop consecutive duplicates, including a closing point equal to the
/// first one.
fn dedup_outline(shape: &[Vec2]) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::with_capacity(shape.len());
    for &p in shape {
        if out.last().is_none_or(|q| q.distance_squared(p) > 1e-12) {
            out.push(p);
        }
    }
    while out.len() > 1
        && out
            .first()
            .zip(out.last())
            .is_some_and(|(a, b)| a.distance_squared(*b) <= 1e-12)
    {
        let _ = out.pop();
    }
    out
}

fn strictly_inside(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 > 0.0 && d2 > 0.0 && d3 > 0.0
}

/// Ear-clipping triangulation of a simple polygon.
///
/// Returns counter-clockwise index triples into `polygon` regardless of the
/// input winding. Collinear vertices are skipped.
#[must_use]
pub fn triangulate(polygon: &[Vec2]) -> Vec<[usize; 3]> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }
    let mut ring: Vec<usize> = if signed_area2(polygon) >= 0.0 {
        (0..n).collect()
    } else {
        (0..n).rev().collect()
    };

    let mut triangles = Vec::with_capacity(n - 2);
    while ring.len() > 3 {
        let m = ring.len();
        let mut clipped = false;
        for k in 0..m {
            let (ia, ib, ic) =
                (ring[(k + m - 1) % m], ring[k], ring[(k + 1) % m]);
            let (a, b, c) = (polygon[ia], polygon[ib], polygon[ic]);
            let turn = (b - a).perp_dot(c - b);
            if turn.abs() <= 1e-9 {
                // Collinear: drop the middle vertex, no triangle.
                let _ = ring.remove(k);
                clipped = true;
                break;
            }
            if turn < 0.0 {
                continue;
            }
            let blocked = ring.iter().any(|&j| {
                j != ia
                    && j != ib
                    && j != ic
                    && strictly_inside(polygon[j], a, b, c)
            });
            if !blocked {
                triangles.push([ia, ib, ic]);
                let _ = ring.remove(k);
                clipped = true;
                break;
            }
        }
        if !clipped {
            log::warn!("triangulate: polygon is not simple, stopping early");
            break;
        }
    }
    if ring.len() == 3 {
        let (a, b, c) = (polygon[ring[0]], polygon[ring[1]], polygon[ring[2]]);
        if (b - a).perp_dot(c - b).abs() > 1e-9 {
            triangles.push([ring[0], ring[1], ring[2]]);
        }
    }
    triangles
}

/// Extrude a 2D outline (XY plane) along +Z by `depth`.
///
/// Produces a back cap at `z = 0` facing -Z, a front cap at `z = depth`
/// facing +Z, and flat-shaded side walls.
#[must_use]
pub fn extrude(shape: &[Vec2], depth: f32) -> MeshData {
    let mut outline = dedup_outline(shape);
    if signed_area2(&outline) < 0.0 {
        outline.reverse();
    }
    let mut mesh = MeshData::new(Topology::Triangles);
    if outline.len() < 3 {
        return mesh;
    }
    let triangles = triangulate(&outline);

    let (lo, hi) = outline
        .iter()
        .fold((outline[0], outline[0]), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    let extent = (hi - lo).max(Vec2::splat(f32::EPSILON));
    let uv = |p: Vec2| {
        let t = (p - lo) / extent;
        [t.x, 1.0 - t.y]
    };

    // Caps
    for (z, normal) in [(0.0, Vec3::NEG_Z), (depth, Vec3::Z)] {
        let base = mesh.vertices.len() as u32;
        for &p in &outline {
            mesh.vertices
                .push(Vertex::new(p.extend(z), normal, uv(p)));
        }
        for [a, b, c] in &triangles {
            let (a, b, c) = (*a as u32, *b as u32, *c as u32);
            if normal.z > 0.0 {
                mesh.indices.extend_from_slice(&[base + a, base + b, base + c]);
            } else {
                mesh.indices.extend_from_slice(&[base + a, base + c, base + b]);
            }
        }
    }

    // Side walls, one flat quad per outline edge.
    let n = outline.len();
    for i in 0..n {
        let p0 = outline[i];
        let p1 = outline[(i + 1) % n];
        let edge = p1 - p0;
        let normal = Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero();
        let base = mesh.vertices.len() as u32;
        let u0 = i as f32 / n as f32;
        let u1 = (i + 1) as f32 / n as f32;
        mesh.vertices.extend_from_slice(&[
            Vertex::new(p0.extend(0.0), normal, [u0, 1.0]),
            Vertex::new(p1.extend(0.0), normal, [u1, 1.0]),
            Vertex::new(p1.extend(depth), normal, [u1, 0.0]),
            Vertex::new(p0.extend(depth), normal, [u0, 0.0]),
        ]);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn area_of(polygon: &[Vec2], tris: &[[usize; 3]]) -> f32 {
        tris.iter()
            .map(|[a, b, c]| {
                let (a, b, c) = (polygon[*a], polygon[*b], polygon[*c]);
                (b - a).perp_dot(c - a) * 0.5
            })
            .sum()
    }

    #[test]
    fn square_triangulates_into_two() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let tris = triangulate(&square);
        assert_eq!(tris.len(), 2);
        assert!((area_of(&square, &tris) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clockwise_input_yields_ccw_triangles() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];
        let tris = triangulate(&square);
        assert!((area_of(&square, &tris) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn concave_outline_preserves_area() {
        // U shape: 3x2 block with a 1x1 notch cut from the top middle.
        let u = [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let tris = triangulate(&u);
        assert_eq!(tris.len(), 6);
        assert!((area_of(&u, &tris) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn collinear_vertices_are_skipped() {
        let strip = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let tris = triangulate(&strip);
        assert!((area_of(&strip, &tris) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn closing_duplicate_is_removed() {
        let outline = dedup_outline(&[
            Vec2::new(0.0, 0.5),
            Vec2::new(0.0, 1.8),
            Vec2::new(1.5, 2.6),
            Vec2::new(0.0, 0.5),
        ]);
        assert_eq!(outline.len(), 3);
    }

    #[test]
    fn extruded_prism_has_caps_and_walls() {
        let tri = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 2.0),
        ];
        let mesh = extrude(&tri, 3.0);
        // 2 caps × 1 triangle + 3 walls × 2 triangles
        assert_eq!(mesh.primitive_count(), 8);
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::new(2.0, 2.0, 3.0));
    }

    #[test]
    fn extruded_walls_face_outward() {
        let square = [
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];
        let mesh = extrude(&square, 1.0);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] =
                [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let face = (b.pos() - a.pos()).cross(c.pos() - a.pos());
            assert!(face.dot(Vec3::from_array(a.normal)) > 0.0);
        }
    }
}
