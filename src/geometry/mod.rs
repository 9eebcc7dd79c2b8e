//! CPU-side procedural mesh generation.
//!
//! Every decorative object in the scene is assembled from a handful of
//! primitives (boxes, planes, cylinders, tori, circles, extruded polygons,
//! polylines and point clouds). Meshes are plain vertex/index arrays that the
//! renderer uploads once; only the grid is rewritten per frame.

/// Quadratic Bezier sampling for palm leaves.
pub mod curve;
/// Polygon extrusion with ear-clipped caps.
pub mod extrude;
/// Box, plane, circle, cylinder, torus, line and point primitives.
pub mod primitives;

use glam::{Mat3, Mat4, Vec3};

/// Interleaved vertex layout shared by every mesh pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal (zero for lines and points).
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Vertex with the given position, normal and uv.
    #[must_use]
    pub fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }

    /// Vertex with only a position (lines, points).
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, [0.0, 0.0])
    }

    /// Position as a vector.
    #[must_use]
    pub fn pos(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// wgpu vertex buffer layout matching this struct.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x2
        ];
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// How the index buffer is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Indexed triangle list.
    Triangles,
    /// Indexed line list (pairs of indices).
    Lines,
    /// One sprite per vertex; indices are unused.
    Points,
}

/// A CPU mesh: vertices, indices and their topology.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Index data (empty for point clouds).
    pub indices: Vec<u32>,
    /// Index interpretation.
    pub topology: Topology,
}

impl MeshData {
    /// Empty mesh with the given topology.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of primitives (triangles, segments or points).
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => self.indices.len() / 2,
            Topology::Points => self.vertices.len(),
        }
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.pos();
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (lo.min(v.pos()), hi.max(v.pos()))
        }))
    }

    /// Apply an affine transform to positions and normals.
    pub fn transform(&mut self, matrix: &Mat4) {
        let normal_matrix = Mat3::from_mat4(*matrix).inverse().transpose();
        for v in &mut self.vertices {
            v.position = matrix.transform_point3(v.pos()).to_array();
            let n = Vec3::from_array(v.normal);
            if n != Vec3::ZERO {
                v.normal = (normal_matrix * n).normalize_or_zero().to_array();
            }
        }
    }

    /// Translate every vertex.
    #[must_use]
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.transform(&Mat4::from_translation(offset));
        self
    }

    /// Rotate about the X axis.
    #[must_use]
    pub fn rotated_x(mut self, angle: f32) -> Self {
        self.transform(&Mat4::from_rotation_x(angle));
        self
    }

    /// Rotate about the Z axis.
    #[must_use]
    pub fn rotated_z(mut self, angle: f32) -> Self {
        self.transform(&Mat4::from_rotation_z(angle));
        self
    }

    /// Move the bounding-box center to the origin.
    #[must_use]
    pub fn centered(self) -> Self {
        match self.bounds() {
            Some((lo, hi)) => self.translated(-(lo + hi) * 0.5),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::primitives::cuboid;
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(size_of::<Vertex>(), 32);
    }

    #[test]
    fn translated_moves_bounds() {
        let mesh = cuboid(1.0, 1.0, 1.0).translated(Vec3::new(0.0, 0.5, 0.0));
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((lo.y - 0.0).abs() < 1e-6);
        assert!((hi.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_keeps_normals_unit_length() {
        let mesh = cuboid(2.0, 1.0, 3.0).rotated_x(-FRAC_PI_2);
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn centered_moves_center_to_origin() {
        let mesh = cuboid(2.0, 2.0, 2.0)
            .translated(Vec3::new(5.0, -3.0, 1.0))
            .centered();
        let (lo, hi) = mesh.bounds().unwrap();
        assert!(((lo + hi) * 0.5).length() < 1e-5);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(MeshData::new(Topology::Points).bounds().is_none());
    }
}
