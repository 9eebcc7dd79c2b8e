//! Scene graph: an arena of transform nodes holding mesh/material handles
//! and lights.
//!
//! The graph is built once by [`builder::build_scene`] and then only
//! mutated in place: node transforms every frame, the grid mesh every frame,
//! and the beam material opacity while the beam is active. Nothing is ever
//! removed, so ids stay valid for the scene's lifetime.

/// Procedural construction of the synthwave world.
pub mod builder;
mod car;
/// Light source definitions.
pub mod light;
/// Surface materials and shading models.
pub mod material;

use glam::{EulerRot, Mat4, Quat, Vec3};
pub use light::Light;
pub use material::{Material, Shading};

use crate::geometry::MeshData;

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Index of a node in the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Index of a mesh in the scene's mesh library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(usize);

/// Index of a material in the scene's material library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(usize);

impl MeshId {
    /// Raw index, stable for the scene's lifetime.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl MaterialId {
    /// Raw index, stable for the scene's lifetime.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Local transform: translation, XYZ Euler rotation (radians) and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub position: Vec3,
    /// Euler angles applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity rotation/scale at `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Builder-style rotation override.
    #[must_use]
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale override.
    #[must_use]
    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(
            self.scale,
            rotation,
            self.position,
        )
    }
}

/// What a node contributes to the rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Pure transform, groups its children.
    Group,
    /// Drawable mesh with a material.
    Mesh {
        /// Geometry handle.
        mesh: MeshId,
        /// Material handle.
        material: MaterialId,
    },
    /// Light source.
    Light(Light),
}

/// A node in the scene arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Local transform.
    pub transform: Transform,
    /// Node payload.
    pub kind: NodeKind,
    /// Hidden nodes (and their subtrees) are skipped when drawing.
    pub visible: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(transform: Transform, kind: NodeKind) -> Self {
        Self {
            transform,
            kind,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Parent node, if any.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// One drawable mesh instance resolved to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Source node.
    pub node: NodeId,
    /// Geometry handle.
    pub mesh: MeshId,
    /// Material handle.
    pub material: MaterialId,
    /// Object-to-world matrix.
    pub world: Mat4,
}

/// A light resolved to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldLight {
    /// Light parameters.
    pub light: Light,
    /// World-space position of the owning node.
    pub position: Vec3,
}

/// Exponential-squared fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    /// Linear RGB fog color (also the clear color).
    pub color: [f32; 3],
    /// Density coefficient.
    pub density: f32,
}

/// A mesh plus a version counter bumped on every mutable access.
#[derive(Debug, Clone)]
struct MeshSlot {
    data: MeshData,
    version: u64,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Arena scene graph.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    meshes: Vec<MeshSlot>,
    materials: Vec<Material>,
    /// Background fog; its color is also used to clear the frame.
    pub fog: Fog,
}

impl Scene {
    /// Empty scene with the given fog.
    #[must_use]
    pub fn new(fog: Fog) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            meshes: Vec::new(),
            materials: Vec::new(),
            fog,
        }
    }

    // -- Libraries --

    /// Register a mesh and return its handle.
    pub fn add_mesh(&mut self, data: MeshData) -> MeshId {
        self.meshes.push(MeshSlot { data, version: 0 });
        MeshId(self.meshes.len() - 1)
    }

    /// Register a material and return its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Mesh data by handle.
    #[must_use]
    pub fn mesh(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.0).map(|slot| &slot.data)
    }

    /// Mutable mesh data; bumps the mesh version so renderers re-upload it.
    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut MeshData> {
        self.meshes.get_mut(id.0).map(|slot| {
            slot.version += 1;
            &mut slot.data
        })
    }

    /// Version of a mesh (0 until first mutated).
    #[must_use]
    pub fn mesh_version(&self, id: MeshId) -> u64 {
        self.meshes.get(id.0).map_or(0, |slot| slot.version)
    }

    /// All meshes with their handles, in registration order.
    pub fn meshes(&self) -> impl Iterator<Item = (MeshId, &MeshData)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, slot)| (MeshId(i), &slot.data))
    }

    /// Material by handle.
    #[must_use]
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    /// Mutable material by handle.
    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    // -- Nodes --

    /// Insert a node under `parent` (or as a root) and return its id.
    pub fn spawn(
        &mut self,
        parent: Option<NodeId>,
        transform: Transform,
        kind: NodeKind,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(transform, kind);
        match parent.filter(|p| p.0 < self.nodes.len()) {
            Some(p) => {
                node.parent = Some(p);
                self.nodes[p.0].children.push(id);
            }
            None => self.roots.push(id),
        }
        self.nodes.push(node);
        id
    }

    /// Convenience: spawn an empty group.
    pub fn spawn_group(
        &mut self,
        parent: Option<NodeId>,
        transform: Transform,
    ) -> NodeId {
        self.spawn(parent, transform, NodeKind::Group)
    }

    /// Convenience: spawn a mesh node.
    pub fn spawn_mesh(
        &mut self,
        parent: Option<NodeId>,
        transform: Transform,
        mesh: MeshId,
        material: MaterialId,
    ) -> NodeId {
        self.spawn(parent, transform, NodeKind::Mesh { mesh, material })
    }

    /// Node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Mutable local transform by id.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.0).map(|n| &mut n.transform)
    }

    /// Total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root node ids in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Direct children of a node (empty for unknown ids).
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    /// Number of mesh nodes in the subtree rooted at `id`, `id` included.
    #[must_use]
    pub fn count_meshes(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current.0) else {
                continue;
            };
            if matches!(node.kind, NodeKind::Mesh { .. }) {
                count += 1;
            }
            stack.extend_from_slice(&node.children);
        }
        count
    }

    /// Object-to-world matrix of a node (product of all ancestor transforms).
    #[must_use]
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = Some(id);
        while let Some(node) = cursor.and_then(|c| self.nodes.get(c.0)) {
            matrix = node.transform.matrix() * matrix;
            cursor = node.parent;
        }
        matrix
    }

    /// Depth-first walk of visible nodes with their world matrices.
    fn walk_visible(&self, mut visit: impl FnMut(NodeId, &Node, Mat4)) {
        let mut stack: Vec<(NodeId, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&r| (r, Mat4::IDENTITY))
            .collect();
        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.matrix();
            visit(id, node, world);
            stack.extend(node.children.iter().rev().map(|&c| (c, world)));
        }
    }

    /// Visible mesh nodes resolved to world space, in depth-first order.
    #[must_use]
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let mut items = Vec::new();
        self.walk_visible(|id, node, world| {
            if let NodeKind::Mesh { mesh, material } = node.kind {
                items.push(DrawItem {
                    node: id,
                    mesh,
                    material,
                    world,
                });
            }
        });
        items
    }

    /// Visible lights resolved to world space.
    #[must_use]
    pub fn lights(&self) -> Vec<WorldLight> {
        let mut lights = Vec::new();
        self.walk_visible(|_, node, world| {
            if let NodeKind::Light(light) = node.kind {
                lights.push(WorldLight {
                    light,
                    position: world.transform_point3(Vec3::ZERO),
                });
            }
        });
        lights
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::geometry::primitives::cuboid;

    fn empty() -> Scene {
        Scene::new(Fog {
            color: [0.0; 3],
            density: 0.0,
        })
    }

    #[test]
    fn spawn_links_parent_and_children() {
        let mut scene = empty();
        let root = scene.spawn_group(None, Transform::default());
        let child = scene.spawn_group(Some(root), Transform::default());
        assert_eq!(scene.roots(), &[root]);
        assert_eq!(scene.node(root).unwrap().children(), &[child]);
        assert_eq!(scene.node(child).unwrap().parent(), Some(root));
    }

    #[test]
    fn world_matrix_composes_ancestors() {
        let mut scene = empty();
        let root = scene.spawn_group(
            None,
            Transform::at(Vec3::new(0.0, 0.0, 15.0))
                .rotated(Vec3::new(0.0, FRAC_PI_2, 0.0)),
        );
        let child = scene.spawn_group(Some(root), Transform::at(Vec3::X));
        let p = scene.world_matrix(child).transform_point3(Vec3::ZERO);
        // +X rotated a quarter turn about Y lands on -Z.
        assert!((p - Vec3::new(0.0, 0.0, 14.0)).length() < 1e-5);
    }

    #[test]
    fn hidden_subtrees_are_not_drawn() {
        let mut scene = empty();
        let mesh = scene.add_mesh(cuboid(1.0, 1.0, 1.0));
        let mat = scene.add_material(Material::basic([1.0; 3]));
        let group = scene.spawn_group(None, Transform::default());
        let _ = scene.spawn_mesh(Some(group), Transform::default(), mesh, mat);
        let _ = scene.spawn_mesh(None, Transform::default(), mesh, mat);
        assert_eq!(scene.draw_items().len(), 2);
        assert_eq!(scene.count_meshes(group), 1);
        assert_eq!(scene.children(group).len(), 1);
        scene.node_mut(group).unwrap().visible = false;
        assert_eq!(scene.draw_items().len(), 1);
    }

    #[test]
    fn draw_items_carry_world_matrices() {
        let mut scene = empty();
        let mesh = scene.add_mesh(cuboid(1.0, 1.0, 1.0));
        let mat = scene.add_material(Material::basic([1.0; 3]));
        let group = scene.spawn_group(None, Transform::at(Vec3::Y * 2.0));
        let node = scene.spawn_mesh(
            Some(group),
            Transform::at(Vec3::X).scaled(Vec3::splat(3.0)),
            mesh,
            mat,
        );
        let item = scene.draw_items()[0];
        assert_eq!(item.node, node);
        assert_eq!(item.world, scene.world_matrix(node));
    }

    #[test]
    fn mesh_mut_bumps_version() {
        let mut scene = empty();
        let mesh = scene.add_mesh(cuboid(1.0, 1.0, 1.0));
        assert_eq!(scene.mesh_version(mesh), 0);
        let _ = scene.mesh_mut(mesh);
        let _ = scene.mesh_mut(mesh);
        assert_eq!(scene.mesh_version(mesh), 2);
    }

    #[test]
    fn lights_resolve_world_position() {
        let mut scene = empty();
        let car =
            scene.spawn_group(None, Transform::at(Vec3::new(0.0, 0.0, 15.0)));
        let _ = scene.spawn(
            Some(car),
            Transform::at(Vec3::new(0.0, 1.5, 5.0)),
            NodeKind::Light(Light::Point {
                color: [1.0, 0.0, 0.0],
                intensity: 1.0,
                range: 10.0,
            }),
        );
        let lights = scene.lights();
        assert_eq!(lights.len(), 1);
        let expected = Vec3::new(0.0, 1.5, 20.0);
        assert!((lights[0].position - expected).length() < 1e-5);
    }
}
