use glam::{Affine3A, EulerRot, Quat, Vec3};

use crate::api::types::{Color, GeometryHandle, MaterialHandle, NodeId};

/// What a node contributes to the rendered frame.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Pure transform pivot — draws nothing itself.
    Group,
    /// Textured surface. Materials are ordered; most meshes carry one.
    Mesh {
        geometry: GeometryHandle,
        materials: Vec<MaterialHandle>,
    },
    /// Stroked path (orbit circles).
    Line {
        geometry: GeometryHandle,
        material: MaterialHandle,
    },
    AmbientLight { color: Color, intensity: f32 },
    PointLight { color: Color, intensity: f32 },
}

/// A node in the scene graph: local transform + optional parent + payload.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    pub parent: Option<NodeId>,
    pub translation: Vec3,
    /// Euler rotation in radians, applied XYZ.
    pub rotation: Vec3,
    pub kind: NodeKind,
}

impl SceneNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            tag: String::new(),
            parent: None,
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            kind,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local transform of this node relative to its parent.
    pub fn local_transform(&self) -> Affine3A {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Affine3A::from_rotation_translation(rotation, self.translation)
    }
}

/// Flat scene-graph storage.
/// Designed for small node counts (tens, not thousands); lookups scan.
pub struct Scene {
    nodes: Vec<SceneNode>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node to the scene. Insertion order is iteration order.
    pub fn spawn(&mut self, node: SceneNode) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all nodes. Resource handles inside them must already have
    /// been released by the caller.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// World transform of a node, composing parent transforms on demand.
    /// The hierarchy here is at most two levels deep (orbit group → mesh
    /// → ring), so the walk is cheap.
    pub fn world_transform(&self, id: NodeId) -> Affine3A {
        match self.get(id) {
            None => Affine3A::IDENTITY,
            Some(node) => {
                let local = node.local_transform();
                match node.parent {
                    Some(parent) => self.world_transform(parent) * local,
                    None => local,
                }
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
