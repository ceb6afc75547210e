use std::fmt;
use std::sync::Arc;

use glam::Mat4;

use crate::camera::Camera;
use crate::mesh::{Material, MeshBuffer};

use super::{Light, Transform};

/// Stable handle to a node in a [`SceneGraph`](super::SceneGraph).
///
/// A handle is a slot index plus a generation counter, so a handle to a
/// removed node never aliases a node later spawned into the recycled slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {}v{}", self.index, self.generation)
    }
}

/// Content carried by a node beyond its transform.
#[derive(Debug, Clone, Default)]
pub enum NodePayload {
    /// Pure grouping/pivot node (the common case for orbit pivots).
    #[default]
    Group,
    /// Renderable mesh instance. The buffer is shared; demos reuse one
    /// sphere buffer across many nodes.
    Mesh {
        buffer: Arc<MeshBuffer>,
        material: Material,
    },
    Camera(Camera),
    Light(Light),
}

/// A node in the scene graph.
///
/// Nodes are owned by the graph's slot table; parent and child links are
/// [`NodeId`]s, never owning references, so the child→parent back-reference
/// creates no ownership cycle.
#[derive(Debug, Clone)]
pub struct Node {
    /// Optional display name. Not required to be unique; name lookup
    /// returns the first match in traversal order.
    pub name: Option<String>,
    pub transform: Transform,
    pub payload: NodePayload,

    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,

    /// Cached local-to-root matrix, valid only when `dirty` is false.
    pub(super) world_matrix: Mat4,
    pub(super) dirty: bool,
}

impl Node {
    pub(super) fn new(name: Option<String>, payload: NodePayload) -> Self {
        Self {
            name,
            transform: Transform::default(),
            payload,
            parent: None,
            children: Vec::new(),
            world_matrix: Mat4::IDENTITY,
            dirty: true,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attachment order, which is also resolver traversal order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Cached world matrix from the most recent
    /// [`resolve`](super::SceneGraph::resolve) pass. Stale while the node is
    /// dirty.
    #[inline]
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn camera(&self) -> Option<&Camera> {
        match &self.payload {
            NodePayload::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    #[inline]
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        match &mut self.payload {
            NodePayload::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    #[inline]
    pub fn light(&self) -> Option<&Light> {
        match &self.payload {
            NodePayload::Light(light) => Some(light),
            _ => None,
        }
    }

    #[inline]
    pub fn mesh(&self) -> Option<(&Arc<MeshBuffer>, &Material)> {
        match &self.payload {
            NodePayload::Mesh { buffer, material } => Some((buffer, material)),
            _ => None,
        }
    }
}
