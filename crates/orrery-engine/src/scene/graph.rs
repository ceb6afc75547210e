use glam::{Mat4, Vec3};

use crate::camera::Camera;

use super::{Node, NodeId, NodePayload, SceneError, Transform, look_at_rotation};

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-stored transform hierarchy.
///
/// The graph owns every node in a flat slot table; parent/child links are
/// [`NodeId`]s. Removing a subtree frees its slots and bumps their
/// generations, so stale handles are rejected instead of aliasing recycled
/// slots.
///
/// All mutation is expected to happen on the frame thread, between frames or
/// inside the update callback; [`resolve`](Self::resolve) is then run once
/// per frame before the renderer consumes world matrices.
#[derive(Debug, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl SceneGraph {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Spawns a detached, unnamed group node.
    #[inline]
    pub fn spawn(&mut self) -> NodeId {
        self.spawn_with(None, NodePayload::Group)
    }

    /// Spawns a detached node with the given name and payload.
    ///
    /// Names need not be unique; see [`find_by_name`](Self::find_by_name).
    pub fn spawn_with(&mut self, name: Option<&str>, payload: NodePayload) -> NodeId {
        let node = Node::new(name.map(str::to_owned), payload);
        self.live += 1;

        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Spawns a node and attaches it under `parent` in one step.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: Option<&str>,
        payload: NodePayload,
    ) -> Result<NodeId, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let child = self.spawn_with(name, payload);
        // A freshly spawned node cannot be an ancestor of anything.
        self.attach(parent, child)?;
        Ok(child)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.get(id)
    }

    /// Mutable access to a node's payload.
    ///
    /// Payload changes never invalidate world matrices, so no dirty marking
    /// is involved. Transform changes go through
    /// [`set_local_transform`](Self::set_local_transform) or
    /// [`update_transform`](Self::update_transform) instead.
    #[inline]
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut NodePayload> {
        self.get_mut(id).map(|node| &mut node.payload)
    }

    /// Mutable access to the camera payload of `id`, if it has one.
    #[inline]
    pub fn camera_mut(&mut self, id: NodeId) -> Option<&mut Camera> {
        self.get_mut(id).and_then(Node::camera_mut)
    }

    /// Makes `child` the last child of `parent`.
    ///
    /// If `child` already has a parent it is detached from it first, so a
    /// node never has more than one parent. Fails with
    /// [`SceneError::Cycle`] when `child` is `parent` or an ancestor of
    /// `parent`; a failed attach leaves the graph unchanged.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(SceneError::UnknownNode(child));
        }

        // Reject cycles before touching any link.
        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(SceneError::Cycle { parent, child });
            }
            ancestor = self.node_ref(id).parent;
        }

        self.unlink_from_parent(child);

        self.node_mut_ref(child).parent = Some(parent);
        self.node_mut_ref(parent).children.push(child);

        // The child's world matrix now composes through a different chain;
        // its descendants are picked up by the resolver's parent-changed
        // propagation.
        self.node_mut_ref(child).dirty = true;
        Ok(())
    }

    /// Detaches `id` from its parent, making it a subtree root.
    ///
    /// No-op (not an error) when the node is already a root.
    pub fn detach(&mut self, id: NodeId) -> Result<(), SceneError> {
        if !self.contains(id) {
            return Err(SceneError::UnknownNode(id));
        }
        if self.node_ref(id).parent.is_some() {
            self.unlink_from_parent(id);
            self.node_mut_ref(id).dirty = true;
        }
        Ok(())
    }

    /// Detaches `id` and destroys it together with every descendant.
    ///
    /// All handles into the removed subtree become stale and are rejected by
    /// later operations.
    pub fn remove(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.detach(id)?;

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let slot = &mut self.slots[current.index as usize];
            let node = slot
                .node
                .take()
                .expect("subtree links always reference live nodes");
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(current.index);
            self.live -= 1;
            pending.extend_from_slice(&node.children);
        }
        Ok(())
    }

    /// Replaces the node's local transform and marks it and every descendant
    /// dirty (a descendant's world matrix depends on every ancestor's local
    /// matrix).
    pub fn set_local_transform(
        &mut self,
        id: NodeId,
        transform: Transform,
    ) -> Result<(), SceneError> {
        if !self.contains(id) {
            return Err(SceneError::UnknownNode(id));
        }
        self.node_mut_ref(id).transform = transform;
        self.mark_subtree_dirty(id);
        Ok(())
    }

    /// Mutates the node's local transform in place, with the same dirty
    /// marking as [`set_local_transform`](Self::set_local_transform).
    pub fn update_transform(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut Transform),
    ) -> Result<(), SceneError> {
        if !self.contains(id) {
            return Err(SceneError::UnknownNode(id));
        }
        f(&mut self.node_mut_ref(id).transform);
        self.mark_subtree_dirty(id);
        Ok(())
    }

    /// Depth-first name lookup over the subtree rooted at `root`, including
    /// `root` itself.
    ///
    /// Returns the first match in traversal order (children in attachment
    /// order). Duplicate names are allowed; which duplicate wins is defined
    /// by traversal order alone. A miss is a normal outcome, not an error.
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if node.name.as_deref() == Some(name) {
                return Some(id);
            }
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// Rotates the node so its local −Z axis points at `target` in world
    /// space, with an up-hint of world +Y.
    ///
    /// When `target` coincides with the node's world position the previous
    /// orientation is kept and no error is raised.
    pub fn look_at(&mut self, id: NodeId, target: Vec3) -> Result<(), SceneError> {
        if !self.contains(id) {
            return Err(SceneError::UnknownNode(id));
        }

        let parent_world = match self.node_ref(id).parent {
            Some(parent) => self.exact_world(parent),
            None => Mat4::IDENTITY,
        };
        let eye = (parent_world * self.node_ref(id).transform.local_matrix())
            .to_scale_rotation_translation()
            .2;

        let Some(world_rotation) = look_at_rotation(eye, target, Vec3::Y) else {
            log::debug!("look_at for {id} skipped: target coincides with node position");
            return Ok(());
        };

        // The computed orientation is in world space; express it relative to
        // the parent's rotation.
        let parent_rotation = parent_world.to_scale_rotation_translation().1;
        let local_rotation = parent_rotation.inverse() * world_rotation;

        self.update_transform(id, |t| t.rotation = local_rotation)
    }

    /// Cached world matrix from the last [`resolve`](Self::resolve) pass.
    #[inline]
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.get(id).map(Node::world_matrix)
    }

    /// Root node ids (nodes with no parent), in slot order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Iterates live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }

    /// Visits every node reachable from a root, depth-first with children in
    /// attachment order. This is the deterministic traversal order shared by
    /// name lookup and frame extraction.
    pub fn visit<'g>(&'g self, mut f: impl FnMut(NodeId, &'g Node)) {
        let mut stack = self.roots();
        stack.reverse();
        while let Some(id) = stack.pop() {
            let node = self.node_ref(id);
            f(id, node);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Recomputes stale world matrices, top-down.
    ///
    /// A node is recomputed when it is marked dirty or when its parent's
    /// world matrix changed during this pass; its dirty flag is cleared only
    /// after the recomputation. Clean subtrees under clean ancestors are
    /// skipped entirely.
    pub fn resolve(&mut self) {
        let mut stack: Vec<(NodeId, Mat4, bool)> = self
            .roots()
            .into_iter()
            .rev()
            .map(|id| (id, Mat4::IDENTITY, false))
            .collect();

        while let Some((id, parent_world, parent_changed)) = stack.pop() {
            let node = self.node_mut_ref(id);
            let changed = node.dirty || parent_changed;
            if changed {
                node.world_matrix = parent_world * node.transform.local_matrix();
                node.dirty = false;
            }
            let world = node.world_matrix;
            for &child in node.children.iter().rev() {
                stack.push((child, world, changed));
            }
        }
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn get(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    /// Like [`get`](Self::get), for ids already validated by the caller.
    fn node_ref(&self, id: NodeId) -> &Node {
        self.get(id).expect("graph links always reference live nodes")
    }

    fn node_mut_ref(&mut self, id: NodeId) -> &mut Node {
        self.get_mut(id)
            .expect("graph links always reference live nodes")
    }

    fn unlink_from_parent(&mut self, child: NodeId) {
        if let Some(parent) = self.node_ref(child).parent {
            self.node_mut_ref(parent).children.retain(|&c| c != child);
            self.node_mut_ref(child).parent = None;
        }
    }

    fn mark_subtree_dirty(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = self.node_mut_ref(current);
            node.dirty = true;
            pending.extend_from_slice(&node.children);
        }
    }

    /// Exact world matrix composed along the ancestor chain, independent of
    /// cache state. Used where an up-to-date position is needed outside a
    /// resolve pass (e.g. look-at targeting).
    fn exact_world(&self, id: NodeId) -> Mat4 {
        let node = self.node_ref(id);
        let local = node.transform.local_matrix();
        match node.parent {
            Some(parent) => self.exact_world(parent) * local,
            None => local,
        }
    }
}
