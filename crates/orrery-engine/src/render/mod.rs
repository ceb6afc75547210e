//! Renderer collaborator boundary.
//!
//! Responsibilities:
//! - define the contract a renderer implements against this core
//! - extract the resolved frame data (world matrices, meshes, lights,
//!   camera matrices) in deterministic traversal order
//!
//! Rasterization, shading, and GPU resource lifecycle live entirely behind
//! [`Renderer`]; this module only hands over consistent, already-resolved
//! data.

use anyhow::Result;
use glam::Mat4;

use crate::camera::Camera;
use crate::mesh::{Material, MeshBuffer};
use crate::scene::{Light, NodeId, SceneGraph};

/// One renderable mesh instance extracted from the resolved graph.
#[derive(Debug)]
pub struct MeshDraw<'a> {
    pub node: NodeId,
    pub world_matrix: Mat4,
    pub buffer: &'a MeshBuffer,
    pub material: &'a Material,
}

/// One light extracted from the resolved graph. Oriented kinds shine along
/// the node's world −Z axis.
#[derive(Debug)]
pub struct LightDraw<'a> {
    pub node: NodeId,
    pub world_matrix: Mat4,
    pub light: &'a Light,
}

/// Borrow of a resolved scene plus the camera to render it with.
///
/// Built after the frame's [`resolve`](SceneGraph::resolve) pass; every
/// world matrix read through it is current for this frame.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    graph: &'a SceneGraph,
    camera_node: NodeId,
}

impl<'a> RenderFrame<'a> {
    pub fn new(graph: &'a SceneGraph, camera_node: NodeId) -> Self {
        Self { graph, camera_node }
    }

    #[inline]
    pub fn scene(&self) -> &'a SceneGraph {
        self.graph
    }

    pub fn camera(&self) -> Option<&'a Camera> {
        self.graph.node(self.camera_node)?.camera()
    }

    /// World-to-camera matrix: the inverse of the camera node's world
    /// matrix.
    pub fn view_matrix(&self) -> Option<Mat4> {
        let world = self.graph.world_matrix(self.camera_node)?;
        Some(Camera::view_matrix(world))
    }

    pub fn projection_matrix(&self) -> Option<Mat4> {
        Some(self.camera()?.projection_matrix())
    }

    /// Mesh instances in depth-first traversal order (children in
    /// attachment order); the same order on every frame for an unchanged
    /// graph.
    pub fn mesh_draws(&self) -> Vec<MeshDraw<'a>> {
        let mut draws = Vec::new();
        self.graph.visit(|node, data| {
            if let Some((buffer, material)) = data.mesh() {
                draws.push(MeshDraw {
                    node,
                    world_matrix: data.world_matrix(),
                    buffer: buffer.as_ref(),
                    material,
                });
            }
        });
        draws
    }

    /// Lights in the same deterministic traversal order as
    /// [`mesh_draws`](Self::mesh_draws).
    pub fn light_draws(&self) -> Vec<LightDraw<'a>> {
        let mut draws = Vec::new();
        self.graph.visit(|node, data| {
            if let Some(light) = data.light() {
                draws.push(LightDraw {
                    node,
                    world_matrix: data.world_matrix(),
                    light,
                });
            }
        });
        draws
    }
}

/// Renderer collaborator.
///
/// Consumes a frame's resolved data and produces pixels. Internal error
/// recovery is the renderer's own concern; anything it surfaces here aborts
/// the frame, not the process.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use glam::{Vec3, Vec4};

    use crate::mesh::primitives;
    use crate::scene::{Light, LightKind, NodePayload, Transform};

    fn mesh_payload(color: Vec4) -> NodePayload {
        NodePayload::Mesh {
            buffer: Arc::new(primitives::box_mesh(1.0, 1.0, 1.0)),
            material: Material::from_color(color),
        }
    }

    // ── extraction ────────────────────────────────────────────────────────

    #[test]
    fn mesh_draws_follow_traversal_order_with_resolved_matrices() {
        let mut graph = SceneGraph::new();
        let root = graph.spawn();
        let first = graph
            .spawn_child(root, Some("a"), mesh_payload(Vec4::X))
            .unwrap();
        let second = graph
            .spawn_child(first, Some("b"), mesh_payload(Vec4::Y))
            .unwrap();
        let third = graph
            .spawn_child(root, Some("c"), mesh_payload(Vec4::Z))
            .unwrap();

        graph
            .set_local_transform(root, Transform::from_position(Vec3::new(2.0, 0.0, 0.0)))
            .unwrap();
        graph.resolve();

        let camera = graph
            .spawn_child(root, None, NodePayload::Camera(Camera::default()))
            .unwrap();
        graph.resolve();

        let frame = RenderFrame::new(&graph, camera);
        let draws = frame.mesh_draws();

        // Depth-first: first's subtree before the later sibling.
        let order: Vec<NodeId> = draws.iter().map(|d| d.node).collect();
        assert_eq!(order, vec![first, second, third]);

        for draw in &draws {
            let pos = draw.world_matrix.to_scale_rotation_translation().2;
            assert_eq!(pos.x, 2.0);
        }
    }

    #[test]
    fn camera_matrices_come_from_the_camera_node() {
        let mut graph = SceneGraph::new();
        let camera_node = graph.spawn_with(None, NodePayload::Camera(Camera::default()));
        graph
            .set_local_transform(
                camera_node,
                Transform::from_position(Vec3::new(0.0, 0.0, 5.0)),
            )
            .unwrap();
        graph.resolve();

        let frame = RenderFrame::new(&graph, camera_node);
        let view = frame.view_matrix().unwrap();

        // A point at the camera's position maps to the view-space origin.
        assert_eq!(view.transform_point3(Vec3::new(0.0, 0.0, 5.0)), Vec3::ZERO);
        assert_eq!(
            frame.projection_matrix().unwrap(),
            Camera::default().projection_matrix()
        );
    }

    #[test]
    fn non_camera_node_yields_no_camera() {
        let mut graph = SceneGraph::new();
        let group = graph.spawn();
        graph.resolve();

        let frame = RenderFrame::new(&graph, group);
        assert!(frame.camera().is_none());
        assert!(frame.view_matrix().is_some());
        assert!(frame.projection_matrix().is_none());
    }

    #[test]
    fn light_draws_collect_every_light_kind() {
        let mut graph = SceneGraph::new();
        let root = graph.spawn();
        let kinds = [
            LightKind::Directional,
            LightKind::Point { range: 10.0 },
            LightKind::Hemisphere {
                ground_color: Vec3::new(0.73, 0.48, 0.11),
            },
            LightKind::RectArea {
                width: 10.0,
                height: 1.0,
            },
        ];
        for kind in kinds {
            graph
                .spawn_child(root, None, NodePayload::Light(Light::new(kind)))
                .unwrap();
        }
        graph.resolve();

        let frame = RenderFrame::new(&graph, root);
        let lights = frame.light_draws();
        assert_eq!(lights.len(), kinds.len());
        for (draw, kind) in lights.iter().zip(kinds) {
            assert_eq!(draw.light.kind, kind);
        }
    }
}
