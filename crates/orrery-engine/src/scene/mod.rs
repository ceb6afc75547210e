//! Retained scene graph.
//!
//! Responsibilities:
//! - own all nodes in an arena slot table (links are ids, never references)
//! - maintain the parent-to-world transform composition with dirty tracking
//! - provide name lookup and look-at targeting over the hierarchy
//!
//! One [`SceneGraph::resolve`] pass per frame recomputes stale world
//! matrices before the renderer collaborator reads them.

mod context;
mod error;
mod graph;
mod light;
mod node;
mod transform;

pub use context::SceneContext;
pub use error::SceneError;
pub use graph::SceneGraph;
pub use light::{Light, LightKind};
pub use node::{Node, NodeId, NodePayload};
pub use transform::{Transform, look_at_rotation};
