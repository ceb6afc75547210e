use std::fmt;

use super::NodeId;

/// A rejected scene-graph operation.
///
/// Every variant is recoverable: the failed operation leaves the graph
/// exactly as it was.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SceneError {
    /// Attaching `child` under `parent` would create a cycle (`child` is
    /// `parent` itself or one of its ancestors).
    Cycle { parent: NodeId, child: NodeId },
    /// The handle does not refer to a live node (removed, or from another
    /// graph).
    UnknownNode(NodeId),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Cycle { parent, child } => {
                write!(f, "attaching {child} under {parent} would create a cycle")
            }
            SceneError::UnknownNode(id) => write!(f, "{id} is not a live node in this graph"),
        }
    }
}

impl std::error::Error for SceneError {}
