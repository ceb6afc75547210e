use super::NodeId;

/// Named slots for cross-frame scene state.
///
/// Update callbacks that need to keep referring to particular nodes (the
/// active camera, lights to animate, a target the camera tracks) store their
/// handles here instead of in ad hoc mutable fields. The context is passed
/// into every update callback alongside the graph.
#[derive(Debug, Clone, Default)]
pub struct SceneContext {
    /// Camera node the renderer should use this frame.
    pub active_camera: Option<NodeId>,
    /// Light nodes mutated by the update callback.
    pub lights: Vec<NodeId>,
    /// Node the camera (or a light) follows.
    pub tracked_target: Option<NodeId>,
}

impl SceneContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}
