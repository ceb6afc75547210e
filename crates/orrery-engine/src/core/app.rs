use crate::scene::{SceneContext, SceneGraph};
use crate::time::{FrameTime, LoopControl};

/// Per-frame context passed to [`App::on_frame`].
///
/// The callback mutates local transforms and context slots through this
/// borrow; world matrices are resolved after it returns, never during it.
pub struct FrameCtx<'a> {
    pub graph: &'a mut SceneGraph,
    pub context: &'a mut SceneContext,
    pub time: FrameTime,
}

/// Application contract implemented by scene code.
pub trait App {
    /// Called once per frame, before the resolve pass.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> LoopControl;
}
