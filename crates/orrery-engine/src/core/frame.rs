use anyhow::{Context, Result};

use crate::render::{RenderFrame, Renderer};
use crate::scene::{SceneContext, SceneGraph};
use crate::time::{FrameTime, LoopControl};

use super::{App, FrameCtx};

/// Runs one frame in the fixed order: update callback, resolve pass,
/// renderer collaborator.
///
/// Resize and input must already have been applied before this is called;
/// nothing mutates the graph between the resolve pass and the render call.
/// When the context names no live camera node the render call is skipped
/// for the frame, which keeps headless updates (and startup frames before a
/// camera exists) valid.
pub fn run_frame<A: App, R: Renderer>(
    app: &mut A,
    graph: &mut SceneGraph,
    context: &mut SceneContext,
    renderer: &mut R,
    time: FrameTime,
) -> Result<LoopControl> {
    let control = app.on_frame(&mut FrameCtx {
        graph: &mut *graph,
        context: &mut *context,
        time,
    });

    graph.resolve();

    match context.active_camera {
        Some(camera) if graph.node(camera).is_some_and(|node| node.camera().is_some()) => {
            renderer
                .render(&RenderFrame::new(graph, camera))
                .context("renderer collaborator failed")?;
        }
        Some(camera) => {
            log::warn!("active camera {camera} is not a live camera node; frame not rendered");
        }
        None => {}
    }

    Ok(control)
}
