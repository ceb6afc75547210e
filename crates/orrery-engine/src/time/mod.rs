//! Frame timing and scheduling.
//!
//! Responsibilities:
//! - turn collaborator-supplied timestamps into stable `FrameTime` snapshots
//! - run the update-callback schedule against a frame-pacing collaborator
//!
//! Frames are cooperative and serialized: the pacer keeps one callback in
//! flight, and no frame begins before the previous callback returns.

mod animation_loop;
mod frame_clock;

pub use animation_loop::{AnimationLoop, FramePacer, LoopControl, LoopState};
pub use frame_clock::{FrameClock, FrameTime};
