//! Core per-frame contracts.
//!
//! This module defines the stable interface between the frame loop and scene
//! code: the [`App`] callback contract, the per-frame context it receives,
//! and the fixed update → resolve → render frame order.

mod app;
mod frame;

pub use app::{App, FrameCtx};
pub use frame::run_frame;
