//! Orrery engine crate.
//!
//! This crate owns the retained scene substrate consumed by renderer layers:
//! the transform hierarchy, mesh buffers, cameras, and the frame loop.

pub mod assets;
pub mod camera;
pub mod core;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod time;

pub mod logging;
