//! Asset loading boundary.
//!
//! Responsibilities:
//! - define the resource-loader collaborator contract
//! - track asynchronous resolution of opaque texture/font assets
//!
//! Loading never blocks the frame thread: a handle starts `Pending`, the
//! owning material renders from its placeholder until the handle settles.

mod handle;

pub use handle::{AssetHandle, AssetStatus};

/// Resource-loader collaborator.
///
/// `load` returns immediately with a `Pending` handle; the loader settles it
/// later via [`AssetHandle::fulfill`] or [`AssetHandle::fail`], on the frame
/// thread. The bytes behind a ready handle stay opaque to this core.
pub trait ResourceLoader {
    fn load(&mut self, uri: &str) -> AssetHandle;
}
