//! Logging utilities.
//!
//! Centralizes logger initialization so the library and any host application
//! agree on a single backend. Everything else in the crate goes through the
//! standard `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
