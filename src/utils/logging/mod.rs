//! Logging utilities
//!
//! Installs the process-wide `tracing` subscriber.

mod init;

pub use init::{build_filter, init_logging};
