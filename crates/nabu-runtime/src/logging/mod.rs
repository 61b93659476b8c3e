//! Logging utilities.
//!
//! This module centralizes logger initialization for the runtime and its
//! host drivers. It sticks to the standard `log` facade; listener errors
//! caught at the dispatch boundary are reported through it as well.

mod init;

pub use init::{init_logging, LoggingConfig};
