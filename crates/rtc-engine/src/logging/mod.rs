//! Logging utilities.
//!
//! This module centralizes logger initialization. Everything else in the
//! workspace logs through the standard `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
