//! Utility modules: error types and logging
//!
//! This module provides:
//! - Custom error types for classifier operations
//! - Structured logging setup and progress reporting

pub mod error;
pub mod logging;

pub use error::{ClassifierError, Result};
pub use logging::{init_logging, LogConfig, ProgressLogger};
