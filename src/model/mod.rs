//! Model module for the AlexNet architecture using the Burn framework
//!
//! This module provides:
//! - The AlexNet topology with configurable input channels and class count
//! - Model configuration with JSON persistence
//!
//! The first convolution is sized from the configured channel count and the
//! final fully-connected layer from the configured class count; everything
//! in between is the fixed AlexNet layout the weights were trained against.

pub mod alexnet;
pub mod config;

// Re-export main types for convenience
pub use alexnet::{AlexNet, AlexNetConfig};
pub use config::ModelConfig;

/// Default dropout rate used when the model was trained
pub const DEFAULT_DROPOUT: f64 = 0.5;
