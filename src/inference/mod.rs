//! Inference module for batch image scoring
//!
//! This module provides:
//! - Deterministic image preprocessing and single-image prediction
//! - The CSV report writer with the frozen legacy output format
//! - The sequential run loop tying model, folder, and report together

pub mod predictor;
pub mod report;
pub mod runner;

// Re-export main types for convenience
pub use predictor::{PredictionResult, Predictor};
pub use report::CsvReportWriter;
pub use runner::{run_prediction, PredictionRunConfig, PredictionSummary};

/// Probabilities are reported as percentages (softmax output x 100)
pub const PROBABILITY_SCALE: f32 = 100.0;
