//! # Origami Classifier
//!
//! A Rust library for batch classification of DNA origami microscopy images
//! using a fine-tuned AlexNet built with the Burn framework.
//!
//! The tool is a single-purpose offline scorer: it loads trained weights into
//! a fixed AlexNet topology, iterates over a folder of images in filename
//! order, and writes one CSV row per image with the predicted label and the
//! full per-class probability distribution.
//!
//! ## Modules
//!
//! - `dataset`: Class label mapping and input folder enumeration
//! - `model`: AlexNet architecture built with Burn
//! - `inference`: Preprocessing, prediction, and CSV report writing
//! - `utils`: Logging and error types
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use origami_classifier::backend::{default_device, DefaultBackend};
//! use origami_classifier::inference::runner::{run_prediction, PredictionRunConfig};
//!
//! let config = PredictionRunConfig::default();
//! let summary = run_prediction::<DefaultBackend>(&config, &default_device())?;
//! ```

pub mod backend;
pub mod dataset;
pub mod inference;
pub mod model;
pub mod utils;

// Re-export commonly used items for convenience
pub use dataset::folder::PredictionFolder;
pub use dataset::{class_index, class_name, CLASS_NAMES};
pub use inference::predictor::{PredictionResult, Predictor};
pub use inference::report::CsvReportWriter;
pub use inference::runner::{run_prediction, PredictionRunConfig, PredictionSummary};
pub use model::alexnet::{AlexNet, AlexNetConfig};
pub use model::config::ModelConfig;
pub use utils::error::{ClassifierError, Result};

/// Number of origami classes
pub const NUM_CLASSES: usize = 6;

/// Input image size expected by AlexNet (224x224)
pub const IMAGE_SIZE: usize = 224;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
