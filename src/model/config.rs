//! Model Configuration Module
//!
//! Defines the serializable model configuration, persisted as JSON next to
//! the trained weight record so a run can reconstruct the exact topology the
//! weights were trained against.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::alexnet::AlexNetConfig;
use crate::utils::error::{ClassifierError, Result};

/// Configuration for the AlexNet model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Number of output classes
    pub num_classes: usize,

    /// Number of input channels (3 for RGB)
    pub in_channels: usize,

    /// Input image size (width and height, assumed square)
    pub image_size: usize,

    /// Dropout rate used during training (0.0 to 1.0)
    pub dropout_rate: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            num_classes: crate::NUM_CLASSES,
            in_channels: 3,
            image_size: crate::IMAGE_SIZE,
            dropout_rate: crate::model::DEFAULT_DROPOUT,
        }
    }
}

impl ModelConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_classes == 0 {
            return Err(ClassifierError::Config(
                "num_classes must be greater than 0".to_string(),
            ));
        }

        if self.in_channels == 0 {
            return Err(ClassifierError::Config(
                "in_channels must be greater than 0".to_string(),
            ));
        }

        // AlexNet's stride-4 stem and three pooling stages need at least 63px
        if self.image_size < 63 {
            return Err(ClassifierError::Config(
                "image_size must be at least 63".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.dropout_rate) {
            return Err(ClassifierError::Config(
                "dropout_rate must be in range [0.0, 1.0)".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the Burn-side architecture config from this configuration
    pub fn to_alexnet_config(&self) -> AlexNetConfig {
        AlexNetConfig::new()
            .with_num_classes(self.num_classes)
            .with_in_channels(self.in_channels)
            .with_dropout(self.dropout_rate)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ClassifierError::Serialization(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&json).map_err(|e| ClassifierError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
