//! Image preprocessing and prediction results
//!
//! The preprocessing pipeline mirrors the training-time transform exactly:
//! resize to the model's input size, coerce to RGB, normalize each channel
//! with the ImageNet statistics, and lay the data out CHW. No randomness is
//! involved; repeated runs over the same file produce identical tensors.

use image::{imageops::FilterType, DynamicImage};
use serde::{Deserialize, Serialize};

use crate::dataset::class_name;
use crate::inference::PROBABILITY_SCALE;

/// ImageNet normalization mean values (RGB)
const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// ImageNet normalization std values (RGB)
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Resize an image to the target dimensions
fn resize_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Normalize an image to a flat vector with ImageNet normalization
/// Returns CHW layout: [C, H, W] flattened
fn normalize_image(image: &DynamicImage) -> Vec<f32> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let num_pixels = (width * height) as usize;

    let mut normalized = vec![0.0f32; 3 * num_pixels];

    for (i, pixel) in rgb.pixels().enumerate() {
        let r = (pixel[0] as f32 / 255.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
        let g = (pixel[1] as f32 / 255.0 - IMAGENET_MEAN[1]) / IMAGENET_STD[1];
        let b = (pixel[2] as f32 / 255.0 - IMAGENET_MEAN[2]) / IMAGENET_STD[2];

        // CHW layout: all R values, then all G values, then all B values
        normalized[i] = r;
        normalized[num_pixels + i] = g;
        normalized[2 * num_pixels + i] = b;
    }

    normalized
}

/// Preprocessor turning raw images into model input data
#[derive(Debug, Clone)]
pub struct Predictor {
    /// Target image size for preprocessing
    pub image_size: u32,
}

impl Default for Predictor {
    fn default() -> Self {
        Self {
            image_size: crate::IMAGE_SIZE as u32,
        }
    }
}

impl Predictor {
    /// Create a new predictor with the default input size
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure image size
    pub fn with_image_size(mut self, size: u32) -> Self {
        self.image_size = size;
        self
    }

    /// Preprocess an image for inference
    ///
    /// Returns normalized CHW data of length `3 * image_size * image_size`,
    /// ready to be reshaped into a [1, 3, H, W] tensor.
    pub fn preprocess(&self, image: &DynamicImage) -> Vec<f32> {
        let resized = resize_image(image, self.image_size, self.image_size);
        normalize_image(&resized)
    }
}

/// Result of a single prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// File name of the scored image
    pub file_name: String,

    /// Predicted class index (argmax of the raw logits)
    pub predicted_class: usize,

    /// Predicted class name
    pub class_name: String,

    /// Probability distribution over all classes, as percentages
    pub probabilities: Vec<f32>,

    /// Percentage probability of the predicted class
    pub confidence: f32,
}

impl PredictionResult {
    /// Build a result from raw model output
    ///
    /// The predicted class is the argmax of the logits; `softmax_probs` is
    /// the softmax of the same logits and gets scaled to percentages here.
    pub fn from_logits(file_name: &str, logits: &[f32], softmax_probs: &[f32]) -> Self {
        let predicted_class = logits
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
            .unwrap_or(0);

        let probabilities: Vec<f32> = softmax_probs.iter().map(|p| p * PROBABILITY_SCALE).collect();
        let confidence = probabilities.get(predicted_class).copied().unwrap_or(0.0);

        let class_name_str = class_name(predicted_class).unwrap_or("Unknown").to_string();

        Self {
            file_name: file_name.to_string(),
            predicted_class,
            class_name: class_name_str,
            probabilities,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_output_length() {
        let img = DynamicImage::new_rgb8(100, 80);
        let predictor = Predictor::new();
        let data = predictor.preprocess(&img);
        assert_eq!(data.len(), 3 * 224 * 224);
    }

    #[test]
    fn test_preprocess_coerces_grayscale_to_rgb() {
        let img = DynamicImage::new_luma8(64, 64);
        let predictor = Predictor::new();
        let data = predictor.preprocess(&img);
        assert_eq!(data.len(), 3 * 224 * 224);
    }

    #[test]
    fn test_preprocess_is_deterministic() {
        let img = DynamicImage::new_rgb8(50, 50);
        let predictor = Predictor::new();
        assert_eq!(predictor.preprocess(&img), predictor.preprocess(&img));
    }

    #[test]
    fn test_normalization_of_black_image() {
        // An all-zero image normalizes to -mean/std per channel
        let img = DynamicImage::new_rgb8(2, 2);
        let predictor = Predictor::new().with_image_size(2);
        let data = predictor.preprocess(&img);

        let expected_r = -IMAGENET_MEAN[0] / IMAGENET_STD[0];
        let expected_b = -IMAGENET_MEAN[2] / IMAGENET_STD[2];
        assert!((data[0] - expected_r).abs() < 1e-5);
        assert!((data[8] - expected_b).abs() < 1e-5);
    }

    #[test]
    fn test_from_logits_argmax() {
        let logits = [0.1, 2.5, -0.3, 1.0, 0.0, 0.2];
        let probs = [0.05, 0.60, 0.02, 0.18, 0.05, 0.10];
        let result = PredictionResult::from_logits("frame.jpg", &logits, &probs);

        assert_eq!(result.predicted_class, 1);
        assert_eq!(result.class_name, "1QD-2origami");
        assert!((result.confidence - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_logits_scales_to_percentages() {
        let logits = [0.0; 6];
        let probs = [1.0 / 6.0; 6];
        let result = PredictionResult::from_logits("uniform.png", &logits, &probs);

        let sum: f32 = result.probabilities.iter().sum();
        assert!((sum - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_from_logits_tolerates_nan() {
        // Degenerate weight records can produce NaN logits; the argmax must
        // not panic on them
        let logits = [0.5, f32::NAN, 0.1, 0.2, 0.0, 0.3];
        let probs = [0.3, 0.1, 0.1, 0.2, 0.1, 0.2];
        let result = PredictionResult::from_logits("degenerate.jpg", &logits, &probs);

        assert!(result.predicted_class < logits.len());
    }

    #[test]
    fn test_favoring_index_two_yields_third_label() {
        let logits = [0.0, 0.1, 9.0, 0.2, 0.1, 0.0];
        let probs = [0.01, 0.01, 0.95, 0.01, 0.01, 0.01];
        let result = PredictionResult::from_logits("strong.jpg", &logits, &probs);

        assert_eq!(result.class_name, "1QD-3origami");
        let max = result
            .probabilities
            .iter()
            .cloned()
            .fold(f32::MIN, f32::max);
        assert_eq!(max, result.confidence);
    }
}
