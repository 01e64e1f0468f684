//! Prediction run loop
//!
//! Ties together model preparation, folder enumeration, preprocessing, and
//! report writing. The loop is strictly sequential: images are scored one at
//! a time in sorted filename order, and each row is written before the next
//! image is opened. Any failure aborts the run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use burn::{
    module::Module,
    record::CompactRecorder,
    tensor::{activation::softmax, backend::Backend, Tensor},
};
use colored::Colorize;
use tracing::{debug, info};

use crate::dataset::folder::PredictionFolder;
use crate::inference::predictor::{PredictionResult, Predictor};
use crate::inference::report::CsvReportWriter;
use crate::model::alexnet::AlexNet;
use crate::model::config::ModelConfig;
use crate::utils::logging::ProgressLogger;

/// Configuration for a prediction run
#[derive(Debug, Clone)]
pub struct PredictionRunConfig {
    /// Directory of images to score
    pub input_dir: PathBuf,

    /// Path to the trained weight record (CompactRecorder format)
    pub model_path: PathBuf,

    /// Optional path to a model configuration JSON; defaults to the fixed
    /// fine-tuned topology when absent
    pub config_path: Option<PathBuf>,

    /// Path of the CSV report to write
    pub output_path: PathBuf,
}

impl Default for PredictionRunConfig {
    fn default() -> Self {
        // Legacy fixed paths of the original scoring pipeline
        Self {
            input_dir: PathBuf::from("predictVMD"),
            model_path: PathBuf::from("alexnet_trained.mpk"),
            config_path: None,
            output_path: PathBuf::from("alexnet_trained_predictions.csv"),
        }
    }
}

/// Summary of a completed prediction run
#[derive(Debug, Clone)]
pub struct PredictionSummary {
    /// Number of images scored
    pub total_images: usize,
    /// Wall-clock duration of the scoring loop in seconds
    pub elapsed_secs: f64,
    /// Path of the written report
    pub output_path: PathBuf,
}

impl std::fmt::Display for PredictionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prediction Summary:")?;
        writeln!(f, "  Images scored: {}", self.total_images)?;
        writeln!(f, "  Elapsed: {:.2}s", self.elapsed_secs)?;
        if self.total_images > 0 {
            writeln!(
                f,
                "  Throughput: {:.2} images/s",
                self.total_images as f64 / self.elapsed_secs
            )?;
        }
        writeln!(f, "  Report: {:?}", self.output_path)?;
        Ok(())
    }
}

/// Score a single preprocessed image
///
/// The predicted class is the argmax of the raw logits; softmax is applied
/// separately to produce the reported probability distribution.
fn predict_image<B: Backend>(
    model: &AlexNet<B>,
    predictor: &Predictor,
    image: &image::DynamicImage,
    file_name: &str,
    device: &B::Device,
) -> PredictionResult {
    let data = predictor.preprocess(image);
    let size = predictor.image_size as usize;

    // Add the leading batch dimension: [3, H, W] -> [1, 3, H, W]
    let tensor: Tensor<B, 1> = Tensor::from_floats(&data[..], device);
    let input: Tensor<B, 4> = tensor.reshape([1, 3, size, size]);

    let logits = model.forward(input);
    let probs = softmax(logits.clone(), 1);

    let logits_vec: Vec<f32> = logits.into_data().to_vec().unwrap();
    let probs_vec: Vec<f32> = probs.into_data().to_vec().unwrap();

    PredictionResult::from_logits(file_name, &logits_vec, &probs_vec)
}

/// Score every image in a folder, appending one report row per image
///
/// Returns the number of images scored. Rows are written in the folder's
/// sorted enumeration order.
pub fn score_folder<B: Backend>(
    model: &AlexNet<B>,
    predictor: &Predictor,
    folder: &PredictionFolder,
    writer: &mut CsvReportWriter,
    device: &B::Device,
) -> Result<usize> {
    let mut progress = ProgressLogger::new("Scoring", folder.len());

    for file in &folder.files {
        let image = folder.load_image(file)?;
        let result = predict_image(model, predictor, &image, &file.file_name, device);

        debug!(
            "{}: {} ({:.2}%)",
            result.file_name, result.class_name, result.confidence
        );

        writer.write_row(&result)?;
        progress.increment();
    }

    progress.finish();
    Ok(folder.len())
}

/// Run a full prediction pass: prepare the model, enumerate the input
/// directory, score every image, and write the CSV report.
pub fn run_prediction<B: Backend>(
    config: &PredictionRunConfig,
    device: &B::Device,
) -> Result<PredictionSummary> {
    info!("Input directory: {:?}", config.input_dir);
    info!("Model: {:?}", config.model_path);
    info!("Output: {:?}", config.output_path);

    // Model configuration: explicit JSON file, or the fixed fine-tuned shape
    let model_config = match &config.config_path {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };
    model_config.validate()?;

    if !config.model_path.exists() {
        anyhow::bail!("Weight file not found: {:?}", config.model_path);
    }

    // Construct the topology and load the trained weights into it. A shape
    // mismatch between record and topology fails here, before any image is
    // opened; the recorder itself accepts mismatched records, so the shapes
    // are checked explicitly after loading.
    println!("{}", "Loading model...".cyan());
    let recorder = CompactRecorder::new();
    let arch_config = model_config.to_alexnet_config();
    let model: AlexNet<B> = AlexNet::new(&arch_config, device)
        .load_file(&config.model_path, &recorder, device)
        .map_err(|e| anyhow::anyhow!("Failed to load model weights: {:?}", e))?;
    model.validate_shapes(&arch_config)?;

    let folder = PredictionFolder::new(&config.input_dir)?;
    let predictor = Predictor::new().with_image_size(model_config.image_size as u32);
    let mut writer = CsvReportWriter::create(&config.output_path)?;

    println!("{}", "Running predictions...".green().bold());
    let start = Instant::now();
    let total_images = score_folder(&model, &predictor, &folder, &mut writer, device)?;
    writer.finish()?;

    let summary = PredictionSummary {
        total_images,
        elapsed_secs: start.elapsed().as_secs_f64(),
        output_path: config.output_path.clone(),
    };

    Ok(summary)
}

/// Convenience wrapper scoring a directory with an already-loaded model
pub fn score_directory<B: Backend>(
    model: &AlexNet<B>,
    input_dir: &Path,
    output_path: &Path,
    image_size: u32,
    device: &B::Device,
) -> Result<usize> {
    let folder = PredictionFolder::new(input_dir)?;
    let predictor = Predictor::new().with_image_size(image_size);
    let mut writer = CsvReportWriter::create(output_path)?;
    let count = score_folder(model, &predictor, &folder, &mut writer, device)?;
    writer.finish()?;
    Ok(count)
}
