//! Origami Classifier CLI
//!
//! Batch scoring of DNA origami microscopy images with a fine-tuned AlexNet.
//! Running `predict` with no flags reproduces the legacy fixed-path behavior
//! of the original scoring pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use origami_classifier::backend::{backend_name, default_device, DefaultBackend};
use origami_classifier::dataset::folder::PredictionFolder;
use origami_classifier::dataset::{origami_count, CLASS_NAMES};
use origami_classifier::inference::runner::{run_prediction, PredictionRunConfig};
use origami_classifier::utils::logging::{init_logging, LogConfig};

/// DNA Origami Image Classification
///
/// Scores a folder of microscopy images with a fine-tuned AlexNet and writes
/// a CSV of predicted labels and per-class probabilities.
#[derive(Parser, Debug)]
#[command(name = "origami_classifier")]
#[command(version = "0.1.0")]
#[command(about = "Batch AlexNet scoring of DNA origami images", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a folder of images and write the prediction CSV
    Predict {
        /// Directory of images to score
        #[arg(short, long, default_value = "predictVMD")]
        input_dir: String,

        /// Path to the trained weight record
        #[arg(short, long, default_value = "alexnet_trained.mpk")]
        model: String,

        /// Optional model configuration JSON (topology parameters)
        #[arg(long)]
        config: Option<String>,

        /// Output CSV file path
        #[arg(short, long, default_value = "alexnet_trained_predictions.csv")]
        output: String,
    },

    /// Print the class label mapping
    Classes,

    /// Show statistics for a prediction folder
    Stats {
        /// Directory of images to inspect
        #[arg(short, long, default_value = "predictVMD")]
        input_dir: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    let _ = init_logging(&log_config);

    match cli.command {
        Commands::Predict {
            input_dir,
            model,
            config,
            output,
        } => cmd_predict(&input_dir, &model, config.as_deref(), &output)?,
        Commands::Classes => cmd_classes(),
        Commands::Stats { input_dir } => cmd_stats(&input_dir)?,
    }

    Ok(())
}

fn cmd_predict(input_dir: &str, model: &str, config: Option<&str>, output: &str) -> Result<()> {
    info!("Starting prediction run");

    println!("{}", "Prediction Configuration:".cyan().bold());
    println!("  Input:   {}", input_dir);
    println!("  Model:   {}", model);
    println!("  Output:  {}", output);
    println!("  Backend: {}", backend_name());
    println!();

    let run_config = PredictionRunConfig {
        input_dir: PathBuf::from(input_dir),
        model_path: PathBuf::from(model),
        config_path: config.map(PathBuf::from),
        output_path: PathBuf::from(output),
    };

    let device = default_device();
    let summary = run_prediction::<DefaultBackend>(&run_config, &device)?;

    println!();
    println!("{}", "Prediction complete!".green().bold());
    print!("{}", summary);

    Ok(())
}

fn cmd_classes() {
    println!("{}", "Class Labels:".cyan().bold());
    for (idx, name) in CLASS_NAMES.iter().enumerate() {
        let tiles = origami_count(idx).unwrap_or(0);
        println!("  {}. {:14} ({} origami tiles)", idx, name, tiles);
    }
}

fn cmd_stats(input_dir: &str) -> Result<()> {
    let folder = PredictionFolder::new(input_dir)?;

    println!("{}", "Folder Statistics:".cyan().bold());
    println!("  Directory: {:?}", folder.root_dir);
    println!("  Images queued: {}", folder.len());

    if folder.is_empty() {
        println!();
        println!(
            "{} No allow-listed images found (extensions: jpg, png, jpeg)",
            "Note:".yellow()
        );
    } else {
        println!();
        println!("  First: {}", folder.files[0].file_name);
        println!("  Last:  {}", folder.files[folder.len() - 1].file_name);
    }

    Ok(())
}
