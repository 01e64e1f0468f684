//! Prediction folder enumeration
//!
//! Handles discovery of image files in the input directory. Files are
//! filtered by a fixed extension allow-list and returned in lexicographic
//! filename order so repeated runs produce identical output.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::utils::error::{ClassifierError, Result};

/// Extensions accepted for prediction input.
///
/// Matched case-sensitively, mirroring the legacy pipeline: `IMG.JPG` is
/// skipped, `img.jpg` is scored.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];

/// A single image file queued for prediction
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// Full path to the image
    pub path: PathBuf,
    /// File name component, as written to the report
    pub file_name: String,
}

/// A folder of images to be scored, enumerated once at startup
#[derive(Debug)]
pub struct PredictionFolder {
    /// Root directory of the folder
    pub root_dir: PathBuf,
    /// Allow-listed image files in sorted filename order
    pub files: Vec<ImageFile>,
}

impl PredictionFolder {
    /// Enumerate a prediction folder
    ///
    /// Fails if the directory does not exist. Non-image files and files with
    /// extensions outside the allow-list are silently skipped.
    pub fn new<P: AsRef<Path>>(root_dir: P) -> Result<Self> {
        let root_dir = root_dir.as_ref().to_path_buf();
        info!("Enumerating prediction folder: {:?}", root_dir);

        if !root_dir.is_dir() {
            return Err(ClassifierError::PathNotFound(root_dir));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&root_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path().to_path_buf();
            if !path.is_file() {
                continue;
            }

            // Case-sensitive extension filter
            let allowed = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| ALLOWED_EXTENSIONS.contains(&e))
                .unwrap_or(false);
            if !allowed {
                debug!("Skipping non-image file: {:?}", path);
                continue;
            }

            let file_name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            files.push(ImageFile { path, file_name });
        }

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        info!("Found {} image files", files.len());

        Ok(Self { root_dir, files })
    }

    /// Get the number of images queued for prediction
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the folder has no allow-listed images
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Load an image from disk
    ///
    /// Any read or decode failure is fatal for the run; there is no retry or
    /// skip path for corrupt input.
    pub fn load_image(&self, file: &ImageFile) -> Result<DynamicImage> {
        let img = ImageReader::open(&file.path)
            .map_err(|e| ClassifierError::ImageLoad(file.path.clone(), e.to_string()))?
            .decode()
            .map_err(|e| ClassifierError::ImageLoad(file.path.clone(), e.to_string()))?;

        Ok(img)
    }
}
