//! CSV report writer
//!
//! Writes the prediction report in the frozen legacy format:
//!
//! ```text
//! Image Name, Predicted Class, Probabilities
//! frame_001.jpg, 1QD-3origami, 1.02, 0.85, 95.10, 1.50, 0.93, 0.60
//! ```
//!
//! Fields are joined with `", "` and never quoted; a filename containing a
//! comma corrupts the row. That defect is part of the format contract and is
//! deliberately preserved. Rows are flushed to disk as they are produced, so
//! an aborted run leaves a truncated but well-formed prefix.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::inference::predictor::PredictionResult;
use crate::utils::error::Result;

/// Header row of the report
pub const REPORT_HEADER: &str = "Image Name, Predicted Class, Probabilities";

/// Incremental writer for the prediction report
///
/// Owns the output file handle for the duration of the run; the file is
/// created fresh (truncating any previous report) and closed on drop.
pub struct CsvReportWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    rows_written: usize,
}

impl CsvReportWriter {
    /// Create the report file and write the header row
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", REPORT_HEADER)?;

        info!("Writing predictions to {:?}", path);

        Ok(Self {
            writer,
            path,
            rows_written: 0,
        })
    }

    /// Append one prediction row
    pub fn write_row(&mut self, result: &PredictionResult) -> Result<()> {
        let probs = result
            .probabilities
            .iter()
            .map(|p| format!("{:.2}", p))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            self.writer,
            "{}, {}, {}",
            result.file_name, result.class_name, probs
        )?;
        self.writer.flush()?;
        self.rows_written += 1;

        Ok(())
    }

    /// Number of data rows written so far (excluding the header)
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Path of the report file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close the report
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_result(file_name: &str, probs: Vec<f32>) -> PredictionResult {
        let softmax: Vec<f32> = probs.iter().map(|p| p / 100.0).collect();
        let logits: Vec<f32> = softmax.iter().map(|p| p.ln()).collect();
        PredictionResult::from_logits(file_name, &logits, &softmax)
    }

    #[test]
    fn test_header_only_for_empty_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let writer = CsvReportWriter::create(&path).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Image Name, Predicted Class, Probabilities\n");
    }

    #[test]
    fn test_row_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = CsvReportWriter::create(&path).unwrap();
        let result = sample_result("a.jpg", vec![1.0, 2.0, 90.5, 3.25, 2.0, 1.25]);
        writer.write_row(&result).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "a.jpg, 1QD-3origami, 1.00, 2.00, 90.50, 3.25, 2.00, 1.25"
        );
    }

    #[test]
    fn test_probabilities_always_two_decimals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = CsvReportWriter::create(&path).unwrap();
        let result = sample_result("b.png", vec![100.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        writer.write_row(&result).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let row = content.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(", ").collect();
        // filename + label + 6 probabilities
        assert_eq!(fields.len(), 8);
        for prob in &fields[2..] {
            let (_, decimals) = prob.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2);
        }
    }

    #[test]
    fn test_rows_written_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut writer = CsvReportWriter::create(&path).unwrap();
        assert_eq!(writer.rows_written(), 0);

        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            let result = sample_result(name, vec![10.0, 10.0, 50.0, 10.0, 10.0, 10.0]);
            writer.write_row(&result).unwrap();
        }
        assert_eq!(writer.rows_written(), 3);
    }

    #[test]
    fn test_create_truncates_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale content\nfrom a previous run\n").unwrap();

        let writer = CsvReportWriter::create(&path).unwrap();
        writer.finish().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.starts_with(REPORT_HEADER));
    }
}
