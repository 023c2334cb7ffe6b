//! Prediction Logger
//!
//! Append-only CSV writer for risk predictions.
//! One row per verdict, flushed before returning.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::record::PredictionRecord;
use crate::error::{AgriError, AgriResult};

// ============================================================================
// LOGGER
// ============================================================================

/// Append is the only operation: no read, update or compaction.
pub struct PredictionLogger {
    path: PathBuf,
    /// Rows written by this logger instance
    appended: AtomicU64,
}

impl PredictionLogger {
    /// No file is touched until the first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            appended: AtomicU64::new(0),
        }
    }

    /// Append one record. Fails with IOError if the file cannot be opened or written.
    pub fn append(&self, record: &PredictionRecord) -> AgriResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AgriError::Io(format!("cannot create log directory {:?}: {}", parent, e))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AgriError::Io(format!("cannot open prediction log {:?}: {}", self.path, e)))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.serialize(record)?;

        // Flush for durability
        writer.flush()?;

        self.appended.fetch_add(1, Ordering::Relaxed);
        log::debug!("Logged prediction for {} to {:?}", record.crop, self.path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows appended through this instance
    pub fn appended(&self) -> u64 {
        self.appended.load(Ordering::Relaxed)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::telemetry::RECORD_FIELDS;
    use tempfile::tempdir;

    fn record(crop: &str, symptom: Option<&str>) -> PredictionRecord {
        PredictionRecord {
            crop: crop.to_string(),
            symptom: symptom.map(str::to_string),
            temperature: 35.0,
            humidity: 90.0,
            score: 0.6429,
            recommendation: "apply appropriate pesticides or fungicides.".to_string(),
        }
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_append_writes_six_ordered_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        let logger = PredictionLogger::new(&path);

        logger.append(&record("Corn", Some("leaf spots"))).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.len(), RECORD_FIELDS);
        assert_eq!(&row[0], "Corn");
        assert_eq!(&row[1], "leaf spots");
        assert_eq!(row[2].parse::<f64>().unwrap(), 35.0);
        assert_eq!(row[3].parse::<f64>().unwrap(), 90.0);
        assert_eq!(row[4].parse::<f64>().unwrap(), 0.6429);
        assert_eq!(&row[5], "apply appropriate pesticides or fungicides.");
    }

    #[test]
    fn test_missing_symptom_is_empty_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        let logger = PredictionLogger::new(&path);

        logger.append(&record("Wheat", None)).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows[0].len(), RECORD_FIELDS);
        assert_eq!(&rows[0][1], "");
    }

    #[test]
    fn test_append_only_never_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("predictions.csv");

        PredictionLogger::new(&path).append(&record("Rice", None)).unwrap();
        // A fresh logger on the same file keeps previous rows
        let logger = PredictionLogger::new(&path);
        logger.append(&record("Corn", None)).unwrap();
        logger.append(&record("Barley", None)).unwrap();

        let rows = read_rows(&path);
        let crops: Vec<&str> = rows.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(crops, vec!["Rice", "Corn", "Barley"]);
        assert_eq!(logger.appended(), 2);
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("predictions.csv");

        PredictionLogger::new(&path).append(&record("Soybean", None)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        // The log path is a directory: open() must fail
        let logger = PredictionLogger::new(dir.path());

        let err = logger.append(&record("Corn", None)).unwrap_err();
        assert!(matches!(err, AgriError::Io(_)));
        assert_eq!(logger.appended(), 0);
    }

    #[test]
    fn test_field_with_comma_is_quoted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("predictions.csv");

        PredictionLogger::new(&path)
            .append(&record("Corn", Some("wilting, brown edges")))
            .unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows[0].len(), RECORD_FIELDS);
        assert_eq!(&rows[0][1], "wilting, brown edges");
    }
}
