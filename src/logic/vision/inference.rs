//! Inference Engine - ONNX Runtime Integration
//!
//! Load và chạy pretrained image classifier (ONNX).
//! Trait seam so the classifier can run against any backend.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::constants::{MODEL_CLASS_COUNT, MODEL_INPUT_SIZE};
use crate::error::{AgriError, AgriResult};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: PathBuf,
    pub input_name: String,
    pub output_name: String,
    pub input_size: u32,
    pub class_count: usize,
    /// SHA-256 of the model file, when verified
    pub sha256: Option<String>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// INFERENCE ENGINE TRAIT
// ============================================================================

/// A frozen image classifier: one batched input tensor in, class scores out.
pub trait ImageModel {
    /// Scores for batch item 0 (probabilities or logits)
    fn infer(&self, input: Array4<f32>) -> AgriResult<Vec<f32>>;

    fn name(&self) -> &str;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxImageModel {
    // ort needs exclusive access to run
    session: Mutex<Session>,
    metadata: ModelMetadata,
    display_name: String,
}

impl OnnxImageModel {
    /// Load ONNX model từ file, optionally pinning its SHA-256
    pub fn load(model_path: &Path, expected_sha256: Option<&str>) -> AgriResult<Self> {
        log::info!("Loading ONNX model from: {:?}", model_path);

        if !model_path.exists() {
            return Err(AgriError::Io(format!("Model not found: {:?}", model_path)));
        }

        let sha256 = match expected_sha256 {
            Some(expected) => {
                let actual = file_sha256(model_path)?;
                if !actual.eq_ignore_ascii_case(expected.trim()) {
                    return Err(AgriError::Inference(format!(
                        "Model checksum mismatch: expected {}, got {}",
                        expected, actual
                    )));
                }
                log::info!("Model checksum verified: {}", actual);
                Some(actual)
            }
            None => None,
        };

        let session = Session::builder()
            .map_err(|e| AgriError::Inference(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| AgriError::Inference(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| AgriError::Inference(format!("Failed to load model: {}", e)))?;

        let input_name = session.inputs.first()
            .map(|i| i.name.clone())
            .ok_or_else(|| AgriError::Inference("No input defined".to_string()))?;
        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| AgriError::Inference("No output defined".to_string()))?;

        log::info!("ONNX model loaded successfully (input={}, output={})", input_name, output_name);

        let display_name = model_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "onnx".to_string());

        Ok(Self {
            session: Mutex::new(session),
            metadata: ModelMetadata {
                model_path: model_path.to_path_buf(),
                input_name,
                output_name,
                input_size: MODEL_INPUT_SIZE,
                class_count: MODEL_CLASS_COUNT,
                sha256,
                loaded_at: chrono::Utc::now(),
            },
            display_name,
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

impl ImageModel for OnnxImageModel {
    fn infer(&self, input: Array4<f32>) -> AgriResult<Vec<f32>> {
        let start_time = std::time::Instant::now();

        let input_tensor = Value::from_array(input)
            .map_err(|e| AgriError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| AgriError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.metadata.output_name)
            .ok_or_else(|| AgriError::Inference("No output".to_string()))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| AgriError::Inference(format!("Extract error: {}", e)))?;

        let scores = output_tensor.1.to_vec();

        log::debug!(
            "ONNX inference: {} scores in {} us",
            scores.len(),
            start_time.elapsed().as_micros()
        );

        Ok(scores)
    }

    fn name(&self) -> &str {
        &self.display_name
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Hex SHA-256 of a file, streamed
pub fn file_sha256(path: &Path) -> AgriResult<String> {
    let mut file = File::open(path)
        .map_err(|e| AgriError::Io(format!("cannot open {:?}: {}", path, e)))?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_sha256() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();

        let digest = file_sha256(file.path()).unwrap();
        assert_eq!(digest, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn test_load_missing_model_is_io_error() {
        let result = OnnxImageModel::load(Path::new("/nonexistent/model.onnx"), None);
        assert!(matches!(result, Err(AgriError::Io(_))));
    }

    #[test]
    fn test_checksum_mismatch_is_rejected_before_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not really a model").unwrap();

        let result = OnnxImageModel::load(file.path(), Some("00"));
        assert!(matches!(result, Err(AgriError::Inference(_))));
    }
}
