//! Image Classifier
//!
//! Path -> preprocessed tensor -> model -> top-1 label.
//! The label is whatever the general-purpose model reports; it is not
//! checked against any plant or disease vocabulary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::inference::{ImageModel, OnnxImageModel};
use super::labels::LabelMap;
use super::preprocess::{self, PreprocessConfig};
use crate::config::EngineConfig;
use crate::error::{AgriError, AgriResult};

/// Surfaced to the caller only, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageLabel {
    pub source_path: String,
    pub predicted_label: String,
    pub class_index: usize,
    /// Top-1 probability
    pub confidence: f32,
}

pub struct ImageClassifier<M: ImageModel> {
    model: M,
    labels: LabelMap,
    config: PreprocessConfig,
}

impl ImageClassifier<OnnxImageModel> {
    /// Load model + labels as configured
    pub fn from_config(config: &EngineConfig) -> AgriResult<Self> {
        let model = OnnxImageModel::load(&config.model_path, config.model_sha256.as_deref())?;
        let labels = LabelMap::load(&config.labels_path)?;
        check_label_count(&labels, model.metadata().class_count);
        let preprocess = PreprocessConfig {
            normalization: config.normalization,
            layout: config.tensor_layout,
            ..Default::default()
        };
        Ok(Self::new(model, labels, preprocess))
    }
}

impl<M: ImageModel> ImageClassifier<M> {
    pub fn new(model: M, labels: LabelMap, config: PreprocessConfig) -> Self {
        Self { model, labels, config }
    }

    /// Full pipeline on an image file
    pub fn classify(&self, image_path: &Path) -> AgriResult<ImageLabel> {
        let image = preprocess::load_image(image_path)?;
        let input = preprocess::preprocess(&image, &self.config)?;

        let expected = self.config.input_shape();
        if input.shape() != &expected[..] {
            return Err(AgriError::Inference(format!(
                "input tensor shape {:?} does not match model contract {:?}",
                input.shape(),
                expected
            )));
        }

        let scores = self.model.infer(input)?;
        let probabilities = to_probabilities(&scores)?;

        if probabilities.len() != self.labels.len() {
            return Err(AgriError::Inference(format!(
                "model returned {} classes but {} labels are loaded",
                probabilities.len(),
                self.labels.len()
            )));
        }

        let (class_index, confidence) = top1(&probabilities)?;
        let predicted_label = self
            .labels
            .get(class_index)
            .ok_or_else(|| AgriError::Inference(format!("no label for class {}", class_index)))?
            .to_string();

        log::info!(
            "{} classified {:?} as {:?} ({:.1}%)",
            self.model.name(),
            image_path,
            predicted_label,
            confidence * 100.0
        );

        Ok(ImageLabel {
            source_path: image_path.display().to_string(),
            predicted_label,
            class_index,
            confidence,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

/// Warn early about a label file that does not fit the model.
/// `classify` still rejects the mismatch per call.
pub fn check_label_count(labels: &LabelMap, class_count: usize) -> bool {
    let matches = labels.len() == class_count;
    if !matches {
        log::warn!(
            "Label file has {} entries but the model reports {} classes",
            labels.len(),
            class_count
        );
    }
    matches
}

// ============================================================================
// OUTPUT DECODING
// ============================================================================

/// Pass probabilities through, softmax anything else (logits)
pub fn to_probabilities(scores: &[f32]) -> AgriResult<Vec<f32>> {
    if scores.is_empty() {
        return Err(AgriError::Inference("model returned no scores".to_string()));
    }
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(AgriError::Inference("model returned non-finite scores".to_string()));
    }

    let sum: f32 = scores.iter().sum();
    let is_distribution = scores.iter().all(|&s| (0.0..=1.0).contains(&s)) && (sum - 1.0).abs() < 1e-3;
    if is_distribution {
        return Ok(scores.to_vec());
    }

    Ok(softmax(scores))
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Highest-probability index; first wins on ties
pub fn top1(probabilities: &[f32]) -> AgriResult<(usize, f32)> {
    probabilities
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((i, p)),
        })
        .ok_or_else(|| AgriError::Inference("empty probability vector".to_string()))
}
