//! Integration Tests for the Vision Pipeline
//!
//! Stub models thay cho ONNX: không cần model file thật.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use ndarray::Array4;
use parking_lot::Mutex;
use tempfile::{tempdir, TempDir};

use super::classifier::{check_label_count, to_probabilities, top1};
use super::*;
use crate::constants::MODEL_CLASS_COUNT;
use crate::error::{AgriError, AgriResult};

/// Returns fixed scores and remembers the input shape it saw
struct StubModel {
    scores: Vec<f32>,
    seen_shape: Mutex<Option<Vec<usize>>>,
}

impl StubModel {
    fn new(scores: Vec<f32>) -> Self {
        Self { scores, seen_shape: Mutex::new(None) }
    }
}

impl ImageModel for StubModel {
    fn infer(&self, input: Array4<f32>) -> AgriResult<Vec<f32>> {
        *self.seen_shape.lock() = Some(input.shape().to_vec());
        Ok(self.scores.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct FailingModel;

impl ImageModel for FailingModel {
    fn infer(&self, _input: Array4<f32>) -> AgriResult<Vec<f32>> {
        Err(AgriError::Inference("malformed tensor".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn labels() -> LabelMap {
    LabelMap::from_lines("ear\ncorn\nleaf beetle\nmushroom").unwrap()
}

fn write_leaf(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    RgbImage::from_pixel(width, height, Rgb([40, 160, 60])).save(&path).unwrap();
    path
}

#[test]
fn test_classify_returns_top1_label() {
    let dir = tempdir().unwrap();
    let path = write_leaf(&dir, "leaf.png", 300, 200);

    let classifier = ImageClassifier::new(
        StubModel::new(vec![0.1, 2.5, 0.3, -1.0]),
        labels(),
        PreprocessConfig::default(),
    );

    let label = classifier.classify(&path).unwrap();
    assert_eq!(label.predicted_label, "corn");
    assert_eq!(label.class_index, 1);
    assert!(label.confidence > 0.5 && label.confidence < 1.0);
    assert_eq!(label.source_path, path.display().to_string());
}

#[test]
fn test_model_sees_batched_224_input() {
    let dir = tempdir().unwrap();
    let path = write_leaf(&dir, "leaf.jpg", 500, 300);

    let model = StubModel::new(vec![0.0, 0.0, 1.0, 0.0]);
    let classifier = ImageClassifier::new(model, labels(), PreprocessConfig::default());

    let label = classifier.classify(&path).unwrap();
    assert_eq!(label.predicted_label, "leaf beetle");
    assert_eq!(label.confidence, 1.0);

    let seen = classifier.model().seen_shape.lock().clone();
    assert_eq!(seen, Some(vec![1, 3, 224, 224]));
}

#[test]
fn test_nhwc_layout_reaches_model() {
    let dir = tempdir().unwrap();
    let path = write_leaf(&dir, "leaf.png", 100, 100);

    let config = PreprocessConfig {
        layout: TensorLayout::Nhwc,
        normalization: Normalization::MobileNet,
        ..Default::default()
    };
    let classifier = ImageClassifier::new(StubModel::new(vec![0.0, 0.0, 0.0, 1.0]), labels(), config);

    assert_eq!(classifier.classify(&path).unwrap().predicted_label, "mushroom");
    let seen = classifier.model().seen_shape.lock().clone();
    assert_eq!(seen, Some(vec![1, 224, 224, 3]));
}

#[test]
fn test_unreadable_path_is_io_error() {
    let classifier = ImageClassifier::new(StubModel::new(vec![1.0, 0.0, 0.0, 0.0]), labels(), PreprocessConfig::default());

    let err = classifier.classify(Path::new("/nonexistent/leaf.png")).unwrap_err();
    assert!(matches!(err, AgriError::Io(_)));
}

#[test]
fn test_not_an_image_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leaf.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let classifier = ImageClassifier::new(StubModel::new(vec![1.0, 0.0, 0.0, 0.0]), labels(), PreprocessConfig::default());

    let err = classifier.classify(&path).unwrap_err();
    assert!(matches!(err, AgriError::Io(_)));
}

#[test]
fn test_format_detected_from_content() {
    let dir = tempdir().unwrap();
    let png = write_leaf(&dir, "leaf.png", 64, 64);

    // Phone uploads: no extension, or the wrong one
    let bare = dir.path().join("leaf_photo");
    let misnamed = dir.path().join("leaf_photo.jpg");
    std::fs::copy(&png, &bare).unwrap();
    std::fs::copy(&png, &misnamed).unwrap();

    let classifier = ImageClassifier::new(StubModel::new(vec![0.1, 2.5, 0.3, -1.0]), labels(), PreprocessConfig::default());

    for path in [&bare, &misnamed] {
        let label = classifier.classify(path).unwrap();
        assert_eq!(label.predicted_label, "corn");
    }
}

#[test]
fn test_inference_failure_propagates() {
    let dir = tempdir().unwrap();
    let path = write_leaf(&dir, "leaf.png", 64, 64);

    let classifier = ImageClassifier::new(FailingModel, labels(), PreprocessConfig::default());

    let err = classifier.classify(&path).unwrap_err();
    assert!(matches!(err, AgriError::Inference(_)));
}

#[test]
fn test_label_count_mismatch_is_inference_error() {
    let dir = tempdir().unwrap();
    let path = write_leaf(&dir, "leaf.png", 64, 64);

    // 1001 outputs (background class) against 4 labels
    let classifier = ImageClassifier::new(StubModel::new(vec![0.0; 1001]), labels(), PreprocessConfig::default());

    let err = classifier.classify(&path).unwrap_err();
    assert!(matches!(err, AgriError::Inference(_)));
}

#[test]
fn test_probabilities_pass_through() {
    let probs = to_probabilities(&[0.2, 0.5, 0.3]).unwrap();
    assert_eq!(probs, vec![0.2, 0.5, 0.3]);
}

#[test]
fn test_logits_are_softmaxed() {
    let probs = to_probabilities(&[1.0, 2.0, 3.0]).unwrap();
    let sum: f32 = probs.iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
    assert!(probs[2] > probs[1] && probs[1] > probs[0]);
}

#[test]
fn test_non_finite_scores_rejected() {
    assert!(matches!(to_probabilities(&[f32::NAN, 1.0]), Err(AgriError::Inference(_))));
    assert!(matches!(to_probabilities(&[]), Err(AgriError::Inference(_))));
}

#[test]
fn test_top1_first_wins_on_tie() {
    assert_eq!(top1(&[0.4, 0.4, 0.2]).unwrap(), (0, 0.4));
    assert_eq!(top1(&[0.1, 0.2, 0.7]).unwrap(), (2, 0.7));
}

#[test]
fn test_label_count_against_model_contract() {
    let imagenet: String = (0..MODEL_CLASS_COUNT).map(|i| format!("n{:08} class {}\n", i, i)).collect();
    let full = LabelMap::from_lines(&imagenet).unwrap();

    assert!(check_label_count(&full, MODEL_CLASS_COUNT));
    assert!(!check_label_count(&labels(), MODEL_CLASS_COUNT));
}
