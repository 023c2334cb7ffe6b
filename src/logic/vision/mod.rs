//! Vision Module - Leaf Image Classification
//!
//! Tách preprocessing khỏi inference.
//! Dễ dàng swap model qua `ImageModel` trait.
//!
//! ## Structure
//! - `preprocess`: decode, resize, RGB, normalize, batch
//! - `inference`: ImageModel trait + ONNX Runtime implementation
//! - `labels`: class index -> label text
//! - `classifier`: the end-to-end pipeline

pub mod preprocess;
pub mod inference;
pub mod labels;
pub mod classifier;

#[cfg(test)]
mod tests;

pub use preprocess::{Normalization, PreprocessConfig, TensorLayout};
pub use inference::{ImageModel, ModelMetadata, OnnxImageModel};
pub use labels::LabelMap;
pub use classifier::{ImageClassifier, ImageLabel};
