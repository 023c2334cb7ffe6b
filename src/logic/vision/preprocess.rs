//! Image Preprocessing
//!
//! Decode -> resize 224x224 -> RGB -> normalize -> batch of 1.
//! Each step is a precondition for the next; the output tensor always
//! matches the model input contract.

use std::path::Path;
use std::str::FromStr;

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbImage};
use ndarray::Array4;
use serde::{Deserialize, Serialize};

use crate::constants::{IMAGENET_MEAN, IMAGENET_STD, MODEL_INPUT_SIZE};
use crate::error::{AgriError, AgriResult};

// ============================================================================
// CONFIG
// ============================================================================

/// Pixel normalization contract of the pretrained model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// (x / 255 - mean) / std, torchvision / ONNX model zoo
    #[default]
    ImageNet,
    /// x / 127.5 - 1, Keras MobileNet family
    MobileNet,
}

impl Normalization {
    /// Normalize one 0-255 channel value
    pub fn apply(&self, value: u8, channel: usize) -> f32 {
        let v = value as f32;
        match self {
            Normalization::ImageNet => (v / 255.0 - IMAGENET_MEAN[channel]) / IMAGENET_STD[channel],
            Normalization::MobileNet => v / 127.5 - 1.0,
        }
    }
}

impl FromStr for Normalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "imagenet" => Ok(Normalization::ImageNet),
            "mobilenet" => Ok(Normalization::MobileNet),
            other => Err(format!("unknown normalization: {}", other)),
        }
    }
}

/// Input tensor layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TensorLayout {
    /// [1, 3, H, W]
    #[default]
    Nchw,
    /// [1, H, W, 3]
    Nhwc,
}

impl FromStr for TensorLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nchw" => Ok(TensorLayout::Nchw),
            "nhwc" => Ok(TensorLayout::Nhwc),
            other => Err(format!("unknown tensor layout: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Square input side (width == height)
    pub input_size: u32,
    pub normalization: Normalization,
    pub layout: TensorLayout,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            input_size: MODEL_INPUT_SIZE,
            normalization: Normalization::default(),
            layout: TensorLayout::default(),
        }
    }
}

impl PreprocessConfig {
    /// Shape of the tensor `to_tensor` produces
    pub fn input_shape(&self) -> [usize; 4] {
        let s = self.input_size as usize;
        match self.layout {
            TensorLayout::Nchw => [1, 3, s, s],
            TensorLayout::Nhwc => [1, s, s, 3],
        }
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Step 1: decode from disk. Unreadable or unsupported => IOError.
///
/// Format comes from the file's magic bytes, not its extension.
pub fn load_image(path: &Path) -> AgriResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| AgriError::Io(format!("cannot open image {:?}: {}", path, e)))?
        .with_guessed_format()
        .map_err(|e| AgriError::Io(format!("cannot read image {:?}: {}", path, e)))?;

    reader
        .decode()
        .map_err(|e| AgriError::Io(format!("cannot decode image {:?}: {}", path, e)))
}

/// Steps 2-5
pub fn preprocess(image: &DynamicImage, config: &PreprocessConfig) -> AgriResult<Array4<f32>> {
    let rgb = to_model_rgb(image, config.input_size)?;
    Ok(to_tensor(&rgb, config))
}

/// Steps 2-3: resize to the model size, force RGB channel order
pub fn to_model_rgb(image: &DynamicImage, size: u32) -> AgriResult<RgbImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(AgriError::Io("image has zero width or height".to_string()));
    }

    // to_rgb8 drops alpha and expands grayscale
    let rgb = image.to_rgb8();
    if rgb.dimensions() == (size, size) {
        return Ok(rgb);
    }

    Ok(image::imageops::resize(&rgb, size, size, FilterType::Triangle))
}

/// Steps 4-5: normalize and add the batch dimension
pub fn to_tensor(rgb: &RgbImage, config: &PreprocessConfig) -> Array4<f32> {
    let norm = config.normalization;
    let (w, h) = rgb.dimensions();
    let (w, h) = (w as usize, h as usize);

    match config.layout {
        TensorLayout::Nchw => Array4::from_shape_fn((1, 3, h, w), |(_, c, y, x)| {
            norm.apply(rgb.get_pixel(x as u32, y as u32).0[c], c)
        }),
        TensorLayout::Nhwc => Array4::from_shape_fn((1, h, w, 3), |(_, y, x, c)| {
            norm.apply(rgb.get_pixel(x as u32, y as u32).0[c], c)
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
