//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! `config.rs` reads the environment and falls back to these.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "AgriGuard";

/// Data directory name (under the platform data dir)
pub const DATA_DIR_NAME: &str = "agriguard";

/// Prediction log file name
pub const PREDICTION_LOG_FILE: &str = "predictions.csv";

/// Default ONNX model (1000-class ImageNet classifier)
pub const DEFAULT_MODEL_PATH: &str = "models/mobilenetv2-12.onnx";

/// Default label file, one class name per line, index order
pub const DEFAULT_LABELS_PATH: &str = "models/imagenet_classes.txt";

/// Live weather endpoint: "<temp> <humidity>", e.g. "+25°C 80%"
pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in/?format=%t+%h";

/// Weather request timeout (seconds)
pub const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 5;

// ============================================
// Image model input contract
// ============================================

/// Spatial input size expected by the pretrained classifier
pub const MODEL_INPUT_SIZE: u32 = 224;

/// Output classes of the pretrained classifier
pub const MODEL_CLASS_COUNT: usize = 1000;

/// ImageNet channel means [R, G, B]
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet channel standard deviations [R, G, B]
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];
