//! Configuration module

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DATA_DIR_NAME, DEFAULT_LABELS_PATH, DEFAULT_MODEL_PATH, DEFAULT_WEATHER_TIMEOUT_SECS,
    DEFAULT_WEATHER_URL, PREDICTION_LOG_FILE,
};
use crate::logic::vision::{Normalization, TensorLayout};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Append-only prediction log (CSV)
    pub log_path: PathBuf,

    /// ONNX image classifier
    pub model_path: PathBuf,

    /// Label file for the classifier output indices
    pub labels_path: PathBuf,

    /// Expected SHA-256 of the model file (hex), if pinned
    pub model_sha256: Option<String>,

    /// JSON crop table overriding the built-in one
    pub crops_path: Option<PathBuf>,

    /// Weather endpoint
    pub weather_url: String,

    /// Weather request timeout
    pub weather_timeout: Duration,

    /// Pixel normalization contract of the model
    pub normalization: Normalization,

    /// Input tensor layout of the model
    pub tensor_layout: TensorLayout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            labels_path: PathBuf::from(DEFAULT_LABELS_PATH),
            model_sha256: None,
            crops_path: None,
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            weather_timeout: Duration::from_secs(DEFAULT_WEATHER_TIMEOUT_SECS),
            normalization: Normalization::default(),
            tensor_layout: TensorLayout::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {:?}", path);
        }

        let defaults = Self::default();

        Self {
            log_path: env::var("AGRIGUARD_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_path),

            model_path: env::var("AGRIGUARD_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            labels_path: env::var("AGRIGUARD_LABELS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.labels_path),

            model_sha256: env::var("AGRIGUARD_MODEL_SHA256")
                .ok()
                .filter(|s| !s.trim().is_empty()),

            crops_path: env::var("AGRIGUARD_CROPS_PATH").ok().map(PathBuf::from),

            weather_url: env::var("AGRIGUARD_WEATHER_URL").unwrap_or(defaults.weather_url),

            weather_timeout: env::var("AGRIGUARD_WEATHER_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.weather_timeout),

            normalization: env::var("AGRIGUARD_NORMALIZATION")
                .ok()
                .and_then(|s| parse_or_warn("AGRIGUARD_NORMALIZATION", &s))
                .unwrap_or(defaults.normalization),

            tensor_layout: env::var("AGRIGUARD_TENSOR_LAYOUT")
                .ok()
                .and_then(|s| parse_or_warn("AGRIGUARD_TENSOR_LAYOUT", &s))
                .unwrap_or(defaults.tensor_layout),
        }
    }
}

/// Default: app data directory
fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
        .join(PREDICTION_LOG_FILE)
}

fn parse_or_warn<T: std::str::FromStr>(var: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring invalid {}={:?}, using default", var, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.log_path.ends_with(PREDICTION_LOG_FILE));
        assert_eq!(config.weather_url, DEFAULT_WEATHER_URL);
        assert_eq!(config.weather_timeout, Duration::from_secs(5));
        assert_eq!(config.normalization, Normalization::ImageNet);
        assert_eq!(config.tensor_layout, TensorLayout::Nchw);
        assert!(config.model_sha256.is_none());
    }

    #[test]
    fn test_parse_or_warn() {
        let layout: Option<TensorLayout> = parse_or_warn("X", "nhwc");
        assert_eq!(layout, Some(TensorLayout::Nhwc));

        let bad: Option<TensorLayout> = parse_or_warn("X", "sideways");
        assert!(bad.is_none());
    }
}
