//! AgriGuard Core - Crop Disease Risk Engine
//!
//! Risk scoring from temperature/humidity readings and leaf image
//! classification through a pretrained ONNX model.
//!
//! ## Structure
//! - `logic/estimator` - Linear regression risk estimator
//! - `logic/crops` - Per-crop adjustment table
//! - `logic/risk` - Band classification + recommendations
//! - `logic/vision` - Image preprocessing and ONNX inference
//! - `logic/telemetry` - Append-only prediction log
//! - `logic/assessment` - Service tying the above together
//! - `logic/weather` - Live weather lookup

pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

pub use config::EngineConfig;
pub use error::{AgriError, AgriResult, ErrorKind};
