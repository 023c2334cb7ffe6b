//! Logic Module - Business Logic & Engines
//!
//! Chứa các engines xử lý: Estimator, Crops, Risk, Vision, Telemetry.
//!
//! ## Architecture
//! - `estimator` - Regression risk estimator (fit once, read-only)
//! - `crops` - Crop adjustment table
//! - `risk` - Risk band classification
//! - `vision` - Image classification (ONNX, preprocessing, labels)
//! - `telemetry` - Append-only prediction log
//! - `assessment` - Risk prediction service used by the UI layer
//! - `weather` - Live weather collaborator

pub mod estimator;
pub mod crops;
pub mod risk;
pub mod vision;
pub mod telemetry;
pub mod assessment;
pub mod weather;
