//! Telemetry Module
//!
//! Durable, append-only record of every risk prediction.
//! Image classifications are NOT logged.
//!
//! ## Structure
//! - `record.rs` - PredictionRecord (on-disk row, fixed column order)
//! - `logger.rs` - Append-only CSV writer

pub mod record;
pub mod logger;

pub use record::{PredictionRecord, RECORD_FIELDS};
pub use logger::PredictionLogger;
