//! Crops Module
//!
//! Per-crop adjustment of the generic risk score.
//!
//! ## Structure
//! - `profile`: CropProfile (factor + cutoffs) and the default values
//! - `table`: CropTable lookup with default fallback

pub mod profile;
pub mod table;

pub use profile::{CropProfile, DEFAULT_FACTOR, DEFAULT_LOW_CUTOFF, DEFAULT_MEDIUM_CUTOFF};
pub use table::CropTable;
