//! Risk Module
//!
//! Chuyển risk score liên tục thành Low/Medium/High theo từng loại cây.
//! Đây là CORE STEP của risk prediction.
//!
//! ## Structure
//! - `types`: RiskBand, RiskVerdict
//! - `rules`: Recommendation and headline text
//! - `classifier`: Scoring + thresholding
//!
//! ## Usage
//! ```ignore
//! use crate::logic::risk::{classify, RiskBand};
//!
//! let verdict = classify(&estimator, &table, "Corn", 35.0, 90.0)?;
//! match verdict.band {
//!     RiskBand::Low => println!("Healthy"),
//!     RiskBand::Medium => println!("Monitor"),
//!     RiskBand::High => println!("Action needed"),
//! }
//! ```

pub mod types;
pub mod rules;
pub mod classifier;


pub use types::{RiskBand, RiskVerdict};

pub use rules::{HIGH_RECOMMENDATION, LOW_RECOMMENDATION, MEDIUM_RECOMMENDATION};

pub use classifier::{
    band_for_score, classify, classify_scored, classify_text, classify_with_symptom,
    parse_reading, ScoredVerdict,
};
