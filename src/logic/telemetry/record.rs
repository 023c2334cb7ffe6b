//! Prediction Record
//!
//! On-disk row for one RiskVerdict.
//! Column order IS the contract: crop, symptom, temperature, humidity,
//! score, recommendation. No header, no versioning.

use serde::{Deserialize, Serialize};

use crate::logic::risk::RiskVerdict;

/// Number of columns per row
pub const RECORD_FIELDS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub crop: String,
    /// Written as an empty field when absent
    pub symptom: Option<String>,
    pub temperature: f64,
    pub humidity: f64,
    pub score: f64,
    pub recommendation: String,
}

impl From<&RiskVerdict> for PredictionRecord {
    fn from(verdict: &RiskVerdict) -> Self {
        Self {
            crop: verdict.crop_name.clone(),
            symptom: verdict.symptom.clone(),
            temperature: verdict.temperature,
            humidity: verdict.humidity,
            score: verdict.adjusted_score,
            recommendation: verdict.recommendation.clone(),
        }
    }
}
