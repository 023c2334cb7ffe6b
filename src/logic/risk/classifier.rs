//! Risk Classifier
//!
//! CHỈ chứa logic classify - không có types, không có I/O.
//! Input: fitted estimator, crop table, crop name, temperature, humidity
//! Output: RiskVerdict

use serde::Serialize;

use super::types::{RiskBand, RiskVerdict};
use crate::error::{AgriError, AgriResult};
use crate::logic::crops::{CropProfile, CropTable};
use crate::logic::estimator::LinearRiskEstimator;

/// Verdict plus the intermediate values that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredVerdict {
    pub verdict: RiskVerdict,
    /// Estimator output before the crop factor
    pub raw_score: f64,
    pub profile: CropProfile,
}

// ============================================================================
// MAIN CLASSIFICATION FUNCTIONS
// ============================================================================

/// Main classification function
pub fn classify(
    estimator: &LinearRiskEstimator,
    table: &CropTable,
    crop_name: &str,
    temperature: f64,
    humidity: f64,
) -> AgriResult<RiskVerdict> {
    classify_scored(estimator, table, crop_name, None, temperature, humidity).map(|s| s.verdict)
}

/// Classification with a symptom note carried into the verdict
pub fn classify_with_symptom(
    estimator: &LinearRiskEstimator,
    table: &CropTable,
    crop_name: &str,
    symptom: Option<&str>,
    temperature: f64,
    humidity: f64,
) -> AgriResult<RiskVerdict> {
    classify_scored(estimator, table, crop_name, symptom, temperature, humidity).map(|s| s.verdict)
}

/// Classification from raw user text (e.g. "35", "90.5")
pub fn classify_text(
    estimator: &LinearRiskEstimator,
    table: &CropTable,
    crop_name: &str,
    symptom: Option<&str>,
    temperature: &str,
    humidity: &str,
) -> AgriResult<RiskVerdict> {
    let temperature = parse_reading("temperature", temperature)?;
    let humidity = parse_reading("humidity", humidity)?;
    classify_with_symptom(estimator, table, crop_name, symptom, temperature, humidity)
}

/// Full pipeline, keeping raw score and profile
pub fn classify_scored(
    estimator: &LinearRiskEstimator,
    table: &CropTable,
    crop_name: &str,
    symptom: Option<&str>,
    temperature: f64,
    humidity: f64,
) -> AgriResult<ScoredVerdict> {
    let raw_score = estimator.predict(temperature, humidity)?;
    let profile = table.lookup(crop_name);
    let adjusted_score = profile.adjust(raw_score);
    let band = band_for_score(adjusted_score, &profile);

    log::debug!(
        "{}: raw={:.4} factor={} adjusted={:.4} -> {}",
        profile.crop_name,
        raw_score,
        profile.factor,
        adjusted_score,
        band
    );

    let symptom = symptom
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let verdict = RiskVerdict {
        crop_name: crop_name.trim().to_string(),
        symptom,
        temperature,
        humidity,
        adjusted_score,
        band,
        recommendation: band.recommendation().to_string(),
    };

    Ok(ScoredVerdict { verdict, raw_score, profile })
}

// ============================================================================
// THRESHOLDING
// ============================================================================

/// Two breakpoints, strict ordering. No special case for scores outside [0, 1].
pub fn band_for_score(adjusted_score: f64, profile: &CropProfile) -> RiskBand {
    if adjusted_score < profile.low_cutoff {
        RiskBand::Low
    } else if adjusted_score < profile.medium_cutoff {
        RiskBand::Medium
    } else {
        RiskBand::High
    }
}

// ============================================================================
// INPUT PARSING
// ============================================================================

/// Parse one numeric reading typed by the user
pub fn parse_reading(field: &str, text: &str) -> AgriResult<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| AgriError::Input(format!("{} must be a number, got {:?}", field, text)))?;

    if !value.is_finite() {
        return Err(AgriError::Input(format!("{} must be finite, got {:?}", field, text)));
    }

    Ok(value)
}
