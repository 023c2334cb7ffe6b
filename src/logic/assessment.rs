//! Assessment Service
//!
//! The seam a presentation layer calls for a risk prediction:
//! parse input -> classify -> log exactly once -> trend plot data.
//! Nothing is logged when any step before the append fails.

use serde::{Deserialize, Serialize};

use crate::error::AgriResult;
use crate::logic::crops::CropTable;
use crate::logic::estimator::LinearRiskEstimator;
use crate::logic::risk::{self, RiskVerdict, ScoredVerdict};
use crate::logic::telemetry::{PredictionLogger, PredictionRecord};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Raw form input, as typed by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub crop: String,
    pub symptom: Option<String>,
    pub temperature: String,
    pub humidity: String,
}

/// Scatter data for the risk trend chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPlot {
    pub x_label: String,
    pub y_label: String,
    /// Training data: (temperature, risk)
    pub existing: Vec<(f64, f64)>,
    /// This prediction: (temperature, raw risk)
    pub prediction: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: RiskVerdict,
    /// Estimator output before the crop factor
    pub raw_score: f64,
    /// "Corn: High Risk - Immediate Action Needed!"
    pub headline: String,
    pub trend: TrendPlot,
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct AssessmentService<'a> {
    estimator: &'a LinearRiskEstimator,
    table: &'a CropTable,
    logger: &'a PredictionLogger,
}

impl<'a> AssessmentService<'a> {
    pub fn new(estimator: &'a LinearRiskEstimator, table: &'a CropTable, logger: &'a PredictionLogger) -> Self {
        Self { estimator, table, logger }
    }

    /// From raw text. Non-numeric readings fail with InputError and log nothing.
    pub fn assess(&self, request: &AssessmentRequest) -> AgriResult<Assessment> {
        let temperature = risk::parse_reading("temperature", &request.temperature)?;
        let humidity = risk::parse_reading("humidity", &request.humidity)?;
        self.assess_values(&request.crop, request.symptom.as_deref(), temperature, humidity)
    }

    /// From already-parsed readings (e.g. live weather)
    pub fn assess_values(
        &self,
        crop: &str,
        symptom: Option<&str>,
        temperature: f64,
        humidity: f64,
    ) -> AgriResult<Assessment> {
        let scored = risk::classify_scored(self.estimator, self.table, crop, symptom, temperature, humidity)?;

        self.logger.append(&PredictionRecord::from(&scored.verdict))?;

        log::info!(
            "{} (score {:.3}, {}°C / {}%)",
            scored.verdict.headline(),
            scored.verdict.adjusted_score,
            temperature,
            humidity
        );

        Ok(self.build(scored))
    }

    fn build(&self, scored: ScoredVerdict) -> Assessment {
        let trend = trend_plot(self.estimator, scored.verdict.temperature, scored.raw_score);
        Assessment {
            headline: scored.verdict.headline(),
            raw_score: scored.raw_score,
            verdict: scored.verdict,
            trend,
        }
    }
}

/// Training points plus the new prediction, plotted against temperature
pub fn trend_plot(estimator: &LinearRiskEstimator, temperature: f64, raw_score: f64) -> TrendPlot {
    TrendPlot {
        x_label: "Temperature (°C)".to_string(),
        y_label: "Disease Risk".to_string(),
        existing: estimator
            .samples()
            .iter()
            .map(|s| (s.temperature, s.risk_score))
            .collect(),
        prediction: (temperature, raw_score),
    }
}

// ============================================================================
// TESTS
// ============================================================================
