//! Regression Risk Estimator
//!
//! Linear model (temperature, humidity) -> risk score, fit once at startup
//! with ordinary least squares.
//! Output is NOT clamped: extrapolation can leave [0, 1].

use serde::{Deserialize, Serialize};

use crate::error::{AgriError, AgriResult};

// ============================================================================
// TRAINING DATA
// ============================================================================

/// One labelled observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub temperature: f64,
    pub humidity: f64,
    /// Observed risk (0.0 - 1.0)
    pub risk_score: f64,
}

impl TrainingSample {
    pub const fn new(temperature: f64, humidity: f64, risk_score: f64) -> Self {
        Self { temperature, humidity, risk_score }
    }
}

/// Built-in training set (illustrative, not agronomic ground truth)
pub const DEFAULT_TRAINING_SET: [TrainingSample; 5] = [
    TrainingSample::new(30.0, 80.0, 0.7),
    TrainingSample::new(32.0, 85.0, 0.8),
    TrainingSample::new(28.0, 75.0, 0.5),
    TrainingSample::new(35.0, 90.0, 0.9),
    TrainingSample::new(40.0, 95.0, 1.0),
];

// ============================================================================
// FITTED ESTIMATOR
// ============================================================================

/// risk = intercept + temp_coef * temperature + humidity_coef * humidity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRiskEstimator {
    intercept: f64,
    temperature_coef: f64,
    humidity_coef: f64,
    /// Samples the model was fit on (kept for trend plots)
    samples: Vec<TrainingSample>,
}

impl LinearRiskEstimator {
    /// Fit on the built-in training set
    pub fn fit_default() -> AgriResult<Self> {
        Self::fit(&DEFAULT_TRAINING_SET)
    }

    /// Ordinary least squares with intercept.
    ///
    /// Solves the centered 2x2 normal equations in closed form, which gives
    /// the same coefficients as the full (X'X)^-1 X'y solve.
    pub fn fit(samples: &[TrainingSample]) -> AgriResult<Self> {
        if samples.is_empty() {
            return Err(AgriError::Data("training set is empty".to_string()));
        }

        if let Some((i, _)) = samples.iter().enumerate().find(|(_, s)| {
            !(s.temperature.is_finite() && s.humidity.is_finite() && s.risk_score.is_finite())
        }) {
            return Err(AgriError::Data(format!("sample {} has a non-finite value", i)));
        }

        let n = samples.len() as f64;
        let mean_t = samples.iter().map(|s| s.temperature).sum::<f64>() / n;
        let mean_h = samples.iter().map(|s| s.humidity).sum::<f64>() / n;
        let mean_y = samples.iter().map(|s| s.risk_score).sum::<f64>() / n;

        let (mut s_tt, mut s_hh, mut s_th, mut s_ty, mut s_hy) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for s in samples {
            let dt = s.temperature - mean_t;
            let dh = s.humidity - mean_h;
            let dy = s.risk_score - mean_y;
            s_tt += dt * dt;
            s_hh += dh * dh;
            s_th += dt * dh;
            s_ty += dt * dy;
            s_hy += dh * dy;
        }

        let det = s_tt * s_hh - s_th * s_th;
        if !det.is_finite() {
            return Err(AgriError::Data(
                "training features overflow the normal equations, cannot fit".to_string(),
            ));
        }

        let scale = (s_tt * s_hh).max(f64::MIN_POSITIVE);
        if det.abs() <= scale * 1e-12 {
            return Err(AgriError::Data(format!(
                "training features are collinear ({} samples), cannot fit",
                samples.len()
            )));
        }

        let temperature_coef = (s_hh * s_ty - s_th * s_hy) / det;
        let humidity_coef = (s_tt * s_hy - s_th * s_ty) / det;
        let intercept = mean_y - temperature_coef * mean_t - humidity_coef * mean_h;

        if !(intercept.is_finite() && temperature_coef.is_finite() && humidity_coef.is_finite()) {
            return Err(AgriError::Data("fitted coefficients are not finite".to_string()));
        }

        log::debug!(
            "Fitted risk estimator: intercept={:.6}, temp={:.6}, humidity={:.6}",
            intercept,
            temperature_coef,
            humidity_coef
        );

        Ok(Self {
            intercept,
            temperature_coef,
            humidity_coef,
            samples: samples.to_vec(),
        })
    }

    /// Fit from parallel feature / label columns
    pub fn fit_columns(features: &[[f64; 2]], labels: &[f64]) -> AgriResult<Self> {
        if features.len() != labels.len() {
            return Err(AgriError::Data(format!(
                "feature rows ({}) and labels ({}) differ in length",
                features.len(),
                labels.len()
            )));
        }

        let samples: Vec<TrainingSample> = features
            .iter()
            .zip(labels)
            .map(|(f, &y)| TrainingSample::new(f[0], f[1], y))
            .collect();

        Self::fit(&samples)
    }

    /// Evaluate the fitted plane. No clamping.
    pub fn predict(&self, temperature: f64, humidity: f64) -> AgriResult<f64> {
        if !temperature.is_finite() {
            return Err(AgriError::Input(format!("temperature is not a finite number: {}", temperature)));
        }
        if !humidity.is_finite() {
            return Err(AgriError::Input(format!("humidity is not a finite number: {}", humidity)));
        }

        Ok(self.intercept + self.temperature_coef * temperature + self.humidity_coef * humidity)
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// (temperature, humidity)
    pub fn coefficients(&self) -> (f64, f64) {
        (self.temperature_coef, self.humidity_coef)
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }
}

// ============================================================================
// TESTS
// ============================================================================
