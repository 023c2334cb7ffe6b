//! Risk Types
//!
//! Core types cho risk classification.
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

use super::rules::{
    HIGH_HEADLINE, HIGH_RECOMMENDATION, LOW_HEADLINE, LOW_RECOMMENDATION, MEDIUM_HEADLINE,
    MEDIUM_RECOMMENDATION,
};

// ============================================================================
// RISK BAND
// ============================================================================

/// Categorical verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    /// Healthy, routine care
    Low,
    /// Possible infection, strengthen the plant
    Medium,
    /// Act now
    High,
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskBand::Low => LOW_RECOMMENDATION,
            RiskBand::Medium => MEDIUM_RECOMMENDATION,
            RiskBand::High => HIGH_RECOMMENDATION,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            RiskBand::Low => LOW_HEADLINE,
            RiskBand::Medium => MEDIUM_HEADLINE,
            RiskBand::High => HIGH_HEADLINE,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Result of one risk classification. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub crop_name: String,
    pub symptom: Option<String>,
    pub temperature: f64,
    pub humidity: f64,
    /// raw regression score * crop factor (unbounded)
    pub adjusted_score: f64,
    pub band: RiskBand,
    pub recommendation: String,
}

impl RiskVerdict {
    /// "Corn: High Risk - Immediate Action Needed!"
    pub fn headline(&self) -> String {
        format!("{}: {}", self.crop_name, self.band.headline())
    }
}
