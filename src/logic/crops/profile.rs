//! Crop Profile
//!
//! Per-crop adjustment factor and risk-band cutoffs.

use serde::{Deserialize, Serialize};

use crate::error::{AgriError, AgriResult};

/// Factor for crops not in the table
pub const DEFAULT_FACTOR: f64 = 1.0;

/// Low/Medium boundary for crops not in the table
pub const DEFAULT_LOW_CUTOFF: f64 = 0.5;

/// Medium/High boundary for crops not in the table
pub const DEFAULT_MEDIUM_CUTOFF: f64 = 0.75;

/// Invariant: factor > 0, 0 < low_cutoff < medium_cutoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub crop_name: String,
    /// Multiplies the raw regression score
    pub factor: f64,
    /// adjusted < low_cutoff => Low
    pub low_cutoff: f64,
    /// adjusted >= medium_cutoff => High
    pub medium_cutoff: f64,
}

impl CropProfile {
    /// Validated constructor
    pub fn new(crop_name: impl Into<String>, factor: f64, low_cutoff: f64, medium_cutoff: f64) -> AgriResult<Self> {
        let profile = Self {
            crop_name: crop_name.into(),
            factor,
            low_cutoff,
            medium_cutoff,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Profile used for unknown crop names
    pub fn fallback(crop_name: impl Into<String>) -> Self {
        Self {
            crop_name: crop_name.into(),
            factor: DEFAULT_FACTOR,
            low_cutoff: DEFAULT_LOW_CUTOFF,
            medium_cutoff: DEFAULT_MEDIUM_CUTOFF,
        }
    }

    pub fn validate(&self) -> AgriResult<()> {
        if self.crop_name.trim().is_empty() {
            return Err(AgriError::Data("crop profile has an empty name".to_string()));
        }
        if !(self.factor.is_finite() && self.factor > 0.0) {
            return Err(AgriError::Data(format!(
                "{}: factor must be > 0, got {}",
                self.crop_name, self.factor
            )));
        }
        if !(self.low_cutoff.is_finite() && self.medium_cutoff.is_finite()) {
            return Err(AgriError::Data(format!("{}: cutoffs must be finite", self.crop_name)));
        }
        if !(0.0 < self.low_cutoff && self.low_cutoff < self.medium_cutoff) {
            return Err(AgriError::Data(format!(
                "{}: cutoffs must satisfy 0 < low < medium, got low={} medium={}",
                self.crop_name, self.low_cutoff, self.medium_cutoff
            )));
        }
        Ok(())
    }

    /// Apply the crop factor to a raw score
    pub fn adjust(&self, raw_score: f64) -> f64 {
        raw_score * self.factor
    }

    /// Same numbers as the fallback profile (name ignored)
    pub fn is_default(&self) -> bool {
        self.factor == DEFAULT_FACTOR
            && self.low_cutoff == DEFAULT_LOW_CUTOFF
            && self.medium_cutoff == DEFAULT_MEDIUM_CUTOFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile() {
        let p = CropProfile::new("Wheat", 0.9, 0.4, 0.7).unwrap();
        assert!((p.adjust(0.5) - 0.45).abs() < 1e-12);
        assert!(!p.is_default());
    }

    #[test]
    fn test_rejects_bad_factor() {
        assert!(CropProfile::new("X", 0.0, 0.4, 0.7).is_err());
        assert!(CropProfile::new("X", -1.0, 0.4, 0.7).is_err());
        assert!(CropProfile::new("X", f64::NAN, 0.4, 0.7).is_err());
    }

    #[test]
    fn test_rejects_bad_cutoffs() {
        assert!(CropProfile::new("X", 1.0, 0.0, 0.7).is_err());
        assert!(CropProfile::new("X", 1.0, 0.7, 0.7).is_err());
        assert!(CropProfile::new("X", 1.0, 0.8, 0.7).is_err());
    }

    #[test]
    fn test_fallback_is_default() {
        let p = CropProfile::fallback("Millet");
        assert_eq!(p.crop_name, "Millet");
        assert!(p.is_default());
        assert!(p.validate().is_ok());
    }
}
