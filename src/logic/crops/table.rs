//! Crop Adjustment Table
//!
//! Fixed crop -> profile mapping, built once at startup.
//! Unknown names fall back to the default profile instead of failing,
//! so free-text crop entry keeps working.

use std::path::Path;

use super::profile::CropProfile;
use crate::error::{AgriError, AgriResult};

/// Built-in profiles: (name, factor, low cutoff, medium cutoff)
const STANDARD_PROFILES: [(&str, f64, f64, f64); 5] = [
    ("Wheat", 0.9, 0.4, 0.7),
    ("Rice", 1.2, 0.5, 0.75),
    ("Corn", 0.7, 0.3, 0.6),
    ("Barley", 1.0, 0.45, 0.72),
    ("Soybean", 1.1, 0.48, 0.74),
];

#[derive(Debug, Clone)]
pub struct CropTable {
    profiles: Vec<CropProfile>,
}

impl CropTable {
    /// Build from profiles, validating each one
    pub fn new(profiles: Vec<CropProfile>) -> AgriResult<Self> {
        for (i, p) in profiles.iter().enumerate() {
            p.validate()?;
            if profiles[..i].iter().any(|other| same_crop(&other.crop_name, &p.crop_name)) {
                return Err(AgriError::Data(format!("duplicate crop profile: {}", p.crop_name)));
            }
        }
        Ok(Self { profiles })
    }

    /// Wheat, Rice, Corn, Barley, Soybean
    pub fn standard() -> Self {
        let profiles = STANDARD_PROFILES
            .iter()
            .map(|&(name, factor, low_cutoff, medium_cutoff)| CropProfile {
                crop_name: name.to_string(),
                factor,
                low_cutoff,
                medium_cutoff,
            })
            .collect();
        Self { profiles }
    }

    /// Parse a JSON array of profiles
    pub fn from_json(json: &str) -> AgriResult<Self> {
        let profiles: Vec<CropProfile> = serde_json::from_str(json)
            .map_err(|e| AgriError::Data(format!("invalid crop table: {}", e)))?;
        Self::new(profiles)
    }

    /// Load a JSON crop table from disk
    pub fn load(path: &Path) -> AgriResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AgriError::Io(format!("cannot read crop table {:?}: {}", path, e)))?;
        let table = Self::from_json(&json)?;
        log::info!("Loaded {} crop profiles from {:?}", table.len(), path);
        Ok(table)
    }

    /// Never fails: unknown crops get the default profile under the caller's name
    pub fn lookup(&self, crop_name: &str) -> CropProfile {
        match self.profiles.iter().find(|p| same_crop(&p.crop_name, crop_name)) {
            Some(profile) => profile.clone(),
            None => {
                log::warn!("Unknown crop {:?}, using default profile", crop_name);
                CropProfile::fallback(crop_name.trim())
            }
        }
    }

    pub fn contains(&self, crop_name: &str) -> bool {
        self.profiles.iter().any(|p| same_crop(&p.crop_name, crop_name))
    }

    pub fn crop_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.crop_name.as_str()).collect()
    }

    pub fn profiles(&self) -> &[CropProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for CropTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn same_crop(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
