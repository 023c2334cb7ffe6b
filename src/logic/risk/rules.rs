//! Risk Band Rules
//!
//! Recommendation and headline text for each band.
//! KHÔNG chứa logic classify - chỉ constants.

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

/// adjusted < low cutoff
pub const LOW_RECOMMENDATION: &str = "ensure regular watering and basic care.";

/// low cutoff <= adjusted < medium cutoff
pub const MEDIUM_RECOMMENDATION: &str = "use organic manure or fertilizers to boost plant health.";

/// adjusted >= medium cutoff
pub const HIGH_RECOMMENDATION: &str = "apply appropriate pesticides or fungicides.";

// ============================================================================
// HEADLINES (shown / spoken by the UI)
// ============================================================================

pub const LOW_HEADLINE: &str = "Low Risk - Healthy";

pub const MEDIUM_HEADLINE: &str = "Medium Risk - Possible Infection";

pub const HIGH_HEADLINE: &str = "High Risk - Immediate Action Needed!";
