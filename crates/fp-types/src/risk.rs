use serde::{Deserialize, Serialize};
use std::fmt;

use crate::records::Location;

/// Risk tier assigned by equal-frequency tercile binning of group scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Operational risk assessment for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRiskScore {
    pub location: Location,
    /// Mean of per-row signed z-score sums across the location's rows.
    pub mean_risk_score: f64,
    pub total_repairs_processed: f64,
    pub total_warranty_claims: f64,
    pub on_time_delivery_rate: f64,
    pub tier: RiskTier,
}

/// Safety risk assessment for one location, built on per-unit failure ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSafetyScore {
    pub location: Location,
    pub safety_score: f64,
    pub repairs_per_1000_units: f64,
    pub claims_per_1000_units: f64,
    pub qa_pass_rate: f64,
    pub tier: RiskTier,
}
