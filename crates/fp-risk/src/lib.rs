//! Location risk scoring for FactoryPulse.
//!
//! Provides:
//! - A shared weighted z-score scorer over configurable metric sets
//! - Equal-frequency tercile tier assignment
//! - Operational risk scoring (quality/logistics metric mix)
//! - Safety risk scoring (per-unit failure ratios)

pub mod operational;
pub mod safety;
pub mod scorer;

pub use operational::score_operational_risk;
pub use safety::score_safety_risk;
pub use scorer::{assign_tiers, score_rows, zscore, MetricSpec};
