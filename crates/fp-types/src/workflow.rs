use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::forecast::{ForecastPoint, MonthlyShortfall};
use crate::records::Dataset;
use crate::risk::{LocationRiskScore, LocationSafetyScore};

/// Sender/recipient identities for outbound alerts.
///
/// Passed in explicitly at invocation time; never read from process-global
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub sender: String,
    pub sender_secret: String,
    pub recipient: String,
}

/// Caller-supplied configuration for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub data_path: PathBuf,
    pub monthly_target: f64,
    /// Number of future calendar days to forecast. Must be > 0.
    pub forecast_days: u32,
    pub alert: AlertConfig,
}

/// Snapshot of pipeline progress threaded through the workflow stages.
///
/// Each stage consumes a snapshot and returns a new one with exactly its own
/// output field populated. A `None` result field stays `None` for the rest of
/// the run; downstream stages treat it as "skip".
#[derive(Debug, Clone)]
pub struct WorkflowState {
    pub config: PipelineConfig,
    pub dataset: Option<Dataset>,
    pub forecast: Option<Vec<ForecastPoint>>,
    pub shortfall: Option<Vec<MonthlyShortfall>>,
    pub operational_risk: Option<Vec<LocationRiskScore>>,
    pub safety_risk: Option<Vec<LocationSafetyScore>>,
}

impl WorkflowState {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            dataset: None,
            forecast: None,
            shortfall: None,
            operational_risk: None,
            safety_risk: None,
        }
    }

    pub fn with_dataset(mut self, dataset: Option<Dataset>) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_forecast(mut self, forecast: Option<Vec<ForecastPoint>>) -> Self {
        self.forecast = forecast;
        self
    }

    pub fn with_shortfall(mut self, shortfall: Option<Vec<MonthlyShortfall>>) -> Self {
        self.shortfall = shortfall;
        self
    }

    pub fn with_operational_risk(mut self, scores: Option<Vec<LocationRiskScore>>) -> Self {
        self.operational_risk = scores;
        self
    }

    pub fn with_safety_risk(mut self, scores: Option<Vec<LocationSafetyScore>>) -> Self {
        self.safety_risk = scores;
        self
    }

    /// Collapse the final snapshot into the invocation result.
    pub fn into_report(self) -> AnalysisReport {
        AnalysisReport {
            shortfall: self.shortfall.unwrap_or_default(),
            operational_risk: self.operational_risk,
            safety_risk: self.safety_risk,
        }
    }
}

/// Invocation output. The shortfall table is always present (empty when the
/// forecast was skipped); risk tables are absent when their stage skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub shortfall: Vec<MonthlyShortfall>,
    pub operational_risk: Option<Vec<LocationRiskScore>>,
    pub safety_risk: Option<Vec<LocationSafetyScore>>,
}
