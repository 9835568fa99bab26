//! The analysis workflow — a single-path state machine.
//!
//! Stages run strictly in sequence over a shared [`WorkflowState`] snapshot.
//! A stage whose required input is absent passes the state through with its
//! own output left empty; recovered stage failures propagate absence the same
//! way instead of halting the run.

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

use fp_types::{
    AnalysisReport, Dataset, ForecastError, ForecastPoint, FpError, FpResult, PipelineConfig,
    WorkflowState,
};

use crate::alerts::{operational_risk_alert, safety_alert, shortfall_alert, Alert};
use crate::notify::Notifier;

/// Deadline on the forecast model fit.
const FORECAST_DEADLINE: Duration = Duration::from_secs(60);

/// Workflow stages in execution order. No branches, cycles, or retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Forecast,
    Shortfall,
    OperationalRisk,
    SafetyRisk,
    Alert,
    Terminal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Load => "load",
            Stage::Forecast => "forecast",
            Stage::Shortfall => "shortfall",
            Stage::OperationalRisk => "operational_risk",
            Stage::SafetyRisk => "safety_risk",
            Stage::Alert => "alert",
            Stage::Terminal => "terminal",
        };
        write!(f, "{}", s)
    }
}

/// Drives one pipeline invocation end to end.
///
/// Invocations are independent: every run owns its own state and recomputes
/// all normalization statistics from scratch.
pub struct Workflow<N: Notifier> {
    notifier: N,
}

impl<N: Notifier> Workflow<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run the full stage sequence and return the invocation report.
    ///
    /// Only unrecoverable errors (bad configuration, schema violations,
    /// infrastructure faults) surface here; everything else degrades to
    /// absent result fields.
    pub async fn run(&self, config: PipelineConfig) -> FpResult<AnalysisReport> {
        if config.forecast_days == 0 {
            return Err(FpError::Config(
                "forecast_days must be greater than zero".to_string(),
            ));
        }

        let state = WorkflowState::new(config);
        let state = self.load(state).await?;
        let state = self.forecast(state).await;
        let state = self.shortfall(state);
        let state = self.operational_risk(state);
        let state = self.safety_risk(state);
        self.dispatch_alerts(&state).await;

        info!(stage = %Stage::Terminal, "Workflow complete");
        Ok(state.into_report())
    }

    async fn load(&self, state: WorkflowState) -> FpResult<WorkflowState> {
        info!(stage = %Stage::Load, "Loading dataset");
        match fp_data::load_dataset(&state.config.data_path).await {
            Ok(dataset) => {
                for finding in fp_data::audit_dataset(&dataset) {
                    warn!(stage = %Stage::Load, "Data quality: {}", finding);
                }
                Ok(state.with_dataset(Some(dataset)))
            }
            Err(e) if e.is_stage_recoverable() => {
                warn!(stage = %Stage::Load, "Stage skipped: {}", e);
                Ok(state.with_dataset(None))
            }
            Err(e) => Err(e),
        }
    }

    async fn forecast(&self, state: WorkflowState) -> WorkflowState {
        let result = match state.dataset.as_ref() {
            None => None,
            Some(dataset) => {
                info!(stage = %Stage::Forecast, "Forecasting production");
                self.fit_forecast(dataset, state.config.forecast_days).await
            }
        };
        state.with_forecast(result)
    }

    /// Run the model fit on a blocking thread under a deadline. Fit cost is
    /// the only thing here that scales with dataset size, so it is the one
    /// operation bounded by a timeout.
    async fn fit_forecast(&self, dataset: &Dataset, horizon: u32) -> Option<Vec<ForecastPoint>> {
        let dataset = dataset.clone();
        let fit = tokio::time::timeout(
            FORECAST_DEADLINE,
            tokio::task::spawn_blocking(move || {
                fp_forecast::forecast_production(&dataset, horizon)
            }),
        )
        .await;

        match fit {
            Ok(Ok(Ok(points))) => Some(points),
            Ok(Ok(Err(e))) => {
                warn!(stage = %Stage::Forecast, "Stage skipped: {}", e);
                None
            }
            Ok(Err(join_err)) => {
                warn!(stage = %Stage::Forecast, "Stage skipped: fit task failed: {}", join_err);
                None
            }
            Err(_) => {
                let e = FpError::from(ForecastError::Timeout {
                    timeout_seconds: FORECAST_DEADLINE.as_secs(),
                });
                warn!(stage = %Stage::Forecast, "Stage skipped: {}", e);
                None
            }
        }
    }

    fn shortfall(&self, state: WorkflowState) -> WorkflowState {
        let result = match state.forecast.as_deref() {
            None => None,
            Some(forecast) => {
                info!(stage = %Stage::Shortfall, "Checking monthly targets");
                Some(fp_forecast::detect_shortfall(
                    forecast,
                    state.config.monthly_target,
                ))
            }
        };
        state.with_shortfall(result)
    }

    fn operational_risk(&self, state: WorkflowState) -> WorkflowState {
        let result = match state.dataset.as_ref() {
            None => None,
            Some(dataset) => {
                info!(stage = %Stage::OperationalRisk, "Scoring operational risk");
                match fp_risk::score_operational_risk(dataset) {
                    Ok(scores) => Some(scores),
                    Err(e) => {
                        warn!(stage = %Stage::OperationalRisk, "Stage skipped: {}", e);
                        None
                    }
                }
            }
        };
        state.with_operational_risk(result)
    }

    fn safety_risk(&self, state: WorkflowState) -> WorkflowState {
        let result = match state.dataset.as_ref() {
            None => None,
            Some(dataset) => {
                info!(stage = %Stage::SafetyRisk, "Scoring safety risk");
                match fp_risk::score_safety_risk(dataset) {
                    Ok(scores) => Some(scores),
                    Err(e) => {
                        warn!(stage = %Stage::SafetyRisk, "Stage skipped: {}", e);
                        None
                    }
                }
            }
        };
        state.with_safety_risk(result)
    }

    async fn dispatch_alerts(&self, state: &WorkflowState) {
        let mut alerts: Vec<Alert> = Vec::new();
        if let Some(shortfall) = &state.shortfall {
            alerts.extend(shortfall_alert(shortfall, &state.config.alert));
        }
        if let Some(scores) = &state.operational_risk {
            alerts.extend(operational_risk_alert(scores, &state.config.alert));
        }
        if let Some(scores) = &state.safety_risk {
            alerts.extend(safety_alert(scores, &state.config.alert));
        }

        if alerts.is_empty() {
            info!(stage = %Stage::Alert, "Nothing flagged; no alerts sent");
            return;
        }

        for alert in &alerts {
            // Delivery failures never fail the workflow
            match self.notifier.send(alert).await {
                Ok(()) => info!(stage = %Stage::Alert, "Sent {} alert", alert.kind),
                Err(e) => warn!(
                    stage = %Stage::Alert,
                    notifier = self.notifier.name(),
                    "Failed to send {} alert: {}",
                    alert.kind,
                    e
                ),
            }
        }
    }
}
