use thiserror::Error;

/// Main error type for the FactoryPulse system
#[derive(Error, Debug)]
pub enum FpError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Risk error: {0}")]
    Risk(#[from] RiskError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FpError {
    /// Whether a stage may recover from this error by producing a null result
    /// and letting the workflow continue. Schema and infrastructure errors are
    /// not recoverable; they abort the invocation.
    pub fn is_stage_recoverable(&self) -> bool {
        match self {
            FpError::Data(DataError::NotFound { .. }) => true,
            FpError::Forecast(_) => true,
            FpError::Risk(_) => true,
            _ => false,
        }
    }
}

/// Data-related errors
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data source not found: {path}")]
    NotFound { path: String },

    #[error("Missing required column: {column}")]
    Schema { column: String },

    #[error("Row {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Forecasting errors
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Insufficient history: {observed} days observed, at least {required} required")]
    InsufficientHistory { observed: i64, required: i64 },

    #[error("Model fit failed: {message}")]
    FitFailed { message: String },

    #[error("Invalid forecast horizon: {days} days")]
    InvalidHorizon { days: u32 },

    #[error("Forecast timed out: fit took longer than {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },
}

/// Risk scoring errors
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Degenerate score distribution: {distinct} distinct group scores, need at least 3")]
    DegenerateDistribution { distinct: usize },
}

/// Alert delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Delivery to {recipient} failed: {message}")]
    DeliveryFailed { recipient: String, message: String },
}

/// Result type alias for FactoryPulse operations
pub type FpResult<T> = Result<T, FpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DataError::Schema {
            column: "Units produced".to_string(),
        };
        assert!(err.to_string().contains("Units produced"));
    }

    #[test]
    fn error_conversion() {
        let data_err = DataError::NotFound {
            path: "/tmp/missing.csv".to_string(),
        };
        let err: FpError = data_err.into();
        match err {
            FpError::Data(_) => (),
            _ => panic!("Expected Data error"),
        }
    }

    #[test]
    fn recoverable_classification() {
        let not_found: FpError = DataError::NotFound { path: "x".into() }.into();
        let schema: FpError = DataError::Schema { column: "DATE".into() }.into();
        let thin_history: FpError = ForecastError::InsufficientHistory {
            observed: 5,
            required: 14,
        }
        .into();
        let degenerate: FpError = RiskError::DegenerateDistribution { distinct: 1 }.into();

        assert!(not_found.is_stage_recoverable());
        assert!(thin_history.is_stage_recoverable());
        assert!(degenerate.is_stage_recoverable());
        assert!(!schema.is_stage_recoverable());
    }
}
