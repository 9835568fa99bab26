use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single forecasted day of production
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub units: f64,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, units: f64) -> Self {
        Self { date, units }
    }
}

/// Forecasted production for one calendar month measured against the target.
///
/// `shortfall` is strict: a month summing to exactly the target is not flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyShortfall {
    /// Calendar month as "YYYY-MM".
    pub month: String,
    pub forecast_units: f64,
    pub monthly_target: f64,
    pub shortfall: bool,
}

impl MonthlyShortfall {
    pub fn new(month: String, forecast_units: f64, monthly_target: f64) -> Self {
        Self {
            month,
            forecast_units,
            monthly_target,
            shortfall: forecast_units < monthly_target,
        }
    }
}
