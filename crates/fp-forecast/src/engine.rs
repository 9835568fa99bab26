//! Production forecast engine.

use chrono::Duration;

use fp_types::{Dataset, ForecastError, ForecastPoint, FpResult};

use crate::encoder::CategoryEncoder;
use crate::model::{SeasonalComponent, SeasonalRegression};

/// Minimum observed span: two full weekly periods.
const MIN_HISTORY_DAYS: i64 = 14;

/// Forecast daily production for the `horizon_days` calendar days following
/// the last observed date.
///
/// Fits an additive model with daily and weekly seasonal components plus
/// exogenous regressors (orders, production cost, warranties processed,
/// warranty claims, and label-encoded city/country/model/part). Over the
/// horizon each regressor is held at its last observed value.
pub fn forecast_production(dataset: &Dataset, horizon_days: u32) -> FpResult<Vec<ForecastPoint>> {
    if horizon_days == 0 {
        return Err(ForecastError::InvalidHorizon { days: 0 }.into());
    }
    let (first_date, last_date) = dataset.date_span().ok_or(ForecastError::InsufficientHistory {
        observed: 0,
        required: MIN_HISTORY_DAYS,
    })?;

    let observed_days = (last_date - first_date).num_days() + 1;
    if observed_days < MIN_HISTORY_DAYS {
        return Err(ForecastError::InsufficientHistory {
            observed: observed_days,
            required: MIN_HISTORY_DAYS,
        }
        .into());
    }

    tracing::info!(
        "Fitting production forecast on {} records spanning {} days",
        dataset.len(),
        observed_days
    );

    // Fresh per-invocation encodings; codes are not stable across runs.
    let cities = CategoryEncoder::fit(dataset.iter().map(|r| r.city.as_str()));
    let countries = CategoryEncoder::fit(dataset.iter().map(|r| r.country.as_str()));
    let models = CategoryEncoder::fit(dataset.iter().map(|r| r.model.as_str()));
    let parts = CategoryEncoder::fit(dataset.iter().map(|r| r.part.as_str()));

    let t: Vec<f64> = dataset
        .iter()
        .map(|r| (r.date - first_date).num_days() as f64)
        .collect();
    let y: Vec<f64> = dataset.iter().map(|r| r.units_produced).collect();

    let regressors: Vec<Vec<f64>> = vec![
        dataset.iter().map(|r| r.orders).collect(),
        dataset.iter().map(|r| r.production_cost).collect(),
        dataset.iter().map(|r| r.warranties_processed).collect(),
        dataset.iter().map(|r| r.warranty_claims).collect(),
        dataset.iter().map(|r| cities.encode(&r.city)).collect(),
        dataset.iter().map(|r| countries.encode(&r.country)).collect(),
        dataset.iter().map(|r| models.encode(&r.model)).collect(),
        dataset.iter().map(|r| parts.encode(&r.part)).collect(),
    ];

    let seasonals = [SeasonalComponent::daily(), SeasonalComponent::weekly()];
    let model = SeasonalRegression::fit(&t, &y, &regressors, &seasonals)?;

    // Persistence assumption: hold every regressor at its last observed value
    let last_values: Vec<f64> = regressors
        .iter()
        .map(|col| col.last().copied().unwrap_or(0.0))
        .collect();

    let forecast: Vec<ForecastPoint> = (1..=i64::from(horizon_days))
        .map(|offset| {
            let date = last_date + Duration::days(offset);
            let t_future = (date - first_date).num_days() as f64;
            ForecastPoint::new(date, model.predict(t_future, &last_values))
        })
        .collect();

    tracing::info!("Forecasted {} future days", forecast.len());
    Ok(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fp_types::{FpError, OpsRecord};

    fn record(date: NaiveDate, city: &str, units: f64) -> OpsRecord {
        OpsRecord {
            date,
            city: city.to_string(),
            country: "Germany".to_string(),
            model: "M1".to_string(),
            part: "P1".to_string(),
            units_produced: units,
            orders: 100.0,
            production_cost: 4_000.0,
            warranties_processed: 3.0,
            warranty_claims: 1.0,
            repairs_processed: 2.0,
            qa_pass_rate: 0.98,
            shipping_cost: 200.0,
            on_time_deliveries: 95.0,
            container_utilization: 0.8,
        }
    }

    fn daily_dataset(days: i64) -> Dataset {
        let start: NaiveDate = "2024-01-01".parse().unwrap();
        let records = (0..days)
            .map(|i| record(start + Duration::days(i), "Munich", 100.0 + 2.0 * i as f64))
            .collect();
        Dataset::new(records)
    }

    #[test]
    fn horizon_has_exact_length_and_contiguous_dates() {
        let dataset = daily_dataset(28);
        let forecast = forecast_production(&dataset, 10).unwrap();

        assert_eq!(forecast.len(), 10);
        let last_observed: NaiveDate = "2024-01-28".parse().unwrap();
        assert_eq!(forecast[0].date, last_observed + Duration::days(1));
        for pair in forecast.windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }
    }

    #[test]
    fn linear_history_extrapolates() {
        let dataset = daily_dataset(28);
        let forecast = forecast_production(&dataset, 5).unwrap();

        // y = 100 + 2t with constant regressors: day 28 should predict ~156
        let first = forecast[0].units;
        assert!(
            (first - 156.0).abs() < 1.0,
            "expected ~156 units, got {}",
            first
        );
    }

    #[test]
    fn panel_data_with_repeated_dates_is_accepted() {
        let start: NaiveDate = "2024-01-01".parse().unwrap();
        let mut records = Vec::new();
        for i in 0..21 {
            let date = start + Duration::days(i);
            records.push(record(date, "Munich", 120.0 + i as f64));
            records.push(record(date, "Lyon", 80.0 + i as f64));
        }
        let dataset = Dataset::new(records);

        let forecast = forecast_production(&dataset, 7).unwrap();
        assert_eq!(forecast.len(), 7);
        assert!(forecast.iter().all(|p| p.units.is_finite()));
    }

    #[test]
    fn short_history_is_rejected() {
        let dataset = daily_dataset(10);
        let err = forecast_production(&dataset, 5).unwrap_err();
        match err {
            FpError::Forecast(ForecastError::InsufficientHistory { observed, required }) => {
                assert_eq!(observed, 10);
                assert_eq!(required, 14);
            }
            other => panic!("Expected InsufficientHistory, got: {:?}", other),
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = forecast_production(&Dataset::default(), 5).unwrap_err();
        assert!(matches!(
            err,
            FpError::Forecast(ForecastError::InsufficientHistory { observed: 0, .. })
        ));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let dataset = daily_dataset(28);
        let err = forecast_production(&dataset, 0).unwrap_err();
        assert!(matches!(
            err,
            FpError::Forecast(ForecastError::InvalidHorizon { days: 0 })
        ));
    }
}
