//! Monthly shortfall detection.

use std::collections::BTreeMap;

use chrono::Datelike;

use fp_types::{ForecastPoint, MonthlyShortfall};

/// Aggregate forecast points by calendar month and flag months whose total
/// falls strictly below the target.
///
/// A month only partially covered by the horizon sums just the days present;
/// no pro-rating is applied. Months are returned in ascending order.
pub fn detect_shortfall(forecast: &[ForecastPoint], monthly_target: f64) -> Vec<MonthlyShortfall> {
    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for point in forecast {
        *totals
            .entry((point.date.year(), point.date.month()))
            .or_insert(0.0) += point.units;
    }

    totals
        .into_iter()
        .map(|((year, month), total)| {
            MonthlyShortfall::new(format!("{:04}-{:02}", year, month), total, monthly_target)
        })
        .collect()
}
