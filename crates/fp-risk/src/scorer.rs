//! Shared weighted z-score machinery.
//!
//! Normalization statistics are always computed in-sample, over the dataset
//! being scored, and recomputed on every invocation.

use fp_types::{FpResult, RiskError, RiskTier};

/// One scored metric: where to read it from a row and which way it points.
///
/// `direction` is `+1.0` when a higher value means higher risk and `-1.0`
/// when a higher value means lower risk.
pub struct MetricSpec<R> {
    pub name: &'static str,
    pub direction: f64,
    pub extract: fn(&R) -> f64,
}

/// Z-score a column against its own mean and population standard deviation.
///
/// A zero-variance column normalizes to all zeros: it carries no signal to
/// rank rows by.
pub fn zscore(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    let std = variance.sqrt();
    if std == 0.0 {
        return vec![0.0; n];
    }
    values.iter().map(|v| (v - mean) / std).collect()
}

/// Per-row risk score: the sum of direction-signed z-scores over every metric
/// in the set, each normalized across the full row collection.
pub fn score_rows<R>(rows: &[R], metrics: &[MetricSpec<R>]) -> Vec<f64> {
    let mut scores = vec![0.0; rows.len()];
    for metric in metrics {
        let column: Vec<f64> = rows.iter().map(|r| (metric.extract)(r)).collect();
        for (score, z) in scores.iter_mut().zip(zscore(&column)) {
            *score += z * metric.direction;
        }
    }
    scores
}

/// Assign tiers by splitting group scores into three equal-frequency buckets
/// ordered ascending by score.
///
/// Returns a tier per input index. Fails when fewer than 3 distinct scores
/// exist, since no 3-way split is meaningful.
pub fn assign_tiers(scores: &[f64]) -> FpResult<Vec<RiskTier>> {
    let mut distinct: Vec<f64> = scores.to_vec();
    distinct.sort_by(|a, b| a.total_cmp(b));
    distinct.dedup();
    if distinct.len() < 3 {
        return Err(RiskError::DegenerateDistribution {
            distinct: distinct.len(),
        }
        .into());
    }

    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    // Stable on index so equal scores tier deterministically
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]).then(a.cmp(&b)));

    let mut tiers = vec![RiskTier::Low; n];
    for (rank, &idx) in order.iter().enumerate() {
        tiers[idx] = match rank * 3 / n {
            0 => RiskTier::Low,
            1 => RiskTier::Medium,
            _ => RiskTier::High,
        };
    }
    Ok(tiers)
}
