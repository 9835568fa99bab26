//! Additive seasonal regression with exogenous regressors.
//!
//! The design matrix holds an intercept, a linear trend, Fourier terms for
//! each seasonal component, and the exogenous regressor columns. Coefficients
//! come from an SVD least-squares solve, which tolerates the rank-deficient
//! designs that constant regressor columns produce.

use nalgebra::{DMatrix, DVector};

use fp_types::{ForecastError, FpResult};

/// One seasonal component expressed as a truncated Fourier series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalComponent {
    /// Cycle length in days.
    pub period: f64,
    /// Number of Fourier harmonics.
    pub order: usize,
}

impl SeasonalComponent {
    pub const fn new(period: f64, order: usize) -> Self {
        Self { period, order }
    }

    /// Daily cycle.
    pub const fn daily() -> Self {
        Self::new(1.0, 4)
    }

    /// Weekly cycle.
    pub const fn weekly() -> Self {
        Self::new(7.0, 3)
    }
}

/// A fitted seasonal regression model.
#[derive(Debug, Clone)]
pub struct SeasonalRegression {
    coefficients: DVector<f64>,
    seasonals: Vec<SeasonalComponent>,
    n_regressors: usize,
}

impl SeasonalRegression {
    /// Fit the model.
    ///
    /// `t` is the time index in days, `y` the target, and `regressors` the
    /// exogenous columns (each the same length as `t`).
    pub fn fit(
        t: &[f64],
        y: &[f64],
        regressors: &[Vec<f64>],
        seasonals: &[SeasonalComponent],
    ) -> FpResult<Self> {
        let n = t.len();
        if n == 0 || y.len() != n || regressors.iter().any(|col| col.len() != n) {
            return Err(ForecastError::FitFailed {
                message: format!("Inconsistent design: {} observations", n),
            }
            .into());
        }

        let n_features = Self::feature_count(seasonals, regressors.len());
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                let values: Vec<f64> = regressors.iter().map(|col| col[i]).collect();
                Self::features(t[i], &values, seasonals)
            })
            .collect();
        let design = DMatrix::from_fn(n, n_features, |i, j| rows[i][j]);
        let target = DVector::from_column_slice(y);

        let svd = design.svd(true, true);
        let coefficients = svd.solve(&target, 1e-10).map_err(|e| ForecastError::FitFailed {
            message: e.to_string(),
        })?;

        Ok(Self {
            coefficients,
            seasonals: seasonals.to_vec(),
            n_regressors: regressors.len(),
        })
    }

    /// Predict the target at time index `t` with the given regressor values.
    pub fn predict(&self, t: f64, regressor_values: &[f64]) -> f64 {
        debug_assert_eq!(regressor_values.len(), self.n_regressors);
        let row = Self::features(t, regressor_values, &self.seasonals);
        row.iter()
            .zip(self.coefficients.iter())
            .map(|(x, c)| x * c)
            .sum()
    }

    fn feature_count(seasonals: &[SeasonalComponent], n_regressors: usize) -> usize {
        2 + seasonals.iter().map(|s| 2 * s.order).sum::<usize>() + n_regressors
    }

    /// Feature vector: [1, t, fourier terms..., regressors...].
    fn features(t: f64, regressor_values: &[f64], seasonals: &[SeasonalComponent]) -> Vec<f64> {
        let mut row = Vec::with_capacity(2 + regressor_values.len());
        row.push(1.0);
        row.push(t);
        for seasonal in seasonals {
            for k in 1..=seasonal.order {
                let angle = 2.0 * std::f64::consts::PI * k as f64 * t / seasonal.period;
                row.push(angle.sin());
                row.push(angle.cos());
            }
        }
        row.extend_from_slice(regressor_values);
        row
    }
}
