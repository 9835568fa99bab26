//! Production forecasting for FactoryPulse.
//!
//! Provides:
//! - Per-invocation label encoding of categorical dimensions
//! - An additive seasonal regression model with exogenous regressors
//! - Horizon projection under a last-value persistence assumption
//! - Monthly shortfall detection against a production target

pub mod encoder;
pub mod engine;
pub mod model;
pub mod shortfall;

pub use encoder::CategoryEncoder;
pub use engine::forecast_production;
pub use model::{SeasonalComponent, SeasonalRegression};
pub use shortfall::detect_shortfall;
