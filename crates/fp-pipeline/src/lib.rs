//! Workflow orchestration for FactoryPulse.
//!
//! Provides:
//! - The fixed-sequence analysis workflow over a shared state snapshot
//! - Null-propagation on recovered stage failures
//! - Alert construction for flagged results
//! - The `Notifier` seam to outbound delivery transports

pub mod alerts;
pub mod notify;
pub mod workflow;

pub use alerts::{operational_risk_alert, safety_alert, shortfall_alert, Alert, AlertKind};
pub use notify::{LogNotifier, Notifier};
pub use workflow::{Stage, Workflow};
