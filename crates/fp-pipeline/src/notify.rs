//! The delivery seam for outbound alerts.

use async_trait::async_trait;

use fp_types::NotifyError;

use crate::alerts::Alert;

/// Trait for alert delivery transports (SMTP, chat webhooks, etc.)
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert to its recipient.
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError>;

    /// Get transport name
    fn name(&self) -> &str;
}

/// Notifier that writes alerts to the log instead of delivering them.
///
/// Useful for local runs and environments without an outbound transport.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        tracing::info!(
            kind = %alert.kind,
            subject = %alert.subject,
            to = %alert.to,
            "ALERT\n{}",
            alert.body
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
