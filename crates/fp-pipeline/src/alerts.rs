//! Alert construction from flagged analysis results.
//!
//! Builders return `None` when nothing is flagged; a kind with no flagged
//! rows is a silent no-op, not an error.

use std::fmt;
use std::fmt::Write;

use uuid::Uuid;

use fp_types::{AlertConfig, LocationRiskScore, LocationSafetyScore, MonthlyShortfall, RiskTier};

/// Discriminant for the kind of alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Shortfall,
    OperationalRisk,
    SafetyRisk,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertKind::Shortfall => "Shortfall",
            AlertKind::OperationalRisk => "OperationalRisk",
            AlertKind::SafetyRisk => "SafetyRisk",
        };
        write!(f, "{}", s)
    }
}

/// A single outbound alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: String,
}

impl Alert {
    pub fn new(kind: AlertKind, subject: String, body: String, from: String, to: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            subject,
            body,
            from,
            to,
        }
    }
}

/// Build a shortfall alert from months flagged below target.
pub fn shortfall_alert(results: &[MonthlyShortfall], config: &AlertConfig) -> Option<Alert> {
    let flagged: Vec<&MonthlyShortfall> = results.iter().filter(|r| r.shortfall).collect();
    if flagged.is_empty() {
        return None;
    }

    let mut body = String::from(
        "Forecasted production falls below the monthly target for the following month(s):\n\n",
    );
    for row in flagged {
        let _ = writeln!(body, "Month {}:", row.month);
        let _ = writeln!(body, "- Forecasted Total Units: {:.2}", row.forecast_units);
        let _ = writeln!(body, "- Monthly Target: {:.2}\n", row.monthly_target);
    }

    Some(Alert::new(
        AlertKind::Shortfall,
        "Production Shortfall Alert".to_string(),
        body,
        config.sender.clone(),
        config.recipient.clone(),
    ))
}

/// Build an operational risk alert from locations in the High tier.
pub fn operational_risk_alert(
    scores: &[LocationRiskScore],
    config: &AlertConfig,
) -> Option<Alert> {
    let flagged: Vec<&LocationRiskScore> =
        scores.iter().filter(|s| s.tier == RiskTier::High).collect();
    if flagged.is_empty() {
        return None;
    }

    let mut body =
        String::from("The following facilities are classified as high operational risk:\n\n");
    for row in flagged {
        let _ = writeln!(body, "Location: {}", row.location);
        let _ = writeln!(body, "- Mean Risk Score: {:.2}", row.mean_risk_score);
        let _ = writeln!(body, "- Risk Tier: {}\n", row.tier);
    }

    Some(Alert::new(
        AlertKind::OperationalRisk,
        "High-Risk Location Alert".to_string(),
        body,
        config.sender.clone(),
        config.recipient.clone(),
    ))
}

/// Build a safety alert from locations in the High safety tier.
pub fn safety_alert(scores: &[LocationSafetyScore], config: &AlertConfig) -> Option<Alert> {
    let flagged: Vec<&LocationSafetyScore> =
        scores.iter().filter(|s| s.tier == RiskTier::High).collect();
    if flagged.is_empty() {
        return None;
    }

    let mut body = String::from(
        "The following facilities are at high risk of disruption due to safety lapses:\n\n",
    );
    for row in flagged {
        let _ = writeln!(body, "Location: {}", row.location);
        let _ = writeln!(body, "- Safety Risk Score: {:.2}", row.safety_score);
        let _ = writeln!(
            body,
            "- Repairs Per 1000 Units: {:.2}",
            row.repairs_per_1000_units
        );
        let _ = writeln!(
            body,
            "- Claims Per 1000 Units: {:.2}",
            row.claims_per_1000_units
        );
        let _ = writeln!(body, "- Average QA Pass Rate: {:.2}\n", row.qa_pass_rate);
    }

    Some(Alert::new(
        AlertKind::SafetyRisk,
        "High-Risk Safety Alert".to_string(),
        body,
        config.sender.clone(),
        config.recipient.clone(),
    ))
}
