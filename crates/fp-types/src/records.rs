use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A manufacturing site, keyed by city and country
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn new(city: &str, country: &str) -> Self {
        Self {
            city: city.to_string(),
            country: country.to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

/// One daily operations observation for a site/model/part combination.
///
/// Numeric fields are zero when the source cell was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpsRecord {
    pub date: NaiveDate,
    pub city: String,
    pub country: String,
    pub model: String,
    pub part: String,
    pub units_produced: f64,
    pub orders: f64,
    pub production_cost: f64,
    pub warranties_processed: f64,
    pub warranty_claims: f64,
    pub repairs_processed: f64,
    pub qa_pass_rate: f64,
    pub shipping_cost: f64,
    pub on_time_deliveries: f64,
    pub container_utilization: f64,
}

impl OpsRecord {
    pub fn location(&self) -> Location {
        Location::new(&self.city, &self.country)
    }
}

/// Ordered collection of operations observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<OpsRecord>,
}

impl Dataset {
    pub fn new(records: Vec<OpsRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OpsRecord> {
        self.records.iter()
    }

    /// First and last observation dates, if any records exist.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}
