//! Static column schema for the operations CSV format.
//!
//! The header row is validated once at load time; a missing column fails the
//! whole load with [`DataError::Schema`] rather than surfacing deep inside a
//! later stage.

use fp_types::{DataError, FpResult};

/// Positions of every required column within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub city: usize,
    pub country: usize,
    pub model: usize,
    pub part: usize,
    pub units_produced: usize,
    pub orders: usize,
    pub production_cost: usize,
    pub warranties_processed: usize,
    pub warranty_claims: usize,
    pub repairs_processed: usize,
    pub qa_pass_rate: usize,
    pub shipping_cost: usize,
    pub on_time_deliveries: usize,
    pub container_utilization: usize,
}

impl ColumnIndex {
    /// Detect column positions from a header row, case-insensitively.
    ///
    /// Unknown columns are ignored; any required column that is absent yields
    /// `DataError::Schema` naming it.
    pub fn detect(headers: &csv::StringRecord) -> FpResult<Self> {
        let mut date = None;
        let mut city = None;
        let mut country = None;
        let mut model = None;
        let mut part = None;
        let mut units_produced = None;
        let mut orders = None;
        let mut production_cost = None;
        let mut warranties_processed = None;
        let mut warranty_claims = None;
        let mut repairs_processed = None;
        let mut qa_pass_rate = None;
        let mut shipping_cost = None;
        let mut on_time_deliveries = None;
        let mut container_utilization = None;

        for (i, header) in headers.iter().enumerate() {
            match header.trim().to_lowercase().as_str() {
                "date" => date = Some(i),
                "city" => city = Some(i),
                "country" => country = Some(i),
                "model" => model = Some(i),
                "part" => part = Some(i),
                "units produced" => units_produced = Some(i),
                "orders" => orders = Some(i),
                "production cost" => production_cost = Some(i),
                "warranties processed" => warranties_processed = Some(i),
                "warranty claims" => warranty_claims = Some(i),
                "repairs processed" => repairs_processed = Some(i),
                "qa pass rate" => qa_pass_rate = Some(i),
                "shipping cost" => shipping_cost = Some(i),
                "on time deliveries" => on_time_deliveries = Some(i),
                "shipping container utilization" => container_utilization = Some(i),
                _ => {} // Ignore unknown columns
            }
        }

        let require = |idx: Option<usize>, column: &str| -> FpResult<usize> {
            idx.ok_or_else(|| {
                DataError::Schema {
                    column: column.to_string(),
                }
                .into()
            })
        };

        Ok(Self {
            date: require(date, "DATE")?,
            city: require(city, "CITY")?,
            country: require(country, "COUNTRY")?,
            model: require(model, "MODEL")?,
            part: require(part, "PART")?,
            units_produced: require(units_produced, "Units produced")?,
            orders: require(orders, "ORDERS")?,
            production_cost: require(production_cost, "Production Cost")?,
            warranties_processed: require(warranties_processed, "Warranties processed")?,
            warranty_claims: require(warranty_claims, "Warranty claims")?,
            repairs_processed: require(repairs_processed, "Repairs Processed")?,
            qa_pass_rate: require(qa_pass_rate, "QA pass rate")?,
            shipping_cost: require(shipping_cost, "Shipping Cost")?,
            on_time_deliveries: require(on_time_deliveries, "On time deliveries")?,
            container_utilization: require(container_utilization, "Shipping container utilization")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_types::FpError;

    fn full_header() -> csv::StringRecord {
        csv::StringRecord::from(vec![
            "DATE",
            "CITY",
            "COUNTRY",
            "MODEL",
            "PART",
            "Units produced",
            "ORDERS",
            "Production Cost",
            "Warranties processed",
            "Warranty claims",
            "Repairs Processed",
            "QA pass rate",
            "Shipping Cost",
            "On time deliveries",
            "Shipping container utilization",
        ])
    }

    #[test]
    fn detects_all_columns() {
        let idx = ColumnIndex::detect(&full_header()).unwrap();
        assert_eq!(idx.date, 0);
        assert_eq!(idx.container_utilization, 14);
    }

    #[test]
    fn detection_is_case_insensitive() {
        let headers = csv::StringRecord::from(vec![
            "date",
            "City",
            "country",
            "model",
            "part",
            "UNITS PRODUCED",
            "orders",
            "production cost",
            "warranties processed",
            "warranty claims",
            "repairs processed",
            "qa Pass Rate",
            "shipping cost",
            "on time deliveries",
            "shipping container utilization",
        ]);
        assert!(ColumnIndex::detect(&headers).is_ok());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let base = full_header();
        let mut headers: Vec<&str> = base.iter().collect();
        headers.push("FACTORY MANAGER");
        let idx = ColumnIndex::detect(&csv::StringRecord::from(headers)).unwrap();
        assert_eq!(idx.units_produced, 5);
    }

    #[test]
    fn missing_column_names_the_column() {
        let headers = csv::StringRecord::from(vec!["DATE", "CITY", "COUNTRY"]);
        let err = ColumnIndex::detect(&headers).unwrap_err();
        match err {
            FpError::Data(DataError::Schema { column }) => assert_eq!(column, "MODEL"),
            other => panic!("Expected Schema error, got: {:?}", other),
        }
    }
}
