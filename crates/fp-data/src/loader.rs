//! CSV dataset loading.

use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;

use fp_types::{DataError, Dataset, FpResult, OpsRecord};

use crate::schema::ColumnIndex;

/// Load an operations dataset from a CSV file.
///
/// The header row is validated against the required schema before any record
/// is parsed. Malformed rows are skipped with a warning; empty numeric cells
/// parse as zero.
pub async fn load_dataset<P: AsRef<Path>>(path: P) -> FpResult<Dataset> {
    let path = path.as_ref();
    tracing::info!("Loading operations data from: {}", path.display());

    if !path.exists() {
        return Err(DataError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| DataError::NotFound {
            path: format!("{}: {}", path.display(), e),
        })?;

    let headers = rdr
        .headers()
        .map_err(|e| DataError::Parse {
            line: 1,
            message: format!("Failed to read CSV headers: {}", e),
        })?
        .clone();
    let columns = ColumnIndex::detect(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_num, result) in rdr.records().enumerate() {
        let line = row_num + 2; // header is line 1
        let record = result.map_err(|e| DataError::Parse {
            line,
            message: format!("Failed to read CSV record: {}", e),
        })?;

        match parse_record(&record, &columns, line) {
            Ok(rec) => records.push(rec),
            Err(e) => {
                tracing::warn!("Skipping invalid record at line {}: {}", line, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} malformed rows in {}", skipped, path.display());
    }
    tracing::info!("Loaded {} operations records", records.len());
    Ok(Dataset::new(records))
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &ColumnIndex,
    line: usize,
) -> FpResult<OpsRecord> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    Ok(OpsRecord {
        date: parse_date(field(columns.date), line)?,
        city: field(columns.city).to_string(),
        country: field(columns.country).to_string(),
        model: field(columns.model).to_string(),
        part: field(columns.part).to_string(),
        units_produced: parse_numeric(field(columns.units_produced), "Units produced", line)?,
        orders: parse_numeric(field(columns.orders), "ORDERS", line)?,
        production_cost: parse_numeric(field(columns.production_cost), "Production Cost", line)?,
        warranties_processed: parse_numeric(
            field(columns.warranties_processed),
            "Warranties processed",
            line,
        )?,
        warranty_claims: parse_numeric(field(columns.warranty_claims), "Warranty claims", line)?,
        repairs_processed: parse_numeric(
            field(columns.repairs_processed),
            "Repairs Processed",
            line,
        )?,
        qa_pass_rate: parse_numeric(field(columns.qa_pass_rate), "QA pass rate", line)?,
        shipping_cost: parse_numeric(field(columns.shipping_cost), "Shipping Cost", line)?,
        on_time_deliveries: parse_numeric(
            field(columns.on_time_deliveries),
            "On time deliveries",
            line,
        )?,
        container_utilization: parse_numeric(
            field(columns.container_utilization),
            "Shipping container utilization",
            line,
        )?,
    })
}

fn parse_date(value: &str, line: usize) -> FpResult<NaiveDate> {
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for format in &formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    Err(DataError::Parse {
        line,
        message: format!("Could not parse date: {}", value),
    }
    .into())
}

/// Empty cells default to zero; anything else must parse as a number.
fn parse_numeric(value: &str, column: &str, line: usize) -> FpResult<f64> {
    if value.is_empty() {
        return Ok(0.0);
    }
    value.parse::<f64>().map_err(|e| {
        DataError::Parse {
            line,
            message: format!("Could not parse {} value '{}': {}", column, value, e),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_types::FpError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "DATE,CITY,COUNTRY,MODEL,PART,Units produced,ORDERS,Production Cost,\
Warranties processed,Warranty claims,Repairs Processed,QA pass rate,Shipping Cost,\
On time deliveries,Shipping container utilization";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn loads_well_formed_rows() {
        let file = write_csv(&[
            "2024-01-01,Munich,Germany,M1,P1,120,110,5000,4,2,6,0.97,300,95,0.82",
            "2024-01-02,Lyon,France,M1,P2,90,100,4200,3,1,2,0.99,280,97,0.75",
        ]);

        let dataset = load_dataset(file.path()).await.unwrap();
        assert_eq!(dataset.len(), 2);

        let first = &dataset.records[0];
        assert_eq!(first.city, "Munich");
        assert_eq!(first.units_produced, 120.0);
        assert_eq!(first.qa_pass_rate, 0.97);
        assert_eq!(first.date, "2024-01-01".parse::<NaiveDate>().unwrap());
    }

    #[tokio::test]
    async fn empty_numeric_cells_default_to_zero() {
        let file = write_csv(&["2024-01-01,Munich,Germany,M1,P1,120,,5000,,2,6,0.97,300,95,"]);

        let dataset = load_dataset(file.path()).await.unwrap();
        let rec = &dataset.records[0];
        assert_eq!(rec.orders, 0.0);
        assert_eq!(rec.warranties_processed, 0.0);
        assert_eq!(rec.container_utilization, 0.0);
        assert_eq!(rec.units_produced, 120.0);
    }

    #[tokio::test]
    async fn malformed_rows_are_skipped() {
        let file = write_csv(&[
            "2024-01-01,Munich,Germany,M1,P1,120,110,5000,4,2,6,0.97,300,95,0.82",
            "not-a-date,Munich,Germany,M1,P1,120,110,5000,4,2,6,0.97,300,95,0.82",
            "2024-01-03,Munich,Germany,M1,P1,abc,110,5000,4,2,6,0.97,300,95,0.82",
        ]);

        let dataset = load_dataset(file.path()).await.unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[tokio::test]
    async fn slash_separated_dates_parse() {
        let file = write_csv(&["2024/01/05,Munich,Germany,M1,P1,120,110,5000,4,2,6,0.97,300,95,0.82"]);
        let dataset = load_dataset(file.path()).await.unwrap();
        assert_eq!(
            dataset.records[0].date,
            "2024-01-05".parse::<NaiveDate>().unwrap()
        );
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let result = load_dataset("/path/that/does/not/exist.csv").await;
        match result.unwrap_err() {
            FpError::Data(DataError::NotFound { .. }) => (),
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_column_is_schema_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "DATE,CITY,COUNTRY").unwrap();
        writeln!(file, "2024-01-01,Munich,Germany").unwrap();
        file.flush().unwrap();

        let result = load_dataset(file.path()).await;
        match result.unwrap_err() {
            FpError::Data(DataError::Schema { column }) => assert_eq!(column, "MODEL"),
            other => panic!("Expected Schema error, got: {:?}", other),
        }
    }
}
