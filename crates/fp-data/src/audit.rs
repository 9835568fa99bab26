//! Data-quality checks run after loading.
//!
//! Findings are advisory: the loader stage logs them without rejecting data.

use fp_types::Dataset;

/// Scan a dataset for suspicious values and return human-readable findings.
pub fn audit_dataset(dataset: &Dataset) -> Vec<String> {
    let mut issues = Vec::new();

    if dataset.is_empty() {
        issues.push("No records found".to_string());
        return issues;
    }

    for (i, rec) in dataset.iter().enumerate() {
        if rec.units_produced < 0.0 {
            issues.push(format!("Negative units produced at row {}", i));
        }
        if rec.orders < 0.0 {
            issues.push(format!("Negative orders at row {}", i));
        }
        if rec.repairs_processed < 0.0 || rec.warranty_claims < 0.0 {
            issues.push(format!("Negative repair/claim count at row {}", i));
        }
        if rec.qa_pass_rate < 0.0 || rec.qa_pass_rate > 1.0 {
            issues.push(format!(
                "QA pass rate {} out of [0, 1] at row {}",
                rec.qa_pass_rate, i
            ));
        }
        if rec.container_utilization < 0.0 || rec.container_utilization > 1.0 {
            issues.push(format!(
                "Container utilization {} out of [0, 1] at row {}",
                rec.container_utilization, i
            ));
        }
    }

    // Observation dates should be non-decreasing
    let mut prev_date = dataset.records[0].date;
    for (i, rec) in dataset.iter().enumerate().skip(1) {
        if rec.date < prev_date {
            issues.push(format!("Date out of order at row {}", i));
        }
        prev_date = rec.date;
    }

    issues
}
