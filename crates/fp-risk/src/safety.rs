//! Safety risk scoring on per-unit failure ratios.

use std::collections::BTreeMap;

use fp_types::{Dataset, FpResult, Location, LocationSafetyScore, OpsRecord};

use crate::scorer::{assign_tiers, score_rows, MetricSpec};

/// Per-row safety view derived from the raw record.
#[derive(Debug, Clone, PartialEq)]
struct SafetyRow {
    location: Location,
    repairs_per_1000_units: f64,
    claims_per_1000_units: f64,
    qa_pass_rate: f64,
}

/// `count / units * 1000`, or zero when no units were produced.
fn per_thousand_units(count: f64, units: f64) -> f64 {
    if units > 0.0 {
        count / units * 1000.0
    } else {
        0.0
    }
}

impl SafetyRow {
    fn derive(rec: &OpsRecord) -> Self {
        Self {
            location: rec.location(),
            repairs_per_1000_units: per_thousand_units(rec.repairs_processed, rec.units_produced),
            claims_per_1000_units: per_thousand_units(rec.warranty_claims, rec.units_produced),
            qa_pass_rate: rec.qa_pass_rate,
        }
    }
}

/// Score every location's safety risk and assign tiers.
///
/// Failure ratios are derived per row before normalization, so high-volume
/// sites are compared on rate rather than raw counts.
pub fn score_safety_risk(dataset: &Dataset) -> FpResult<Vec<LocationSafetyScore>> {
    let rows: Vec<SafetyRow> = dataset.iter().map(SafetyRow::derive).collect();

    let metrics: [MetricSpec<SafetyRow>; 3] = [
        MetricSpec {
            name: "repairs_per_1000_units",
            direction: 1.0,
            extract: |r| r.repairs_per_1000_units,
        },
        MetricSpec {
            name: "claims_per_1000_units",
            direction: 1.0,
            extract: |r| r.claims_per_1000_units,
        },
        MetricSpec {
            name: "qa_pass_rate",
            direction: -1.0,
            extract: |r| r.qa_pass_rate,
        },
    ];

    let row_scores = score_rows(&rows, &metrics);

    let mut groups: BTreeMap<Location, Vec<usize>> = BTreeMap::new();
    for (i, row) in rows.iter().enumerate() {
        groups.entry(row.location.clone()).or_default().push(i);
    }

    let group_scores: Vec<f64> = groups
        .values()
        .map(|idxs| idxs.iter().map(|&i| row_scores[i]).sum::<f64>() / idxs.len() as f64)
        .collect();
    let tiers = assign_tiers(&group_scores)?;

    let mean = |idxs: &[usize], f: fn(&SafetyRow) -> f64| -> f64 {
        idxs.iter().map(|&i| f(&rows[i])).sum::<f64>() / idxs.len() as f64
    };

    let results: Vec<LocationSafetyScore> = groups
        .iter()
        .zip(group_scores.iter().zip(tiers))
        .map(|((location, idxs), (&safety_score, tier))| LocationSafetyScore {
            location: location.clone(),
            safety_score,
            repairs_per_1000_units: mean(idxs, |r| r.repairs_per_1000_units),
            claims_per_1000_units: mean(idxs, |r| r.claims_per_1000_units),
            qa_pass_rate: mean(idxs, |r| r.qa_pass_rate),
            tier,
        })
        .collect();

    tracing::info!("Scored safety risk for {} locations", results.len());
    Ok(results)
}
