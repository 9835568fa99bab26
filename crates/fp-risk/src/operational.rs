//! Operational risk scoring across quality and logistics metrics.

use std::collections::BTreeMap;

use fp_types::{Dataset, FpResult, Location, LocationRiskScore, OpsRecord};

use crate::scorer::{assign_tiers, score_rows, MetricSpec};

/// Score every location's operational risk and assign tiers.
///
/// Higher repairs, claims, warranty volume and shipping cost raise risk;
/// higher QA pass rate, on-time deliveries and container utilization lower it.
pub fn score_operational_risk(dataset: &Dataset) -> FpResult<Vec<LocationRiskScore>> {
    let metrics: [MetricSpec<OpsRecord>; 7] = [
        MetricSpec {
            name: "repairs_processed",
            direction: 1.0,
            extract: |r| r.repairs_processed,
        },
        MetricSpec {
            name: "warranty_claims",
            direction: 1.0,
            extract: |r| r.warranty_claims,
        },
        MetricSpec {
            name: "qa_pass_rate",
            direction: -1.0,
            extract: |r| r.qa_pass_rate,
        },
        MetricSpec {
            name: "warranties_processed",
            direction: 1.0,
            extract: |r| r.warranties_processed,
        },
        MetricSpec {
            name: "shipping_cost",
            direction: 1.0,
            extract: |r| r.shipping_cost,
        },
        MetricSpec {
            name: "on_time_deliveries",
            direction: -1.0,
            extract: |r| r.on_time_deliveries,
        },
        MetricSpec {
            name: "container_utilization",
            direction: -1.0,
            extract: |r| r.container_utilization,
        },
    ];

    let row_scores = score_rows(&dataset.records, &metrics);

    let mut groups: BTreeMap<Location, Vec<usize>> = BTreeMap::new();
    for (i, rec) in dataset.iter().enumerate() {
        groups.entry(rec.location()).or_default().push(i);
    }

    let group_scores: Vec<f64> = groups
        .values()
        .map(|rows| rows.iter().map(|&i| row_scores[i]).sum::<f64>() / rows.len() as f64)
        .collect();
    let tiers = assign_tiers(&group_scores)?;

    let results: Vec<LocationRiskScore> = groups
        .into_iter()
        .zip(group_scores.iter().zip(tiers))
        .map(|((location, rows), (&mean_risk_score, tier))| {
            let n = rows.len() as f64;
            LocationRiskScore {
                location,
                mean_risk_score,
                total_repairs_processed: rows
                    .iter()
                    .map(|&i| dataset.records[i].repairs_processed)
                    .sum(),
                total_warranty_claims: rows
                    .iter()
                    .map(|&i| dataset.records[i].warranty_claims)
                    .sum(),
                on_time_delivery_rate: rows
                    .iter()
                    .map(|&i| dataset.records[i].on_time_deliveries)
                    .sum::<f64>()
                    / n,
                tier,
            }
        })
        .collect();

    tracing::info!("Scored operational risk for {} locations", results.len());
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_types::{FpError, RiskError, RiskTier};

    fn record(city: &str, repairs: f64, qa: f64) -> OpsRecord {
        OpsRecord {
            date: "2024-01-01".parse().unwrap(),
            city: city.to_string(),
            country: "Germany".to_string(),
            model: "M1".to_string(),
            part: "P1".to_string(),
            units_produced: 1000.0,
            orders: 900.0,
            production_cost: 10_000.0,
            warranties_processed: 5.0,
            warranty_claims: repairs / 2.0,
            repairs_processed: repairs,
            qa_pass_rate: qa,
            shipping_cost: 500.0,
            on_time_deliveries: 95.0,
            container_utilization: 0.8,
        }
    }

    fn three_city_dataset() -> Dataset {
        Dataset::new(vec![
            record("Austin", 50.0, 0.99),
            record("Lyon", 5.0, 0.999),
            record("Munich", 20.0, 0.995),
        ])
    }

    #[test]
    fn riskier_city_scores_higher_and_tiers_higher() {
        let scores = score_operational_risk(&three_city_dataset()).unwrap();

        let austin = scores.iter().find(|s| s.location.city == "Austin").unwrap();
        let lyon = scores.iter().find(|s| s.location.city == "Lyon").unwrap();

        assert!(austin.mean_risk_score > lyon.mean_risk_score);
        assert!(austin.tier > lyon.tier);
        assert_eq!(austin.tier, RiskTier::High);
        assert_eq!(lyon.tier, RiskTier::Low);
    }

    #[test]
    fn aggregates_sum_and_average_per_location() {
        let mut records = vec![
            record("Munich", 10.0, 0.99),
            record("Munich", 20.0, 0.98),
            record("Lyon", 5.0, 0.999),
            record("Austin", 50.0, 0.95),
        ];
        records[0].on_time_deliveries = 90.0;
        records[1].on_time_deliveries = 100.0;
        let scores = score_operational_risk(&Dataset::new(records)).unwrap();

        let munich = scores.iter().find(|s| s.location.city == "Munich").unwrap();
        assert_eq!(munich.total_repairs_processed, 30.0);
        assert_eq!(munich.total_warranty_claims, 15.0);
        assert_eq!(munich.on_time_delivery_rate, 95.0);
    }

    #[test]
    fn rescoring_an_unchanged_dataset_is_deterministic() {
        let dataset = three_city_dataset();
        let first = score_operational_risk(&dataset).unwrap();
        let second = score_operational_risk(&dataset).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn two_locations_cannot_be_tiered() {
        let dataset = Dataset::new(vec![record("Austin", 50.0, 0.99), record("Lyon", 5.0, 0.999)]);
        let err = score_operational_risk(&dataset).unwrap_err();
        assert!(matches!(
            err,
            FpError::Risk(RiskError::DegenerateDistribution { distinct: 2 })
        ));
    }
}
