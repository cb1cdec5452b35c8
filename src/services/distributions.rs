//! Per-source record distribution.

use std::collections::HashMap;

use crate::api::SourceDistribution;
use crate::models::AstronomicalRecord;

/// Record count per distinct source value, in first-encountered order.
pub fn compute_source_distribution(records: &[AstronomicalRecord]) -> Vec<SourceDistribution> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let count = counts.entry(record.source.as_str()).or_insert_with(|| {
            order.push(record.source.as_str());
            0
        });
        *count += 1;
    }

    order
        .into_iter()
        .map(|source| SourceDistribution {
            source: source.to_string(),
            count: counts[source],
        })
        .collect()
}

#[cfg(test)]
#[path = "distributions_tests.rs"]
mod distributions_tests;
