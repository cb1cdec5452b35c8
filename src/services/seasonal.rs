//! Seasonal day-length bucketing.

use std::collections::HashMap;

use crate::api::SeasonalPattern;
use crate::models::{AstronomicalRecord, Season};

/// Locations reported per season.
const TOP_LOCATIONS_PER_SEASON: usize = 3;

/// Bucket every record by the season of its date and compute per-season
/// statistics.
///
/// Output follows the canonical Winter/Spring/Summer/Fall order, seasons
/// with no records omitted. The top locations are ranked by the season's
/// per-location average day length; the sort is stable, so ties keep the
/// first-encountered order of the grouping.
pub fn compute_seasonal_patterns(records: &[AstronomicalRecord]) -> Vec<SeasonalPattern> {
    Season::ALL
        .iter()
        .filter_map(|&season| {
            let season_records: Vec<&AstronomicalRecord> = records
                .iter()
                .filter(|r| r.season() == season)
                .collect();
            if season_records.is_empty() {
                return None;
            }

            let avg_day_length_minutes = season_records
                .iter()
                .map(|r| r.day_length_minutes())
                .sum::<f64>()
                / season_records.len() as f64;

            Some(SeasonalPattern {
                season,
                avg_day_length_minutes,
                top_locations: top_locations(&season_records),
            })
        })
        .collect()
}

/// Rank a season's locations by average day length, keeping up to three.
fn top_locations(season_records: &[&AstronomicalRecord]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();

    for record in season_records {
        let entry = sums.entry(record.location.as_str()).or_insert_with(|| {
            order.push(record.location.as_str());
            (0.0, 0)
        });
        entry.0 += record.day_length_minutes();
        entry.1 += 1;
    }

    let mut ranked: Vec<(&str, f64)> = order
        .into_iter()
        .map(|location| {
            let (sum, count) = sums[location];
            (location, sum / count as f64)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(TOP_LOCATIONS_PER_SEASON)
        .map(|(location, _)| location.to_string())
        .collect()
}

#[cfg(test)]
#[path = "seasonal_tests.rs"]
mod seasonal_tests;
