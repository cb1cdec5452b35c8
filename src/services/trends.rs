//! Per-location day-length trend detection.

use std::collections::HashMap;

use crate::api::{LocationTrend, TrendDirection};
use crate::models::AstronomicalRecord;

/// Average rate above which a trend counts as increasing (and below whose
/// negation as decreasing), in minutes per day.
const TREND_THRESHOLD_MINUTES_PER_DAY: f64 = 1.0;

/// Compute day-length trends for every location with at least two records.
///
/// Each location's records are sorted by date ascending; every consecutive
/// pair contributes one per-step rate `Δminutes / days_between`, and the
/// rates are averaged with equal weight regardless of gap length (not a
/// single slope across the whole span). Sibling records sharing a date
/// contribute no step; a location with no usable step is omitted.
pub fn compute_location_trends(records: &[AstronomicalRecord]) -> Vec<LocationTrend> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_location: HashMap<&str, Vec<&AstronomicalRecord>> = HashMap::new();

    for record in records {
        by_location
            .entry(record.location.as_str())
            .or_insert_with(|| {
                order.push(record.location.as_str());
                Vec::new()
            })
            .push(record);
    }

    let mut trends = Vec::new();

    for location in order {
        let mut location_records = by_location.remove(location).unwrap_or_default();
        if location_records.len() < 2 {
            continue;
        }

        location_records.sort_by_key(|r| r.date);

        let mut step_rates = Vec::new();
        for pair in location_records.windows(2) {
            let days_between = (pair[1].date - pair[0].date).num_days();
            if days_between == 0 {
                continue;
            }
            let delta_minutes = pair[1].day_length_minutes() - pair[0].day_length_minutes();
            step_rates.push(delta_minutes / days_between as f64);
        }

        if step_rates.is_empty() {
            continue;
        }

        let change_rate = step_rates.iter().sum::<f64>() / step_rates.len() as f64;
        let direction = if change_rate > TREND_THRESHOLD_MINUTES_PER_DAY {
            TrendDirection::Increasing
        } else if change_rate < -TREND_THRESHOLD_MINUTES_PER_DAY {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        };

        trends.push(LocationTrend {
            location: location.to_string(),
            direction,
            change_rate_minutes_per_day: change_rate,
        });
    }

    trends
}

#[cfg(test)]
#[path = "trends_tests.rs"]
mod trends_tests;
