//! Aggregate day-length statistics and latitude correlation.
//!
//! All routines are pure functions over a record slice, denominated in
//! minutes throughout. They never mutate their input and recompute from
//! scratch on every invocation, so repeated runs over an unchanged record
//! set yield bit-identical output.

use std::collections::HashMap;

use crate::api::{
    CorrelationLabel, DayLengthStats, LatitudeCorrelation, LocationStat, RecordFilter, Statistics,
};
use crate::db::repository::{ObservationRepository, RepositoryResult};
use crate::models::AstronomicalRecord;
use crate::services::{distributions, seasonal, trends};

/// Seconds to whole minutes, rounding half away from zero.
pub(crate) fn whole_minutes(seconds: i64) -> i64 {
    (seconds as f64 / 60.0).round() as i64
}

/// Compute mean, max, and min day length in whole minutes.
///
/// Each value is converted to minutes before rounding; the mean is taken
/// over fractional minutes and rounded once at the end.
pub(crate) fn compute_day_length_stats(records: &[AstronomicalRecord]) -> DayLengthStats {
    if records.is_empty() {
        return DayLengthStats::default();
    }

    let minutes: Vec<f64> = records.iter().map(|r| r.day_length_minutes()).collect();
    let mean = minutes.iter().sum::<f64>() / minutes.len() as f64;

    let max_seconds = records
        .iter()
        .map(|r| r.day_length_seconds)
        .max()
        .unwrap_or(0);
    let min_seconds = records
        .iter()
        .map(|r| r.day_length_seconds)
        .min()
        .unwrap_or(0);

    DayLengthStats {
        count: records.len(),
        mean_minutes: mean.round() as i64,
        max_minutes: whole_minutes(max_seconds),
        min_minutes: whole_minutes(min_seconds),
    }
}

/// Average day length per distinct location string.
///
/// Grouping is by exact label (no fuzzy matching) and preserves
/// first-encountered order.
pub(crate) fn compute_location_stats(records: &[AstronomicalRecord]) -> Vec<LocationStat> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();

    for record in records {
        let entry = sums.entry(record.location.as_str()).or_insert_with(|| {
            order.push(record.location.as_str());
            (0.0, 0)
        });
        entry.0 += record.day_length_minutes();
        entry.1 += 1;
    }

    order
        .into_iter()
        .map(|location| {
            let (sum, count) = sums[location];
            LocationStat {
                location: location.to_string(),
                avg_day_length_minutes: sum / count as f64,
            }
        })
        .collect()
}

/// Pearson correlation coefficient between two variables.
pub(crate) fn compute_pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;

    for i in 0..x.len() {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        (numerator / denominator).clamp(-1.0, 1.0)
    }
}

fn correlation_label(coefficient: f64) -> CorrelationLabel {
    if coefficient > 0.7 {
        CorrelationLabel::StrongPositive
    } else if coefficient > 0.3 {
        CorrelationLabel::ModeratePositive
    } else if coefficient > -0.3 {
        CorrelationLabel::None
    } else if coefficient > -0.7 {
        CorrelationLabel::ModerateNegative
    } else {
        CorrelationLabel::StrongNegative
    }
}

/// Correlation between latitude and day length (minutes) across all records.
///
/// Reports a zero coefficient when fewer than 3 records exist or either
/// variable has no variance; never NaN, never an error.
pub(crate) fn compute_latitude_correlation(
    records: &[AstronomicalRecord],
) -> LatitudeCorrelation {
    if records.len() < 3 {
        return LatitudeCorrelation {
            coefficient: 0.0,
            label: CorrelationLabel::None,
        };
    }

    let latitudes: Vec<f64> = records.iter().map(|r| r.latitude).collect();
    let minutes: Vec<f64> = records.iter().map(|r| r.day_length_minutes()).collect();

    let coefficient = compute_pearson_correlation(&latitudes, &minutes);
    LatitudeCorrelation {
        coefficient,
        label: correlation_label(coefficient),
    }
}

/// Compute every derived statistic from a record slice.
///
/// The slice is expected to be pre-filtered; every statistic sees the same
/// subset.
pub fn compute_statistics(records: &[AstronomicalRecord]) -> Statistics {
    Statistics {
        total_records: records.len(),
        day_length: compute_day_length_stats(records),
        locations: compute_location_stats(records),
        sources: distributions::compute_source_distribution(records),
        latitude_correlation: compute_latitude_correlation(records),
        trends: trends::compute_location_trends(records),
        seasonal_patterns: seasonal::compute_seasonal_patterns(records),
    }
}

/// Fetch records matching the filter and compute statistics over them.
pub async fn get_statistics(
    repo: &dyn ObservationRepository,
    filter: &RecordFilter,
) -> RepositoryResult<Statistics> {
    let records = repo.fetch_records(filter).await?;
    Ok(compute_statistics(&records))
}

#[cfg(test)]
#[path = "statistics_tests.rs"]
mod statistics_tests;
