//! Public API surface for the analytics core.
//!
//! This file consolidates the DTO types produced by the analytics engine and
//! consumed by an application shell. All types derive Serialize/Deserialize
//! for JSON serialization.

pub use crate::models::AstronomicalRecord;
pub use crate::models::Season;
pub use crate::services::acquisition::AcquisitionReport;
pub use crate::services::acquisition::AcquisitionRequest;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Observation record identifier (repository-assigned).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn new(value: i64) -> Self {
        RecordId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

/// Geographic coordinates (latitude, longitude).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Optional predicates narrowing the record set before analytics.
///
/// A filter is applied once when records are fetched, so every statistic
/// sees the same subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Case-insensitive substring match on the record's location label.
    pub location_contains: Option<String>,
    /// Inclusive lower bound on the observation date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the observation date.
    pub date_to: Option<NaiveDate>,
}

impl RecordFilter {
    /// Check whether a record passes every configured predicate.
    pub fn matches(&self, record: &AstronomicalRecord) -> bool {
        if let Some(ref needle) = self.location_contains {
            if !record
                .location
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date > to {
                return false;
            }
        }
        true
    }
}

/// Aggregate day-length statistics over the full record set, in whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayLengthStats {
    pub count: usize,
    pub mean_minutes: i64,
    pub max_minutes: i64,
    pub min_minutes: i64,
}

/// Average day length for one distinct location label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationStat {
    pub location: String,
    pub avg_day_length_minutes: f64,
}

/// Record count for one distinct source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDistribution {
    pub source: String,
    pub count: usize,
}

/// Qualitative strength label for a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationLabel {
    StrongPositive,
    ModeratePositive,
    None,
    ModerateNegative,
    StrongNegative,
}

impl std::fmt::Display for CorrelationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CorrelationLabel::StrongPositive => "strong positive",
            CorrelationLabel::ModeratePositive => "moderate positive",
            CorrelationLabel::None => "none",
            CorrelationLabel::ModerateNegative => "moderate negative",
            CorrelationLabel::StrongNegative => "strong negative",
        };
        write!(f, "{}", label)
    }
}

/// Pearson correlation between latitude and day length across all records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatitudeCorrelation {
    pub coefficient: f64,
    pub label: CorrelationLabel,
}

/// Direction of a per-location day-length trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Day-length trend over time for one location with at least two records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationTrend {
    pub location: String,
    pub direction: TrendDirection,
    pub change_rate_minutes_per_day: f64,
}

/// Mean day length and leading locations for one season bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    pub season: Season,
    pub avg_day_length_minutes: f64,
    /// Up to three locations ranked by this season's average day length.
    pub top_locations: Vec<String>,
}

/// Complete derived statistics, recomputed from the record set on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_records: usize,
    pub day_length: DayLengthStats,
    pub locations: Vec<LocationStat>,
    pub sources: Vec<SourceDistribution>,
    pub latitude_correlation: LatitudeCorrelation,
    pub trends: Vec<LocationTrend>,
    pub seasonal_patterns: Vec<SeasonalPattern>,
}
