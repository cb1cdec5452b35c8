use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{Coordinates, RecordId};
use crate::models::Season;
use crate::sources::SourcedObservation;

/// One observation from one source, for one location and date.
///
/// Multiple records may exist for the same (location, date) pair, one per
/// responding source. They are siblings for comparison, never merged or
/// deduplicated. Records are immutable once appended; `id` and `created_at`
/// are assigned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstronomicalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Free-text place label. Not normalized: distinct spellings are
    /// distinct entities.
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Calendar date the observation pertains to (no time-of-day).
    pub date: NaiveDate,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
    /// Daylight duration in seconds. Invariant: equals `sunset - sunrise`
    /// within one second.
    #[serde(rename = "day_length")]
    pub day_length_seconds: i64,
    /// Identifier of the originating provider (e.g. its domain name).
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AstronomicalRecord {
    /// Build an unsaved record from a normalized source observation.
    ///
    /// Coordinates come from geocoding at acquisition time and are copied
    /// identically across all sources of that acquisition.
    pub fn from_observation(
        location: &str,
        coordinates: Coordinates,
        date: NaiveDate,
        sourced: &SourcedObservation,
    ) -> Self {
        Self {
            id: None,
            location: location.to_string(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            date,
            sunrise: sourced.observation.sunrise,
            sunset: sourced.observation.sunset,
            solar_noon: sourced.observation.solar_noon,
            day_length_seconds: sourced.observation.day_length_seconds,
            source: sourced.source.clone(),
            created_at: None,
        }
    }

    /// Day length in fractional minutes.
    pub fn day_length_minutes(&self) -> f64 {
        self.day_length_seconds as f64 / 60.0
    }

    /// Season bucket of the observation date.
    pub fn season(&self) -> Season {
        Season::from_date(self.date)
    }
}
