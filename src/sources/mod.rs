//! Source adapters for external astronomical-data providers.
//!
//! Each provider exposes its own response shape and time encoding. An adapter
//! translates one provider's payload into a [`NormalizedObservation`] behind
//! the uniform [`SourceAdapter`] capability, so the acquisition layer never
//! sees provider quirks. Any parse failure, non-success status, or network
//! error is a local failure of that adapter only.

pub mod sunrise_sunset_org;
pub mod sunrisesunset_io;

pub use sunrise_sunset_org::SunriseSunsetOrgAdapter;
pub use sunrisesunset_io::SunriseSunsetIoAdapter;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Coordinates;

/// Error raised by a single source adapter.
///
/// Adapter errors never abort sibling adapters; the acquisition coordinator
/// logs them and continues with whatever sources succeeded.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Network or HTTP-level failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status marker.
    #[error("provider returned status {status:?}")]
    ProviderStatus { status: String },

    /// A payload field could not be parsed.
    #[error("malformed payload field `{field}`: {message}")]
    MalformedPayload {
        field: &'static str,
        message: String,
    },

    /// The observation violates the record invariant after normalization.
    #[error("inconsistent observation: {message}")]
    InvalidObservation { message: String },
}

/// Provider-independent observation for one coordinate and date.
///
/// All timestamps are absolute instants regardless of the source encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedObservation {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub solar_noon: DateTime<Utc>,
    pub day_length_seconds: i64,
}

impl NormalizedObservation {
    /// Enforce the record invariant.
    ///
    /// `sunrise` must precede `sunset`, and the reported day length must
    /// match `sunset - sunrise` within one second. An inverted pair
    /// indicates the source's own parsing bug and the observation must not
    /// be persisted.
    pub fn validate(&self) -> Result<(), AdapterError> {
        if self.sunrise >= self.sunset {
            return Err(AdapterError::InvalidObservation {
                message: format!(
                    "sunrise {} is not before sunset {}",
                    self.sunrise, self.sunset
                ),
            });
        }

        let span_seconds = (self.sunset - self.sunrise).num_seconds();
        if (span_seconds - self.day_length_seconds).abs() > 1 {
            return Err(AdapterError::InvalidObservation {
                message: format!(
                    "day length {}s does not match sunset - sunrise = {}s",
                    self.day_length_seconds, span_seconds
                ),
            });
        }

        Ok(())
    }
}

/// A successful observation tagged with its originating source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedObservation {
    pub observation: NormalizedObservation,
    pub source: String,
}

/// Capability implemented by every provider adapter.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable identifier of the provider (e.g. its domain name).
    fn source_id(&self) -> &str;

    /// Fetch and normalize one observation for the given coordinates and date.
    async fn fetch(
        &self,
        coords: Coordinates,
        date: NaiveDate,
    ) -> Result<NormalizedObservation, AdapterError>;
}
