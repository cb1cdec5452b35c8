//! Adapter for the sunrise-sunset.org style API (Provider A).
//!
//! With `formatted=0` the provider returns absolute ISO-8601 timestamps and
//! a day length already in integer seconds, so normalization is a direct
//! parse with no offset arithmetic.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::time::Duration;

use super::{AdapterError, NormalizedObservation, SourceAdapter};
use crate::api::Coordinates;

/// Provider identifier stored on every record from this adapter.
pub const SOURCE_ID: &str = "api.sunrise-sunset.org";

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.sunrise-sunset.org";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    results: Option<ApiResults>,
}

#[derive(Debug, Deserialize)]
struct ApiResults {
    sunrise: String,
    sunset: String,
    solar_noon: String,
    day_length: i64,
}

/// Adapter for the sunrise-sunset.org JSON API.
pub struct SunriseSunsetOrgAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl SunriseSunsetOrgAdapter {
    /// Create an adapter against the public endpoint.
    pub fn new(timeout: Duration) -> Result<Self, AdapterError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create an adapter against a custom endpoint (tests, proxies).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SourceAdapter for SunriseSunsetOrgAdapter {
    fn source_id(&self) -> &str {
        SOURCE_ID
    }

    async fn fetch(
        &self,
        coords: Coordinates,
        date: NaiveDate,
    ) -> Result<NormalizedObservation, AdapterError> {
        let url = format!("{}/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lng", coords.longitude.to_string()),
                ("date", date.format("%Y-%m-%d").to_string()),
                ("formatted", "0".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ApiResponse = response.json().await?;
        parse_response(body)
    }
}

fn parse_response(body: ApiResponse) -> Result<NormalizedObservation, AdapterError> {
    if body.status != "OK" {
        return Err(AdapterError::ProviderStatus {
            status: body.status,
        });
    }

    let results = body.results.ok_or(AdapterError::MalformedPayload {
        field: "results",
        message: "missing results object".to_string(),
    })?;

    let observation = NormalizedObservation {
        sunrise: parse_instant("sunrise", &results.sunrise)?,
        sunset: parse_instant("sunset", &results.sunset)?,
        solar_noon: parse_instant("solar_noon", &results.solar_noon)?,
        day_length_seconds: results.day_length,
    };
    observation.validate()?;

    Ok(observation)
}

fn parse_instant(field: &'static str, text: &str) -> Result<DateTime<Utc>, AdapterError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AdapterError::MalformedPayload {
            field,
            message: format!("{}: {:?}", e, text),
        })
}
