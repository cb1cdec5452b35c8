//! Adapter for the sunrisesunset.io style API (Provider B).
//!
//! This provider reports local wall-clock times as 12-hour `"h:mm:ss AM/PM"`
//! strings alongside a signed `utc_offset` in minutes, and encodes the day
//! length as `"HH:MM:SS"` text. The adapter combines each time with the
//! report date, shifts by the offset to obtain absolute instants, and
//! converts the day length to total seconds.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Deserialize;
use std::time::Duration;

use super::{AdapterError, NormalizedObservation, SourceAdapter};
use crate::api::Coordinates;

/// Provider identifier stored on every record from this adapter.
pub const SOURCE_ID: &str = "api.sunrisesunset.io";

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.sunrisesunset.io";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    results: Option<ApiResults>,
}

#[derive(Debug, Deserialize)]
struct ApiResults {
    date: String,
    sunrise: String,
    sunset: String,
    solar_noon: String,
    day_length: String,
    /// Signed UTC offset in minutes.
    utc_offset: i64,
}

/// Adapter for the sunrisesunset.io JSON API.
pub struct SunriseSunsetIoAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl SunriseSunsetIoAdapter {
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
impl SourceAdapter for SunriseSunsetIoAdapter {
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

    let report_date =
        NaiveDate::parse_from_str(&results.date, "%Y-%m-%d").map_err(|e| {
            AdapterError::MalformedPayload {
                field: "date",
                message: format!("{}: {:?}", e, results.date),
            }
        })?;

    let observation = NormalizedObservation {
        sunrise: to_instant("sunrise", &results.sunrise, report_date, results.utc_offset)?,
        sunset: to_instant("sunset", &results.sunset, report_date, results.utc_offset)?,
        solar_noon: to_instant(
            "solar_noon",
            &results.solar_noon,
            report_date,
            results.utc_offset,
        )?,
        day_length_seconds: parse_day_length(&results.day_length)?,
    };
    observation.validate()?;

    Ok(observation)
}

/// Combine a 12-hour local time string with the report date and shift by the
/// provider's UTC offset (minutes) to an absolute instant.
fn to_instant(
    field: &'static str,
    text: &str,
    report_date: NaiveDate,
    utc_offset_minutes: i64,
) -> Result<DateTime<Utc>, AdapterError> {
    let local_time = NaiveTime::parse_from_str(text.trim(), "%I:%M:%S %p").map_err(|e| {
        AdapterError::MalformedPayload {
            field,
            message: format!("{}: {:?}", e, text),
        }
    })?;

    let local = report_date.and_time(local_time);
    Ok((local - TimeDelta::minutes(utc_offset_minutes)).and_utc())
}

/// Convert an `"HH:MM:SS"` day-length string to total seconds.
fn parse_day_length(text: &str) -> Result<i64, AdapterError> {
    let malformed = |message: String| AdapterError::MalformedPayload {
        field: "day_length",
        message,
    };

    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() != 3 {
        return Err(malformed(format!("expected HH:MM:SS, got {:?}", text)));
    }

    let mut values = [0i64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse::<i64>()
            .map_err(|e| malformed(format!("{}: {:?}", e, text)))?;
    }

    Ok(values[0] * 3600 + values[1] * 60 + values[2])
}
