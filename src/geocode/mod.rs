//! Place-name resolution.
//!
//! Resolution runs an ordered strategy list: a live geocoding service first,
//! then a static table of well-known cities matched by substring containment.
//! The first hit wins. Absence everywhere is a normal, reportable outcome
//! (`None`), never a silent default location.

use log::warn;
use serde::Deserialize;
use std::time::Duration;

use crate::api::Coordinates;
use crate::config::GeocoderSettings;

/// Well-known cities consulted when the live service has no answer.
const FALLBACK_CITIES: &[(&str, f64, f64)] = &[
    ("oslo", 59.9139, 10.7522),
    ("stockholm", 59.3293, 18.0686),
    ("copenhagen", 55.6761, 12.5683),
    ("reykjavik", 64.1466, -21.9426),
    ("london", 51.5074, -0.1278),
    ("paris", 48.8566, 2.3522),
    ("berlin", 52.52, 13.405),
    ("madrid", 40.4168, -3.7038),
    ("rome", 41.9028, 12.4964),
    ("new york", 40.7128, -74.006),
    ("los angeles", 34.0522, -118.2437),
    ("tokyo", 35.6762, 139.6503),
    ("singapore", 1.3521, 103.8198),
    ("sydney", -33.8688, 151.2093),
    ("cape town", -33.9249, 18.4241),
    ("buenos aires", -34.6037, -58.3816),
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    latitude: f64,
    longitude: f64,
}

/// Free-text place name to coordinates resolver.
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    /// Create a geocoder from settings.
    pub fn new(settings: &GeocoderSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a place name to coordinates.
    ///
    /// Never raises past the caller: a live-lookup failure is logged and
    /// resolution falls through to the static table.
    pub async fn geocode(&self, place: &str) -> Option<Coordinates> {
        let query = place.trim();
        if query.is_empty() {
            return None;
        }

        match self.live_lookup(query).await {
            Ok(Some(coords)) => return Some(coords),
            Ok(None) => {}
            Err(err) => {
                warn!("live geocoding failed for {:?}: {}", query, err);
            }
        }

        static_lookup(query)
    }

    async fn live_lookup(&self, query: &str) -> Result<Option<Coordinates>, reqwest::Error> {
        let url = format!("{}/v1/search", self.base_url);
        let body: SearchResponse = self
            .client
            .get(&url)
            .query(&[("name", query), ("count", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let hit = match body.results.into_iter().next() {
            Some(hit) => hit,
            None => return Ok(None),
        };

        match Coordinates::new(hit.latitude, hit.longitude) {
            Ok(coords) => Ok(Some(coords)),
            Err(reason) => {
                warn!("geocoding service returned out-of-range coordinates: {}", reason);
                Ok(None)
            }
        }
    }
}

/// Substring-containment lookup against the static city table.
fn static_lookup(query: &str) -> Option<Coordinates> {
    let needle = query.to_lowercase();
    FALLBACK_CITIES
        .iter()
        .find(|(name, _, _)| needle.contains(name) || name.contains(needle.as_str()))
        .map(|&(_, latitude, longitude)| Coordinates {
            latitude,
            longitude,
        })
}

#[cfg(test)]
mod tests {
    use super::static_lookup;

    #[test]
    fn test_static_lookup_exact() {
        let coords = static_lookup("Oslo").unwrap();
        assert_eq!(coords.latitude, 59.9139);
        assert_eq!(coords.longitude, 10.7522);
    }

    #[test]
    fn test_static_lookup_substring_containment() {
        // Query containing a table entry resolves to that entry.
        assert!(static_lookup("Oslo, Norway").is_some());
        // Partial query contained in a table entry also resolves.
        assert!(static_lookup("york").is_some());
    }

    #[test]
    fn test_static_lookup_unknown_place_is_none() {
        assert!(static_lookup("Atlantis").is_none());
    }

    #[test]
    fn test_static_lookup_case_insensitive() {
        assert!(static_lookup("LONDON").is_some());
        assert!(static_lookup("tokyo").is_some());
    }
}
