//! Acquisition coordination.
//!
//! Fans one request per configured source adapter out concurrently for a
//! given coordinate and date, waits for all of them to settle (success or
//! failure) independently, and keeps whatever succeeded. Partial failure is
//! success; only a date where every adapter failed counts as a failed unit
//! of work, and even that does not abort a multi-date loop.

use chrono::NaiveDate;
use futures::future;
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::api::Coordinates;
use crate::config::SourceSettings;
use crate::db::repository::ObservationRepository;
use crate::geocode::Geocoder;
use crate::models::AstronomicalRecord;
use crate::services::job_tracker::{JobTracker, LogLevel};
use crate::sources::{
    AdapterError, SourceAdapter, SourcedObservation, SunriseSunsetIoAdapter,
    SunriseSunsetOrgAdapter,
};

/// Upper bound on dates processed by one range acquisition, keeping the
/// total outbound request count polite toward rate-limited third parties.
pub const MAX_DATES_PER_ACQUISITION: usize = 30;

/// Error raised before any adapter request is issued.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("could not resolve place {0:?} to coordinates")]
    PlaceNotFound(String),

    #[error("end date {end} precedes start date {start}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("date range spans {requested} days, maximum is {max}")]
    DateRangeTooLarge { requested: usize, max: usize },

    #[error("failed to construct source adapter: {0}")]
    AdapterSetup(#[from] AdapterError),
}

/// One unit of range-acquisition work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionRequest {
    /// Place label stored verbatim on every resulting record.
    pub location: String,
    pub coordinates: Coordinates,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AcquisitionRequest {
    pub fn new(
        location: impl Into<String>,
        coordinates: Coordinates,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            location: location.into(),
            coordinates,
            start_date,
            end_date,
        }
    }

    pub fn single_date(
        location: impl Into<String>,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> Self {
        Self::new(location, coordinates, date, date)
    }

    /// Expand the inclusive range into individual dates, enforcing the cap.
    pub(crate) fn dates(&self) -> Result<Vec<NaiveDate>, AcquisitionError> {
        if self.end_date < self.start_date {
            return Err(AcquisitionError::InvertedDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        let span = (self.end_date - self.start_date).num_days() as usize + 1;
        if span > MAX_DATES_PER_ACQUISITION {
            return Err(AcquisitionError::DateRangeTooLarge {
                requested: span,
                max: MAX_DATES_PER_ACQUISITION,
            });
        }

        Ok(self
            .start_date
            .iter_days()
            .take(span)
            .collect())
    }
}

/// Outcome of a range acquisition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionReport {
    /// Dates requested.
    pub total_dates: usize,
    /// Dates whose fan-out has settled.
    pub completed_dates: usize,
    /// Dates that yielded at least one stored record.
    pub dates_with_data: usize,
    /// Records successfully appended to the repository.
    pub records_stored: usize,
}

/// Fans requests out to all configured source adapters.
pub struct AcquisitionCoordinator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
}

impl AcquisitionCoordinator {
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self { adapters }
    }

    /// Coordinator over both bundled providers, endpoints from settings.
    pub fn from_config(settings: &SourceSettings) -> Result<Self, AcquisitionError> {
        let timeout = Duration::from_secs(settings.request_timeout_secs);
        let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
            Arc::new(SunriseSunsetOrgAdapter::with_base_url(
                &settings.sunrise_sunset_org_url,
                timeout,
            )?),
            Arc::new(SunriseSunsetIoAdapter::with_base_url(
                &settings.sunrisesunset_io_url,
                timeout,
            )?),
        ];
        Ok(Self::new(adapters))
    }

    pub fn source_count(&self) -> usize {
        self.adapters.len()
    }

    /// Acquire observations for one coordinate and date from every adapter
    /// concurrently.
    ///
    /// All requests are issued up front and awaited until each has settled;
    /// no adapter failure cancels its siblings. Successful observations are
    /// re-validated here so a buggy adapter cannot leak a malformed
    /// observation downstream. An empty result means every adapter failed
    /// for this date.
    pub async fn acquire(&self, coords: Coordinates, date: NaiveDate) -> Vec<SourcedObservation> {
        let requests = self.adapters.iter().map(|adapter| {
            let adapter = Arc::clone(adapter);
            async move {
                let outcome = adapter.fetch(coords, date).await;
                (adapter.source_id().to_string(), outcome)
            }
        });

        let settled = future::join_all(requests).await;

        settled
            .into_iter()
            .filter_map(|(source, outcome)| match outcome {
                Ok(observation) => match observation.validate() {
                    Ok(()) => Some(SourcedObservation {
                        observation,
                        source,
                    }),
                    Err(err) => {
                        warn!("source {} returned invalid data for {}: {}", source, date, err);
                        None
                    }
                },
                Err(err) => {
                    warn!("source {} failed for {}: {}", source, date, err);
                    None
                }
            })
            .collect()
    }

    /// Acquire and persist observations for an inclusive date range.
    ///
    /// Dates are processed sequentially: one date's fan-out settles and its
    /// records are written before the next date begins, bounding in-flight
    /// requests to the adapter count. A date where every adapter failed is
    /// reported as a warning and the loop continues. Per-record append
    /// failures are logged per-source and never block sibling records.
    pub async fn acquire_range(
        &self,
        repo: &dyn ObservationRepository,
        tracker: &JobTracker,
        job_id: &str,
        request: &AcquisitionRequest,
    ) -> Result<AcquisitionReport, AcquisitionError> {
        let dates = request.dates()?;
        let total_dates = dates.len();
        tracker.set_progress(job_id, 0, total_dates);
        tracker.log(
            job_id,
            LogLevel::Info,
            format!(
                "Acquiring {} date(s) for {:?} from {} source(s)...",
                total_dates,
                request.location,
                self.adapters.len()
            ),
        );

        let mut report = AcquisitionReport {
            total_dates,
            ..Default::default()
        };

        for (index, date) in dates.into_iter().enumerate() {
            let observations = self.acquire(request.coordinates, date).await;

            if observations.is_empty() {
                warn!("no source returned data for {} on {}", request.location, date);
                tracker.log(
                    job_id,
                    LogLevel::Warning,
                    format!("No source returned data for {}", date),
                );
            } else {
                let mut stored_for_date = 0usize;
                for sourced in &observations {
                    let record = AstronomicalRecord::from_observation(
                        &request.location,
                        request.coordinates,
                        date,
                        sourced,
                    );
                    match repo.append_record(record).await {
                        Ok(_) => stored_for_date += 1,
                        Err(err) => {
                            warn!(
                                "failed to store record from {} for {}: {}",
                                sourced.source, date, err
                            );
                            tracker.log(
                                job_id,
                                LogLevel::Warning,
                                format!("Failed to store {} record for {}", sourced.source, date),
                            );
                        }
                    }
                }

                if stored_for_date > 0 {
                    report.dates_with_data += 1;
                    report.records_stored += stored_for_date;
                }
            }

            report.completed_dates = index + 1;
            tracker.set_progress(job_id, report.completed_dates, total_dates);
        }

        tracker.log(
            job_id,
            LogLevel::Success,
            format!(
                "Acquisition finished: {}/{} date(s) yielded data, {} record(s) stored",
                report.dates_with_data, report.total_dates, report.records_stored
            ),
        );

        Ok(report)
    }

    /// Resolve a place name and acquire the given date range for it.
    ///
    /// Geocoding failure aborts before any adapter call.
    pub async fn acquire_place_range(
        &self,
        geocoder: &Geocoder,
        repo: &dyn ObservationRepository,
        tracker: &JobTracker,
        job_id: &str,
        place: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<AcquisitionReport, AcquisitionError> {
        let coordinates = match geocoder.geocode(place).await {
            Some(coordinates) => coordinates,
            None => {
                let err = AcquisitionError::PlaceNotFound(place.to_string());
                tracker.fail_job(job_id, &err.to_string());
                return Err(err);
            }
        };

        tracker.log(
            job_id,
            LogLevel::Info,
            format!(
                "Resolved {:?} to ({:.4}, {:.4})",
                place, coordinates.latitude, coordinates.longitude
            ),
        );

        let request = AcquisitionRequest::new(place, coordinates, start_date, end_date);
        self.acquire_range(repo, tracker, job_id, &request).await
    }
}

#[cfg(test)]
#[path = "acquisition_tests.rs"]
mod acquisition_tests;
