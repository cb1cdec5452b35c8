//! Acquisition coordinator behavior against scripted mock adapters.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeDelta};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use suntrack::api::Coordinates;
use suntrack::config::GeocoderSettings;
use suntrack::db::repositories::LocalRepository;
use suntrack::db::repository::ObservationRepository;
use suntrack::geocode::Geocoder;
use suntrack::services::acquisition::{
    AcquisitionCoordinator, AcquisitionError, AcquisitionRequest,
};
use suntrack::services::job_tracker::JobTracker;
use suntrack::sources::{AdapterError, NormalizedObservation, SourceAdapter};

#[derive(Debug, Clone, Copy)]
enum MockBehavior {
    /// Return a consistent observation.
    Success,
    /// Fail with a provider status error.
    Failure,
    /// Return an inverted sunrise/sunset pair, as a buggy provider would.
    Inverted,
}

/// Adapter whose per-call outcomes follow a script, then a default.
struct MockAdapter {
    id: &'static str,
    script: Mutex<VecDeque<MockBehavior>>,
    default: MockBehavior,
}

impl MockAdapter {
    fn always(id: &'static str, default: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            id,
            script: Mutex::new(VecDeque::new()),
            default,
        })
    }

    fn scripted(
        id: &'static str,
        script: Vec<MockBehavior>,
        default: MockBehavior,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            script: Mutex::new(script.into()),
            default,
        })
    }
}

fn observation_for(date: NaiveDate) -> NormalizedObservation {
    let sunrise = date.and_hms_opt(4, 0, 0).unwrap().and_utc();
    NormalizedObservation {
        sunrise,
        sunset: sunrise + TimeDelta::seconds(64800),
        solar_noon: sunrise + TimeDelta::seconds(32400),
        day_length_seconds: 64800,
    }
}

#[async_trait]
impl SourceAdapter for MockAdapter {
    fn source_id(&self) -> &str {
        self.id
    }

    async fn fetch(
        &self,
        _coords: Coordinates,
        date: NaiveDate,
    ) -> Result<NormalizedObservation, AdapterError> {
        let behavior = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default);

        match behavior {
            MockBehavior::Success => Ok(observation_for(date)),
            MockBehavior::Failure => Err(AdapterError::ProviderStatus {
                status: "ERROR".to_string(),
            }),
            MockBehavior::Inverted => {
                let good = observation_for(date);
                Ok(NormalizedObservation {
                    sunrise: good.sunset,
                    sunset: good.sunrise,
                    ..good
                })
            }
        }
    }
}

fn coords() -> Coordinates {
    Coordinates::new(59.9139, 10.7522).unwrap()
}

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

/// Geocoder whose live endpoint is unroutable, forcing the static table.
fn offline_geocoder() -> Geocoder {
    let settings = GeocoderSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_secs: 1,
    };
    Geocoder::new(&settings).unwrap()
}

#[tokio::test]
async fn test_partial_failure_still_yields_data() {
    let coordinator = AcquisitionCoordinator::new(vec![
        MockAdapter::always("provider-a", MockBehavior::Success),
        MockAdapter::always("provider-b", MockBehavior::Failure),
    ]);

    let results = coordinator.acquire(coords(), date("2024-06-01")).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, "provider-a");
}

#[tokio::test]
async fn test_all_adapters_failing_yields_empty() {
    let coordinator = AcquisitionCoordinator::new(vec![
        MockAdapter::always("provider-a", MockBehavior::Failure),
        MockAdapter::always("provider-b", MockBehavior::Failure),
    ]);

    let results = coordinator.acquire(coords(), date("2024-06-01")).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_inverted_observation_is_rejected() {
    let coordinator = AcquisitionCoordinator::new(vec![
        MockAdapter::always("provider-a", MockBehavior::Inverted),
        MockAdapter::always("provider-b", MockBehavior::Success),
    ]);

    let results = coordinator.acquire(coords(), date("2024-06-01")).await;

    // The buggy provider contributes nothing; its sibling is unaffected.
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source, "provider-b");
}

#[tokio::test]
async fn test_range_loop_continues_past_total_failures() {
    // provider-a: succeeds on days 1 and 3, fails on day 2.
    // provider-b: always fails, so day 2 is a total failure.
    let coordinator = AcquisitionCoordinator::new(vec![
        MockAdapter::scripted(
            "provider-a",
            vec![
                MockBehavior::Success,
                MockBehavior::Failure,
                MockBehavior::Success,
            ],
            MockBehavior::Success,
        ),
        MockAdapter::always("provider-b", MockBehavior::Failure),
    ]);

    let repo = LocalRepository::new();
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();
    let request =
        AcquisitionRequest::new("Oslo", coords(), date("2024-06-01"), date("2024-06-03"));

    let report = coordinator
        .acquire_range(&repo, &tracker, &job_id, &request)
        .await
        .unwrap();

    assert_eq!(report.total_dates, 3);
    assert_eq!(report.completed_dates, 3);
    assert_eq!(report.dates_with_data, 2);
    assert!(report.dates_with_data < report.total_dates);
    assert_eq!(report.records_stored, 2);
    assert_eq!(repo.stored_count(), 2);

    let job = tracker.get_job(&job_id).unwrap();
    assert_eq!(job.completed_dates, 3);
    assert_eq!(job.total_dates, 3);
}

#[tokio::test]
async fn test_both_sources_stored_as_siblings() {
    let coordinator = AcquisitionCoordinator::new(vec![
        MockAdapter::always("provider-a", MockBehavior::Success),
        MockAdapter::always("provider-b", MockBehavior::Success),
    ]);

    let repo = LocalRepository::new();
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();
    let request = AcquisitionRequest::single_date("Oslo", coords(), date("2024-06-01"));

    let report = coordinator
        .acquire_range(&repo, &tracker, &job_id, &request)
        .await
        .unwrap();

    assert_eq!(report.records_stored, 2);

    let records = repo.fetch_records(&Default::default()).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].location, "Oslo");
    assert_eq!(records[0].latitude, records[1].latitude);
    assert_ne!(records[0].source, records[1].source);
}

#[tokio::test]
async fn test_persistence_failure_does_not_abort_loop() {
    let coordinator = AcquisitionCoordinator::new(vec![MockAdapter::always(
        "provider-a",
        MockBehavior::Success,
    )]);

    let repo = LocalRepository::new();
    repo.set_healthy(false);
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();
    let request =
        AcquisitionRequest::new("Oslo", coords(), date("2024-06-01"), date("2024-06-02"));

    let report = coordinator
        .acquire_range(&repo, &tracker, &job_id, &request)
        .await
        .unwrap();

    // Every append failed, but the loop still visited every date.
    assert_eq!(report.completed_dates, 2);
    assert_eq!(report.records_stored, 0);
    assert_eq!(report.dates_with_data, 0);
}

#[tokio::test]
async fn test_oversized_range_is_rejected_before_any_request() {
    let coordinator = AcquisitionCoordinator::new(vec![MockAdapter::always(
        "provider-a",
        MockBehavior::Success,
    )]);

    let repo = LocalRepository::new();
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();
    let request =
        AcquisitionRequest::new("Oslo", coords(), date("2024-01-01"), date("2024-03-01"));

    let result = coordinator
        .acquire_range(&repo, &tracker, &job_id, &request)
        .await;

    assert!(matches!(
        result,
        Err(AcquisitionError::DateRangeTooLarge { .. })
    ));
    assert_eq!(repo.stored_count(), 0);
}

#[tokio::test]
async fn test_unresolved_place_aborts_before_adapter_calls() {
    let coordinator = AcquisitionCoordinator::new(vec![MockAdapter::always(
        "provider-a",
        MockBehavior::Success,
    )]);

    let repo = LocalRepository::new();
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();

    let result = coordinator
        .acquire_place_range(
            &offline_geocoder(),
            &repo,
            &tracker,
            &job_id,
            "Atlantis",
            date("2024-06-01"),
            date("2024-06-01"),
        )
        .await;

    assert!(matches!(result, Err(AcquisitionError::PlaceNotFound(_))));
    assert_eq!(repo.stored_count(), 0);
}

#[tokio::test]
async fn test_place_resolved_via_static_fallback() {
    let coordinator = AcquisitionCoordinator::new(vec![MockAdapter::always(
        "provider-a",
        MockBehavior::Success,
    )]);

    let repo = LocalRepository::new();
    let tracker = JobTracker::new();
    let job_id = tracker.create_job();

    let report = coordinator
        .acquire_place_range(
            &offline_geocoder(),
            &repo,
            &tracker,
            &job_id,
            "Oslo",
            date("2024-06-01"),
            date("2024-06-01"),
        )
        .await
        .unwrap();

    assert_eq!(report.records_stored, 1);

    let records = repo.fetch_records(&Default::default()).await.unwrap();
    assert_eq!(records[0].location, "Oslo");
    assert_eq!(records[0].latitude, 59.9139);
}
