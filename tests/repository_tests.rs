//! Local repository contract tests.

use chrono::{NaiveDate, TimeDelta};

use suntrack::api::RecordFilter;
use suntrack::db::repositories::LocalRepository;
use suntrack::db::repository::{ObservationRepository, RepositoryError};
use suntrack::models::AstronomicalRecord;

fn create_test_record(location: &str, date: &str, source: &str) -> AstronomicalRecord {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let sunrise = date.and_hms_opt(4, 0, 0).unwrap().and_utc();
    AstronomicalRecord {
        id: None,
        location: location.to_string(),
        latitude: 59.9139,
        longitude: 10.7522,
        date,
        sunrise,
        sunset: sunrise + TimeDelta::seconds(64800),
        solar_noon: sunrise + TimeDelta::seconds(32400),
        day_length_seconds: 64800,
        source: source.to_string(),
        created_at: None,
    }
}

#[tokio::test]
async fn test_append_assigns_id_and_timestamp() {
    let repo = LocalRepository::new();

    let stored = repo
        .append_record(create_test_record("Oslo", "2024-06-01", "a"))
        .await
        .unwrap();

    assert_eq!(stored.id.unwrap().value(), 1);
    assert!(stored.created_at.is_some());

    let second = repo
        .append_record(create_test_record("Oslo", "2024-06-01", "b"))
        .await
        .unwrap();
    assert_eq!(second.id.unwrap().value(), 2);
}

#[tokio::test]
async fn test_same_location_and_date_records_coexist() {
    // One record per responding source; no dedup, no upsert.
    let repo = LocalRepository::new();

    repo.append_record(create_test_record("Oslo", "2024-06-01", "a"))
        .await
        .unwrap();
    repo.append_record(create_test_record("Oslo", "2024-06-01", "b"))
        .await
        .unwrap();

    assert_eq!(repo.record_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_malformed_record_is_rejected() {
    let repo = LocalRepository::new();

    let mut record = create_test_record("Oslo", "2024-06-01", "a");
    std::mem::swap(&mut record.sunrise, &mut record.sunset);

    let result = repo.append_record(record).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ValidationError { .. })
    ));
    assert_eq!(repo.record_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_fetch_orders_newest_first() {
    let repo = LocalRepository::new();

    repo.append_record(create_test_record("Oslo", "2024-06-01", "a"))
        .await
        .unwrap();
    repo.append_record(create_test_record("Rome", "2024-06-02", "a"))
        .await
        .unwrap();

    let records = repo.fetch_records(&RecordFilter::default()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].location, "Rome");
    assert_eq!(records[1].location, "Oslo");
}

#[tokio::test]
async fn test_location_filter_is_substring_and_case_insensitive() {
    let repo = LocalRepository::new();

    repo.append_record(create_test_record("Oslo, Norway", "2024-06-01", "a"))
        .await
        .unwrap();
    repo.append_record(create_test_record("Rome", "2024-06-01", "a"))
        .await
        .unwrap();

    let filter = RecordFilter {
        location_contains: Some("oslo".to_string()),
        ..Default::default()
    };
    let records = repo.fetch_records(&filter).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].location, "Oslo, Norway");
}

#[tokio::test]
async fn test_date_range_filter_is_inclusive() {
    let repo = LocalRepository::new();

    for day in ["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-04"] {
        repo.append_record(create_test_record("Oslo", day, "a"))
            .await
            .unwrap();
    }

    let filter = RecordFilter {
        date_from: Some(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
        date_to: Some(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
        ..Default::default()
    };
    let records = repo.fetch_records(&filter).await.unwrap();

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_unhealthy_repository_fails_operations() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    let append = repo
        .append_record(create_test_record("Oslo", "2024-06-01", "a"))
        .await;
    assert!(matches!(
        append,
        Err(RepositoryError::ConnectionError { .. })
    ));

    let fetch = repo.fetch_records(&RecordFilter::default()).await;
    assert!(fetch.is_err());

    assert!(!repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_clear_resets_store() {
    let repo = LocalRepository::new();

    repo.append_record(create_test_record("Oslo", "2024-06-01", "a"))
        .await
        .unwrap();
    repo.clear();

    assert_eq!(repo.record_count().await.unwrap(), 0);

    // Ids restart after a clear.
    let stored = repo
        .append_record(create_test_record("Oslo", "2024-06-01", "a"))
        .await
        .unwrap();
    assert_eq!(stored.id.unwrap().value(), 1);
}
