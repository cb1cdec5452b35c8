use crate::api::Coordinates;
use crate::services::acquisition::{
    AcquisitionError, AcquisitionRequest, MAX_DATES_PER_ACQUISITION,
};
use chrono::NaiveDate;

fn coords() -> Coordinates {
    Coordinates::new(59.9139, 10.7522).unwrap()
}

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

#[test]
fn test_single_date_expands_to_one() {
    let request = AcquisitionRequest::single_date("Oslo", coords(), date("2024-06-01"));
    let dates = request.dates().unwrap();

    assert_eq!(dates, vec![date("2024-06-01")]);
}

#[test]
fn test_range_is_inclusive() {
    let request =
        AcquisitionRequest::new("Oslo", coords(), date("2024-06-01"), date("2024-06-03"));
    let dates = request.dates().unwrap();

    assert_eq!(
        dates,
        vec![date("2024-06-01"), date("2024-06-02"), date("2024-06-03")]
    );
}

#[test]
fn test_inverted_range_is_rejected() {
    let request =
        AcquisitionRequest::new("Oslo", coords(), date("2024-06-03"), date("2024-06-01"));

    assert!(matches!(
        request.dates(),
        Err(AcquisitionError::InvertedDateRange { .. })
    ));
}

#[test]
fn test_range_at_cap_is_accepted() {
    let request =
        AcquisitionRequest::new("Oslo", coords(), date("2024-06-01"), date("2024-06-30"));
    let dates = request.dates().unwrap();

    assert_eq!(dates.len(), MAX_DATES_PER_ACQUISITION);
}

#[test]
fn test_range_over_cap_is_rejected() {
    let request =
        AcquisitionRequest::new("Oslo", coords(), date("2024-06-01"), date("2024-07-02"));

    match request.dates() {
        Err(AcquisitionError::DateRangeTooLarge { requested, max }) => {
            assert_eq!(requested, 32);
            assert_eq!(max, MAX_DATES_PER_ACQUISITION);
        }
        other => panic!("expected DateRangeTooLarge, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_range_crossing_month_boundary() {
    let request =
        AcquisitionRequest::new("Oslo", coords(), date("2024-02-28"), date("2024-03-01"));
    let dates = request.dates().unwrap();

    // 2024 is a leap year.
    assert_eq!(
        dates,
        vec![date("2024-02-28"), date("2024-02-29"), date("2024-03-01")]
    );
}
