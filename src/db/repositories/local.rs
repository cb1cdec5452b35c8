//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository trait
//! suitable for unit testing and local development. All data is stored in
//! memory, providing fast, deterministic, and isolated execution.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};

use crate::api::{RecordFilter, RecordId};
use crate::db::repository::{
    ErrorContext, ObservationRepository, RepositoryError, RepositoryResult,
};
use crate::models::AstronomicalRecord;

/// In-memory append-only record store.
///
/// # Example
/// ```
/// use suntrack::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.stored_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    records: Vec<AstronomicalRecord>,
    next_record_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_record_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        data.records.clear();
        data.next_record_id = 1;
    }

    /// Number of records stored, without going through the async trait.
    pub fn stored_count(&self) -> usize {
        self.data.read().unwrap().records.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::connection(
                "repository is not healthy",
                ErrorContext::new(operation).retryable(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ObservationRepository for LocalRepository {
    async fn append_record(
        &self,
        mut record: AstronomicalRecord,
    ) -> RepositoryResult<AstronomicalRecord> {
        self.check_health("append_record")?;

        // A malformed record must never land in the store, even from a
        // buggy adapter.
        if record.sunrise >= record.sunset {
            return Err(RepositoryError::validation(
                "sunrise is not before sunset",
                ErrorContext::new("append_record")
                    .with_entity("record")
                    .with_details(format!(
                        "location={:?} date={} source={}",
                        record.location, record.date, record.source
                    )),
            ));
        }

        let mut data = self.data.write().unwrap();
        record.id = Some(RecordId::new(data.next_record_id));
        record.created_at = Some(Utc::now());
        data.next_record_id += 1;
        data.records.push(record.clone());

        Ok(record)
    }

    async fn fetch_records(
        &self,
        filter: &RecordFilter,
    ) -> RepositoryResult<Vec<AstronomicalRecord>> {
        self.check_health("fetch_records")?;

        let data = self.data.read().unwrap();
        let mut records: Vec<AstronomicalRecord> = data
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        // Default ordering: created_at descending, newest id first on ties.
        records.sort_by(|a, b| {
            let key_a = (a.created_at, a.id);
            let key_b = (b.created_at, b.id);
            key_b
                .partial_cmp(&key_a)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(records)
    }

    async fn record_count(&self) -> RepositoryResult<usize> {
        self.check_health("record_count")?;
        Ok(self.data.read().unwrap().records.len())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().unwrap().is_healthy)
    }
}
