//! Repository trait for observation-record storage.
//!
//! The persistent store is an external collaborator. This trait pins down
//! the contract the analytics core relies on: append-only writes with no
//! uniqueness constraint (sibling records for the same location and date
//! coexist), predicate-filtered reads, and no update or delete path.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::RecordFilter;
use crate::models::AstronomicalRecord;

/// Repository contract for astronomical observation records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Append one record.
    ///
    /// Assigns the record id and `created_at` timestamp and returns the
    /// stored record. Each append is independent: a failure for one
    /// source's record must not block sibling records.
    ///
    /// # Returns
    /// * `Ok(AstronomicalRecord)` - The stored record with id and timestamp
    /// * `Err(RepositoryError)` - If validation or the store operation fails
    async fn append_record(
        &self,
        record: AstronomicalRecord,
    ) -> RepositoryResult<AstronomicalRecord>;

    /// Fetch records matching the filter.
    ///
    /// Ordering is `created_at` descending when not otherwise specified.
    ///
    /// # Returns
    /// * `Ok(Vec<AstronomicalRecord>)` - Matching records
    /// * `Err(RepositoryError)` - If the operation fails
    async fn fetch_records(
        &self,
        filter: &RecordFilter,
    ) -> RepositoryResult<Vec<AstronomicalRecord>>;

    /// Total number of stored records.
    async fn record_count(&self) -> RepositoryResult<usize>;

    /// Check backend availability.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
