//! Service layer for business logic and orchestration.
//!
//! This module contains the acquisition coordinator that fans requests out
//! to the source adapters, the job tracker used for progress reporting, and
//! the analytics engine: pure functions that recompute every statistic from
//! the record set on demand.

pub mod acquisition;

pub mod distributions;

pub mod job_tracker;

pub mod seasonal;

pub mod statistics;

pub mod trends;

pub use acquisition::{AcquisitionCoordinator, AcquisitionError, MAX_DATES_PER_ACQUISITION};
pub use job_tracker::{JobTracker, LogLevel};
pub use statistics::{compute_statistics, get_statistics};
