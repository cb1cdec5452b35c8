//! Database module for observation-record storage.
//!
//! This module provides abstractions for record storage via the Repository
//! pattern, allowing different storage backends to be swapped easily. The
//! store is append-only: records are never updated or deleted, and no
//! uniqueness constraint exists (one record per responding source for the
//! same location and date).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (acquisition loop, analytics)        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod factory;
pub mod models;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, ObservationRepository, RepositoryError, RepositoryResult,
};

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::AppConfig;

/// Create the repository named by the configuration.
pub fn init_repository(config: &AppConfig) -> Result<Arc<dyn ObservationRepository>> {
    RepositoryFactory::create_from_name(&config.repository.repo_type)
        .with_context(|| {
            format!(
                "failed to create repository of type {:?}",
                config.repository.repo_type
            )
        })
}
