//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating repository instances based on
//! runtime configuration. Only the in-memory backend ships with this crate;
//! the trait boundary is where a production store plugs in.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{ErrorContext, ObservationRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from the `REPOSITORY_TYPE` environment variable,
    /// defaulting to Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }
        Self::Local
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn ObservationRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Arc::new(LocalRepository::new())),
        }
    }

    /// Create a repository from a configuration string.
    pub fn create_from_name(name: &str) -> RepositoryResult<Arc<dyn ObservationRepository>> {
        let repo_type = name.parse::<RepositoryType>().map_err(|message| {
            RepositoryError::configuration(message, ErrorContext::new("create_repository"))
        })?;
        Self::create(repo_type)
    }

    /// Create a concrete local repository, useful in tests that need the
    /// helper methods.
    pub fn create_local() -> Arc<LocalRepository> {
        Arc::new(LocalRepository::new())
    }
}
