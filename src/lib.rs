//! # Suntrack
//!
//! Multi-source sunrise/sunset acquisition and day-length analytics engine.
//!
//! This crate collects astronomical observations (sunrise, sunset, solar noon,
//! day length) for a location and date from multiple independent third-party
//! providers, reconciles their incompatible time encodings into normalized
//! records, persists them through an append-only repository, and derives
//! comparative statistics across locations, dates, and latitudes.
//!
//! ## Features
//!
//! - **Source Adapters**: One adapter per provider, each translating a bespoke
//!   response shape (ISO timestamps vs. 12-hour wall-clock strings with UTC
//!   offsets) into a common normalized observation
//! - **Acquisition**: Concurrent all-settle fan-out with partial-failure
//!   containment and sequential per-date range processing
//! - **Analytics**: Aggregate day-length statistics, per-location averages,
//!   per-source distribution, latitude correlation, trend detection, and
//!   seasonal bucketing
//! - **Persistence**: Repository pattern over an append-only record store
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for derived statistics and filters
//! - [`models`]: Domain records and calendar types
//! - [`sources`]: Provider adapters behind the [`sources::SourceAdapter`] capability
//! - [`geocode`]: Place-name resolution with a static fallback table
//! - [`services`]: Acquisition coordination and the analytics engine
//! - [`db`]: Repository trait, error types, and the in-memory backend
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod config;
pub mod db;
pub mod geocode;
pub mod models;

pub mod services;

pub mod sources;
