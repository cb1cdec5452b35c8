//! Shared data models re-exported for database layer consumers.

pub use crate::api::{RecordFilter, RecordId};
pub use crate::models::AstronomicalRecord;
