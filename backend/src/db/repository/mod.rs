//! Repository trait definitions for the reading store.
//!
//! - [`error`]: Error types for repository operations
//! - [`reading`]: The [`ReadingRepository`] trait and batch validation

pub mod error;
pub mod reading;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use reading::{validate_readings, ReadingRepository};
