//! Reading storage.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / engines                                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  ReadingRepository trait (repository/)                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴───────────────┐
//!     │ LocalRepository               │ PostgresRepository
//!     │ (in-memory, B-tree indexed)   │ (Diesel, feature `postgres-repo`)
//!     └───────────────────────────────┘
//! ```
//!
//! Engines and handlers go through [`services`]; the concrete store is chosen by
//! [`RepositoryFactory`] from the environment or `repository.toml`.

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}
#[cfg(not(feature = "postgres-repo"))]
impl PostgresConfig {
    pub fn from_env() -> Result<Self, String> {
        Err("Postgres repository feature not enabled".to_string())
    }
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    validate_readings, ErrorContext, ReadingRepository, RepositoryError, RepositoryResult,
};
pub use services::{count_readings, fetch_non_null, fetch_readings, health_check, store_readings};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Process-wide repository, set once at startup.
static REPOSITORY: OnceLock<Arc<dyn ReadingRepository>> = OnceLock::new();

/// Build the configured repository and install it as the global instance.
///
/// Idempotent: later calls return the repository installed first.
pub async fn init_repository() -> Result<Arc<dyn ReadingRepository>> {
    if let Some(repo) = REPOSITORY.get() {
        return Ok(repo.clone());
    }

    let config = RepositoryConfig::load().context("Failed to load repository configuration")?;
    let repo = RepositoryFactory::from_repository_config(&config)
        .await
        .context("Failed to create repository")?;
    log::info!("Initialized {} repository", config.repository.repo_type);

    Ok(REPOSITORY.get_or_init(|| repo).clone())
}
