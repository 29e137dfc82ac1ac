//! Postgres repository implementation using Diesel.
//!
//! Readings live in a single `readings` table indexed on `(recorded_at, reading_id)`,
//! so time-range scans come back already ordered by timestamp and insertion.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Single attempt per operation; failures surface to the caller
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    validate_readings, ErrorContext, ReadingRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Reading, SensorField, TimeRange};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Rows per INSERT statement; four bound columns each keeps us well under
/// the 65535 parameter limit.
const INSERT_CHUNK_SIZE: usize = 1000;

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

/// Parse `key` from the environment, keeping `default` when unset or invalid.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

impl PostgresConfig {
    /// Read the connection settings listed in the module docs.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
        })
    }

    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool state and query counters.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub connections_in_use: u32,
    pub idle_connections: u32,
    pub max_size: u32,
    pub total_queries: u64,
    pub failed_queries: u64,
}

#[derive(Debug, Default)]
struct QueryCounters {
    total: AtomicU64,
    failed: AtomicU64,
}

/// Diesel-backed reading store.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    counters: Arc<QueryCounters>,
}

impl PostgresRepository {
    /// Build the pool and apply pending migrations.
    ///
    /// Blocks on the first connection; call from a blocking context.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        let mut conn = pool.get()?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;
        if !applied.is_empty() {
            log::info!("Applied {} Postgres migration(s)", applied.len());
        }
        drop(conn);

        Ok(Self {
            pool,
            config,
            counters: Arc::new(QueryCounters::default()),
        })
    }

    /// Run `f` once on a pooled connection in the blocking pool.
    ///
    /// Failures are returned to the caller as they are; nothing is retried.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let counters = Arc::clone(&self.counters);

        task::spawn_blocking(move || {
            counters.total.fetch_add(1, Ordering::Relaxed);
            let result = pool
                .get()
                .map_err(|e| {
                    RepositoryError::connection_with_context(
                        e.to_string(),
                        ErrorContext::new("get_connection"),
                    )
                })
                .and_then(|mut conn| f(&mut conn));
            if result.is_err() {
                counters.failed.fetch_add(1, Ordering::Relaxed);
            }
            result
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    pub fn pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            max_size: self.config.max_pool_size,
            total_queries: self.counters.total.load(Ordering::Relaxed),
            failed_queries: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

fn filter_range<'a>(
    mut query: readings::BoxedQuery<'a, diesel::pg::Pg>,
    range: TimeRange,
) -> readings::BoxedQuery<'a, diesel::pg::Pg> {
    if let Some(from) = range.from {
        query = query.filter(readings::recorded_at.ge(from));
    }
    if let Some(to) = range.to {
        query = query.filter(readings::recorded_at.le(to));
    }
    query
}

fn filter_non_null(
    query: readings::BoxedQuery<'_, diesel::pg::Pg>,
    field: SensorField,
) -> readings::BoxedQuery<'_, diesel::pg::Pg> {
    match field {
        SensorField::Temperature => query.filter(readings::temperature.is_not_null()),
        SensorField::Humidity => query.filter(readings::humidity.is_not_null()),
        SensorField::AirQuality => query.filter(readings::air_quality.is_not_null()),
    }
}

fn load_ordered(
    conn: &mut PgConnection,
    query: readings::BoxedQuery<'_, diesel::pg::Pg>,
) -> RepositoryResult<Vec<Reading>> {
    let rows = query
        .order((readings::recorded_at.asc(), readings::reading_id.asc()))
        .load::<ReadingRow>(conn)
        .map_err(map_diesel_error)?;
    Ok(rows.into_iter().map(Reading::from).collect())
}

#[async_trait]
impl ReadingRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn insert_many(&self, batch: &[Reading]) -> RepositoryResult<usize> {
        validate_readings(batch)?;
        if batch.is_empty() {
            return Ok(0);
        }

        let rows: Vec<NewReadingRow> = batch.iter().map(NewReadingRow::from).collect();
        let inserted = self
            .with_conn(move |conn| {
                conn.transaction::<usize, diesel::result::Error, _>(|conn| {
                    let mut total = 0;
                    for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
                        total += diesel::insert_into(readings::table)
                            .values(chunk)
                            .execute(conn)?;
                    }
                    Ok(total)
                })
                .map_err(|e| RepositoryError::from(e).with_operation("insert_readings"))
            })
            .await?;

        log::debug!("Inserted {} readings into Postgres", inserted);
        Ok(inserted)
    }

    async fn query(&self, range: TimeRange) -> RepositoryResult<Vec<Reading>> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        self.with_conn(move |conn| {
            let query = filter_range(readings::table.into_boxed(), range);
            load_ordered(conn, query)
        })
        .await
    }

    async fn query_non_null(&self, field: SensorField) -> RepositoryResult<Vec<Reading>> {
        self.with_conn(move |conn| {
            let query = filter_non_null(readings::table.into_boxed(), field);
            load_ordered(conn, query)
        })
        .await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        let total: i64 = self
            .with_conn(|conn| {
                readings::table
                    .count()
                    .get_result(conn)
                    .map_err(map_diesel_error)
            })
            .await?;
        usize::try_from(total).map_err(|e| {
            RepositoryError::internal_with_context(
                e.to_string(),
                ErrorContext::new("count_readings").with_details(format!("count={}", total)),
            )
        })
    }
}
