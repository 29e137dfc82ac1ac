//! Tests for db::factory - repository selection from env and config files.

mod support;

use std::io::Write;
use std::str::FromStr;

use sensor_stats::db::factory::{RepositoryFactory, RepositoryType};
use sensor_stats::db::RepositoryConfig;

#[test]
fn test_repository_type_from_str() {
    assert_eq!(RepositoryType::from_str("POSTGRES").unwrap(), RepositoryType::Postgres);
    assert_eq!(RepositoryType::from_str("pg").unwrap(), RepositoryType::Postgres);
    assert_eq!(RepositoryType::from_str("LOCAL").unwrap(), RepositoryType::Local);

    let result = RepositoryType::from_str("invalid");
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_from_env_with_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/sensors")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres),
    );
}

#[test]
fn test_unknown_repository_type_falls_back_to_local() {
    support::with_scoped_env(&[("REPOSITORY_TYPE", Some("cassandra"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local)
    });
}

#[test]
fn test_factory_from_env_builds_local_store() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let repo = rt.block_on(RepositoryFactory::from_env()).unwrap();
            assert!(rt.block_on(repo.health_check()).unwrap());
            assert_eq!(rt.block_on(repo.count()).unwrap(), 0);
        },
    );
}

#[tokio::test]
async fn test_factory_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = RepositoryFactory::from_config_file(file.path()).await.unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[tokio::test]
async fn test_factory_rejects_unknown_type_in_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"sqlite\"").unwrap();

    let result = RepositoryFactory::from_config_file(file.path()).await;
    assert!(result.is_err());
}

#[test]
fn test_config_load_applies_env_overrides() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/sensors")),
        ],
        || {
            let mut config = RepositoryConfig::default();
            config.apply_env_overrides();
            assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
            assert_eq!(config.postgres.database_url, "postgres://localhost/sensors");
        },
    );
}
