//! Shared helpers for the PostgreSQL-backed integration tests.
//!
//! Each test gets its own embedded cluster and a freshly migrated database,
//! so suites can run in parallel without sharing rows.

pub mod pg_embed;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use todo_backend::outbound::persistence::run_pending_migrations_blocking;
use uuid::Uuid;

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// The `Display` impl collapses database errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Whether `SKIP_TEST_CLUSTER` is truthy ("1", "true", "yes").
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when allowed, otherwise fail loudly so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create an empty database on `cluster` and apply the embedded migrations.
///
/// Returns the connection URL of the new database.
pub fn provision_migrated_database(cluster: &TestCluster) -> Result<String, String> {
    let connection = cluster.connection();
    let name = format!("test_{}", Uuid::new_v4().simple());

    let mut admin = Client::connect(&connection.database_url("postgres"), NoTls)
        .map_err(|err| format!("connect: {}", format_postgres_error(&err)))?;
    admin
        .batch_execute(&format!(r#"CREATE DATABASE "{name}""#))
        .map_err(|err| format!("create database: {}", format_postgres_error(&err)))?;

    let url = connection.database_url(&name);
    run_pending_migrations_blocking(&url).map_err(|err| format!("migrate: {err}"))?;
    Ok(url)
}
