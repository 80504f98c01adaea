//! Postgres connection helpers shared by the server and the tests.
//!
//! Wraps sqlx pool construction behind a small typed surface: DSN scheme
//! validation, pool option defaults, and the startup readiness probe.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};
use thiserror::Error;
use tracing::info;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the connection helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Pool knobs applied on connect.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool.
    pub max_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// Test connection health before acquire.
    pub test_before_acquire: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            acquire_timeout: Some(Duration::from_secs(30)),
            test_before_acquire: false,
        }
    }
}

/// Check that a DSN carries a Postgres scheme.
///
/// Note: we only check the scheme prefix and don't mutate the tail
/// (credentials etc.).
pub fn validate_dsn(dsn: &str) -> Result<()> {
    // Trim only leading spaces/newlines to be forgiving with env files.
    let s = dsn.trim_start();
    if s.starts_with("postgres://") || s.starts_with("postgresql://") {
        Ok(())
    } else {
        Err(DbError::UnknownDsn(dsn.to_string()))
    }
}

/// Connect with default pool options.
pub async fn connect(dsn: &str) -> Result<PgPool> {
    connect_with(dsn, ConnectOpts::default()).await
}

/// Connect and build the pool.
pub async fn connect_with(dsn: &str, opts: ConnectOpts) -> Result<PgPool> {
    validate_dsn(dsn)?;

    let mut o = PgPoolOptions::new();
    if let Some(n) = opts.max_conns {
        o = o.max_connections(n);
    }
    if let Some(t) = opts.acquire_timeout {
        o = o.acquire_timeout(t);
    }
    if opts.test_before_acquire {
        o = o.test_before_acquire(true);
    }
    Ok(o.connect(dsn).await?)
}

/// Block until the database answers a trivial query.
///
/// Retries forever with a fixed backoff; one successful round trip is
/// taken as ready.
pub async fn wait_ready(dsn: &str, period: Duration) -> Result<()> {
    validate_dsn(dsn)?;
    loop {
        info!("waiting for postgres");
        tokio::time::sleep(period).await;
        match probe(dsn).await {
            Ok(()) => break,
            Err(err) => info!("postgres is not ready yet: {err}"),
        }
    }
    info!("postgres is ready");
    Ok(())
}

/// One readiness round trip on a dedicated connection.
async fn probe(dsn: &str) -> std::result::Result<(), sqlx::Error> {
    let mut conn = PgConnection::connect(dsn).await?;
    sqlx::query("SELECT NOW()").execute(&mut conn).await?;
    conn.close().await
}
