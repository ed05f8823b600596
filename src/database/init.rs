//! Connection pool creation and schema bootstrap.

use std::str::FromStr as _;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

/// A type alias for the database connection pool (`Pool<Sqlite>`).
/// This is used throughout the application to provide a consistent, clear
/// name for the shared database connection state.
pub type DbPool = Pool<Sqlite>;

const CREATE_USERS: &str = "
CREATE TABLE IF NOT EXISTS users (
  tg_id INTEGER PRIMARY KEY,
  uid INTEGER,
  ltuid_v2 TEXT,
  ltoken_v2 TEXT,
  ltmid_v2 TEXT,
  cookie_token_v2 TEXT,
  cookie_gen INTEGER NOT NULL DEFAULT 2
)";

const CREATE_ERROR_LOGS: &str = "
CREATE TABLE IF NOT EXISTS error_logs (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  tg_id INTEGER NOT NULL,
  context TEXT NOT NULL,
  error TEXT NOT NULL,
  at TEXT NOT NULL
)";

/// Opens the pool and creates missing tables.
/// A single connection is enough here; SQLite serializes writes anyway and
/// it keeps `sqlite::memory:` usable for tests.
pub async fn connect(url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    sqlx::query(CREATE_USERS).execute(&pool).await?;
    sqlx::query(CREATE_ERROR_LOGS).execute(&pool).await?;
    Ok(pool)
}
