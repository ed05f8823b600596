//! Persisted operator error log, one row per surfaced remote failure.
//! Expected outcomes (not registered, reward already claimed) are never
//! written here.

use chrono::Utc;

use super::DbPool;

pub async fn record_error(
    pool: &DbPool,
    tg_id: u64,
    context: &str,
    error: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO error_logs (tg_id, context, error, at) VALUES (?1, ?2, ?3, ?4)")
        .bind(tg_id as i64)
        .bind(context)
        .bind(error)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
    Ok(())
}

/// Number of logged failures, used by operators and tests.
pub async fn error_count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM error_logs")
        .fetch_one(pool)
        .await
}
