//! This module contains all functions for interacting with the `users` table.
//! It is the single source of truth for creating, retrieving, and updating
//! the credential record linking a Telegram user to a game account.

use super::DbPool;

/// Generation marker for the stored cookie set. Only the 4-token v2 set is
/// written; the marker lets a future token generation migrate explicitly.
pub const COOKIE_GEN_V2: i64 = 2;

/// The full HoYoLAB v2 cookie set. All four tokens travel together; a row
/// with any of them missing reads back as "no session".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFields {
    pub ltuid_v2: String,
    pub ltoken_v2: String,
    pub ltmid_v2: String,
    pub cookie_token_v2: String,
}

impl SessionFields {
    pub const FIELD_COUNT: usize = 4;

    /// Parses one comma-delimited line in the order
    /// `ltuid_v2, ltoken_v2, ltmid_v2, cookie_token_v2`.
    /// Anything other than exactly four non-empty fields is rejected.
    pub fn parse_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() != Self::FIELD_COUNT || parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(Self {
            ltuid_v2: parts[0].to_owned(),
            ltoken_v2: parts[1].to_owned(),
            ltmid_v2: parts[2].to_owned(),
            cookie_token_v2: parts[3].to_owned(),
        })
    }

    /// `Cookie` header value expected by the remote service.
    pub fn cookie_header(&self) -> String {
        format!(
            "ltuid_v2={}; ltoken_v2={}; ltmid_v2={}; cookie_token_v2={}",
            self.ltuid_v2, self.ltoken_v2, self.ltmid_v2, self.cookie_token_v2
        )
    }
}

/// One credential record per Telegram user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub tg_id: u64,
    pub uid: Option<i64>,
    pub session: Option<SessionFields>,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    tg_id: i64,
    uid: Option<i64>,
    ltuid_v2: Option<String>,
    ltoken_v2: Option<String>,
    ltmid_v2: Option<String>,
    cookie_token_v2: Option<String>,
}

impl From<CredentialRow> for UserCredential {
    fn from(row: CredentialRow) -> Self {
        let session = match (row.ltuid_v2, row.ltoken_v2, row.ltmid_v2, row.cookie_token_v2) {
            (Some(ltuid_v2), Some(ltoken_v2), Some(ltmid_v2), Some(cookie_token_v2))
                if !ltuid_v2.is_empty()
                    && !ltoken_v2.is_empty()
                    && !ltmid_v2.is_empty()
                    && !cookie_token_v2.is_empty() =>
            {
                Some(SessionFields {
                    ltuid_v2,
                    ltoken_v2,
                    ltmid_v2,
                    cookie_token_v2,
                })
            }
            _ => None,
        };
        Self {
            tg_id: row.tg_id as u64,
            uid: row.uid,
            session,
        }
    }
}

pub async fn get_user(pool: &DbPool, tg_id: u64) -> Result<Option<UserCredential>, sqlx::Error> {
    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT tg_id, uid, ltuid_v2, ltoken_v2, ltmid_v2, cookie_token_v2
         FROM users WHERE tg_id = ?1",
    )
    .bind(tg_id as i64)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(UserCredential::from))
}

/// Upserts only the linked UID; stored cookies are left untouched.
pub async fn set_uid(pool: &DbPool, tg_id: u64, uid: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (tg_id, uid) VALUES (?1, ?2)
         ON CONFLICT(tg_id) DO UPDATE SET uid = excluded.uid",
    )
    .bind(tg_id as i64)
    .bind(uid)
    .execute(pool)
    .await?;
    Ok(())
}

/// Replaces the full 4-token cookie set atomically; the linked UID is left
/// untouched. Partial updates are not expressible through this call.
pub async fn set_cookies(
    pool: &DbPool,
    tg_id: u64,
    session: &SessionFields,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (tg_id, ltuid_v2, ltoken_v2, ltmid_v2, cookie_token_v2, cookie_gen)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(tg_id) DO UPDATE SET
           ltuid_v2 = excluded.ltuid_v2,
           ltoken_v2 = excluded.ltoken_v2,
           ltmid_v2 = excluded.ltmid_v2,
           cookie_token_v2 = excluded.cookie_token_v2,
           cookie_gen = excluded.cookie_gen",
    )
    .bind(tg_id as i64)
    .bind(session.ltuid_v2.as_str())
    .bind(session.ltoken_v2.as_str())
    .bind(session.ltmid_v2.as_str())
    .bind(session.cookie_token_v2.as_str())
    .bind(COOKIE_GEN_V2)
    .execute(pool)
    .await?;
    Ok(())
}

/// Registration write: UID and the full cookie set land together.
pub async fn set_registration(
    pool: &DbPool,
    tg_id: u64,
    uid: i64,
    session: &SessionFields,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (tg_id, uid, ltuid_v2, ltoken_v2, ltmid_v2, cookie_token_v2, cookie_gen)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(tg_id) DO UPDATE SET
           uid = excluded.uid,
           ltuid_v2 = excluded.ltuid_v2,
           ltoken_v2 = excluded.ltoken_v2,
           ltmid_v2 = excluded.ltmid_v2,
           cookie_token_v2 = excluded.cookie_token_v2,
           cookie_gen = excluded.cookie_gen",
    )
    .bind(tg_id as i64)
    .bind(uid)
    .bind(session.ltuid_v2.as_str())
    .bind(session.ltoken_v2.as_str())
    .bind(session.ltmid_v2.as_str())
    .bind(session.cookie_token_v2.as_str())
    .bind(COOKIE_GEN_V2)
    .execute(pool)
    .await?;
    Ok(())
}
