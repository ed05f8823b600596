//! Credential-store semantics: keyed upserts, all-or-nothing session
//! fields, and the registration round trip.

use genshin_bot::database::{self, users};
use genshin_bot::database::users::SessionFields;

fn session(suffix: &str) -> SessionFields {
    SessionFields {
        ltuid_v2: format!("u{suffix}"),
        ltoken_v2: format!("t{suffix}"),
        ltmid_v2: format!("m{suffix}"),
        cookie_token_v2: format!("c{suffix}"),
    }
}

async fn pool() -> database::DbPool {
    database::init::connect("sqlite::memory:")
        .await
        .expect("in-memory store")
}

#[test]
fn parse_line_requires_exactly_four_fields() {
    assert!(SessionFields::parse_line("a,b,c,d").is_some());
    assert!(SessionFields::parse_line(" a , b , c , d ").is_some());
    assert!(SessionFields::parse_line("a,b,c").is_none());
    assert!(SessionFields::parse_line("a,b,c,d,e").is_none());
    assert!(SessionFields::parse_line("a,b,,d").is_none());
    assert!(SessionFields::parse_line("").is_none());
}

#[test]
fn cookie_header_carries_all_four_tokens() {
    let header = session("1").cookie_header();
    assert_eq!(
        header,
        "ltuid_v2=u1; ltoken_v2=t1; ltmid_v2=m1; cookie_token_v2=c1"
    );
}

#[tokio::test]
async fn absent_user_reads_as_none() {
    let pool = pool().await;
    assert!(users::get_user(&pool, 1).await.expect("lookup").is_none());
}

#[tokio::test]
async fn registration_write_round_trips_exactly() {
    let pool = pool().await;
    users::set_registration(&pool, 1, 800_000_001, &session("1"))
        .await
        .expect("write");
    let stored = users::get_user(&pool, 1).await.expect("lookup").expect("row");
    assert_eq!(stored.tg_id, 1);
    assert_eq!(stored.uid, Some(800_000_001));
    assert_eq!(stored.session, Some(session("1")));
}

#[tokio::test]
async fn uid_and_cookie_writes_do_not_clobber_each_other() {
    let pool = pool().await;
    users::set_uid(&pool, 2, 700_000_002).await.expect("uid");
    users::set_cookies(&pool, 2, &session("2")).await.expect("cookies");

    let stored = users::get_user(&pool, 2).await.expect("lookup").expect("row");
    assert_eq!(stored.uid, Some(700_000_002));
    assert_eq!(stored.session, Some(session("2")));

    // Re-linking the uid keeps the session; re-writing cookies replaces
    // the whole set.
    users::set_uid(&pool, 2, 700_000_003).await.expect("uid");
    users::set_cookies(&pool, 2, &session("3")).await.expect("cookies");
    let stored = users::get_user(&pool, 2).await.expect("lookup").expect("row");
    assert_eq!(stored.uid, Some(700_000_003));
    assert_eq!(stored.session, Some(session("3")));
}

#[tokio::test]
async fn partial_cookie_rows_read_as_no_session() {
    let pool = pool().await;
    // A legacy 2-token row can exist on disk; it must not count as a session.
    sqlx::query("INSERT INTO users (tg_id, uid, ltuid_v2, ltoken_v2) VALUES (?1, ?2, ?3, ?4)")
        .bind(3_i64)
        .bind(800_000_004_i64)
        .bind("u")
        .bind("t")
        .execute(&pool)
        .await
        .expect("raw insert");

    let stored = users::get_user(&pool, 3).await.expect("lookup").expect("row");
    assert_eq!(stored.uid, Some(800_000_004));
    assert_eq!(stored.session, None);
}

#[tokio::test]
async fn error_log_counts_rows() {
    let pool = pool().await;
    assert_eq!(database::logs::error_count(&pool).await.expect("count"), 0);
    database::logs::record_error(&pool, 5, "/daily", "boom")
        .await
        .expect("insert");
    assert_eq!(database::logs::error_count(&pool).await.expect("count"), 1);
}
