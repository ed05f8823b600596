//! Implements `/setuid <uid>`: links a game UID without touching cookies.

use crate::database;
use crate::model::AppState;
use crate::ui::format::Reply;
use crate::ui::text;

pub async fn run(app: &AppState, user_id: u64, args: &[&str]) -> Reply {
    let Some(raw) = args.first() else {
        return Reply::plain(text::SETUID_USAGE);
    };
    // Local validation only; bad input never reaches the store or gateway.
    let uid = match raw.parse::<i64>() {
        Ok(uid) if uid > 0 => uid,
        _ => return Reply::plain(text::SETUID_INVALID),
    };
    match database::users::set_uid(&app.db, user_id, uid).await {
        Ok(()) => Reply::plain(format!("✅ تم ضبط UID: {uid}")),
        Err(err) => {
            tracing::error!(user = user_id, error = %err, "uid upsert failed");
            Reply::plain(text::REMOTE_FAILURE)
        }
    }
}
