//! Implements `/setcookies`: replaces the stored 4-token cookie set in one
//! write. Accepts the tokens comma-delimited or as four arguments.

use crate::database::{self, users::SessionFields};
use crate::model::AppState;
use crate::ui::format::Reply;
use crate::ui::text;

pub async fn run(app: &AppState, user_id: u64, args: &[&str]) -> Reply {
    let joined = args.join(" ");
    let session = SessionFields::parse_line(&joined).or_else(|| {
        (args.len() == SessionFields::FIELD_COUNT)
            .then(|| SessionFields::parse_line(&args.join(",")))
            .flatten()
    });
    let Some(session) = session else {
        return Reply::plain(text::SETCOOKIES_USAGE);
    };
    match database::users::set_cookies(&app.db, user_id, &session).await {
        Ok(()) => Reply::plain(text::COOKIES_SAVED),
        Err(err) => {
            tracing::error!(user = user_id, error = %err, "cookie upsert failed");
            Reply::plain(text::REMOTE_FAILURE)
        }
    }
}
