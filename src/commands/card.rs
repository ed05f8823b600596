//! Implements `/card [uid]`: public showcase lookup plus a rendered card.
//! The rich renderer may fail (external service); the deterministic fallback
//! cannot, so this command never ends without a picture once the showcase
//! read succeeds.

use crate::commands::data;
use crate::database::{self, users::UserCredential};
use crate::gateway::{QueryKind, QueryRequest, QueryResult};
use crate::model::AppState;
use crate::ui::card;
use crate::ui::format::{self, Photo, Reply};
use crate::ui::text;

pub async fn run(app: &AppState, user_id: u64, args: &[&str]) -> Reply {
    let uid = match args.first() {
        Some(raw) => match raw.parse::<i64>() {
            Ok(uid) if uid > 0 => uid,
            _ => return Reply::plain(text::SETUID_INVALID),
        },
        None => match database::users::get_user(&app.db, user_id).await {
            Ok(Some(UserCredential { uid: Some(uid), .. })) => uid,
            Ok(_) => return Reply::plain(text::UID_NOT_SET),
            Err(err) => {
                tracing::error!(user = user_id, error = %err, "credential lookup failed");
                return Reply::plain(text::REMOTE_FAILURE);
            }
        },
    };
    let request = QueryRequest {
        kind: QueryKind::Showcase,
        game_uid: Some(uid),
        session: None,
    };
    let profile = match app.gateway.query(&request).await {
        Ok(QueryResult::Showcase(profile)) => profile,
        Ok(_) => return Reply::plain(text::REMOTE_FAILURE),
        Err(err) => return data::gateway_failure(app, user_id, "/card", &err).await,
    };
    let png = match app.renderer.render(&profile).await {
        Ok(png) if !png.is_empty() => png,
        Ok(_) => card::fallback_card(&profile),
        Err(err) => {
            tracing::warn!(user = user_id, error = %err, "card renderer failed, using fallback");
            card::fallback_card(&profile)
        }
    };
    let caption = format::render(&QueryResult::Showcase(profile));
    Reply::styled(caption.text).with_photo(Photo { png })
}
