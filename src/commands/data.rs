//! The credential-scoped data-command path shared by every stateless
//! command and button: resolve the stored credential, issue one typed
//! gateway query, format the result, and map any failure to exactly one
//! user-facing reply.

use crate::database::{self, users::UserCredential};
use crate::gateway::{GatewayError, QueryKind, QueryRequest};
use crate::model::AppState;
use crate::ui::format::{self, Reply};
use crate::ui::text;

/// Runs one data command for `user_id`. Always yields exactly one reply;
/// no failure escapes to the connector layer.
pub async fn run(state: &AppState, user_id: u64, kind: QueryKind, context: &'static str) -> Reply {
    let credential = match database::users::get_user(&state.db, user_id).await {
        Ok(credential) => credential,
        Err(err) => return store_failure(state, user_id, context, &err).await,
    };
    // Unregistered users never reach the gateway.
    let Some(credential) = credential else {
        return Reply::plain(text::NOT_REGISTERED);
    };
    query(state, user_id, &credential, kind, context).await
}

/// Gateway round-trip for an already-resolved credential.
pub async fn query(
    state: &AppState,
    user_id: u64,
    credential: &UserCredential,
    kind: QueryKind,
    context: &'static str,
) -> Reply {
    if kind.needs_session() && credential.session.is_none() {
        return Reply::plain(text::NOT_REGISTERED);
    }
    if kind.needs_uid() && credential.uid.is_none() {
        return Reply::plain(text::UID_NOT_SET);
    }
    let request = QueryRequest::from_credential(kind, credential);
    match state.gateway.query(&request).await {
        Ok(result) => format::render(&result),
        Err(err) => gateway_failure(state, user_id, context, &err).await,
    }
}

/// Maps a gateway failure onto the per-kind reply, logging only the kinds
/// that are operator-relevant.
pub async fn gateway_failure(
    state: &AppState,
    user_id: u64,
    context: &'static str,
    err: &GatewayError,
) -> Reply {
    match err {
        // Expected business outcome, informational and unlogged.
        GatewayError::AlreadyClaimed => Reply::plain(text::ALREADY_CLAIMED),
        // Expected state, same treatment as an absent record.
        GatewayError::MissingCredential => Reply::plain(text::NOT_REGISTERED),
        GatewayError::InvalidSession => {
            log_failure(state, user_id, context, &err.to_string()).await;
            Reply::plain(text::SESSION_EXPIRED)
        }
        GatewayError::Rejected { .. } | GatewayError::Unavailable(_) => {
            log_failure(state, user_id, context, &err.to_string()).await;
            Reply::plain(text::REMOTE_FAILURE)
        }
    }
}

async fn store_failure(
    state: &AppState,
    user_id: u64,
    context: &'static str,
    err: &sqlx::Error,
) -> Reply {
    log_failure(state, user_id, context, &err.to_string()).await;
    Reply::plain(text::REMOTE_FAILURE)
}

async fn log_failure(state: &AppState, user_id: u64, context: &'static str, error: &str) {
    tracing::error!(user = user_id, command = context, error, "command failed");
    if let Err(db_err) = database::logs::record_error(&state.db, user_id, context, error).await {
        tracing::warn!(error = %db_err, "could not persist error log entry");
    }
}
