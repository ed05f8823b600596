//! Implements the `/register` conversation: collect a method choice, then
//! the credentials, authenticate once, and persist on success. A failed
//! authentication ends the conversation without persisting; the user starts
//! over with `/register`.

pub mod state;

use crate::database;
use crate::gateway::AuthRequest;
use crate::model::AppState;
use crate::ui::format::Reply;
use crate::ui::style::{code, escape};

use self::state::{Advance, PendingRegistration};

/// `/register` entry: (re)starts the conversation for this user.
pub async fn start(app: &AppState, user_id: u64) -> Reply {
    let (pending, prompt) = PendingRegistration::start();
    app.registrations.lock().await.insert(user_id, pending);
    Reply::plain(prompt)
}

/// Feeds a non-command message into the user's pending conversation.
/// Returns `None` when no conversation is in flight (message is ignored).
pub async fn handle_input(app: &AppState, user_id: u64, input: &str) -> Option<Reply> {
    let auth = {
        let mut registrations = app.registrations.lock().await;
        let pending = registrations.get_mut(&user_id)?;
        match pending.advance(input) {
            Advance::Prompt(prompt) => return Some(Reply::plain(prompt)),
            Advance::Submit(auth) => {
                registrations.remove(&user_id);
                auth
            }
        }
    };
    Some(finish(app, user_id, auth).await)
}

/// One authentication attempt, then the upsert. Exactly one reply either way.
async fn finish(app: &AppState, user_id: u64, auth: AuthRequest) -> Reply {
    let account = match app.gateway.authenticate(&auth).await {
        Ok(account) => account,
        Err(err) => {
            tracing::error!(user = user_id, error = %err, "registration failed");
            if let Err(db_err) =
                database::logs::record_error(&app.db, user_id, "/register", &err.to_string()).await
            {
                tracing::warn!(error = %db_err, "could not persist error log entry");
            }
            return Reply::plain(format!("❌ حدث خطأ أثناء التسجيل: {err}"));
        }
    };
    match database::users::set_registration(&app.db, user_id, account.uid, &account.session).await
    {
        Ok(()) => Reply::styled(format!(
            "{}{}",
            escape("✅ تم التسجيل بنجاح! UID: "),
            code(account.uid),
        )),
        Err(err) => {
            tracing::error!(user = user_id, error = %err, "registration upsert failed");
            Reply::plain(format!("❌ حدث خطأ أثناء التسجيل: {err}"))
        }
    }
}
