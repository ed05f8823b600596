//! Dispatcher behavior against double gateways: credential gating, failure
//! taxonomy, and the one-reply-per-invocation contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use genshin_bot::commands::{data, register};
use genshin_bot::database::users::{self, SessionFields};
use genshin_bot::database::{self, logs};
use genshin_bot::gateway::{
    AbyssSummary, AuthRequest, DailyNotes, DataGateway, GatewayError, LinkedAccount, QueryKind,
    QueryRequest, QueryResult, RewardStatus,
};
use genshin_bot::ui::card::FallbackRenderer;
use genshin_bot::ui::text;
use genshin_bot::AppState;

fn session() -> SessionFields {
    SessionFields::parse_line("u1,t2,m3,c4").expect("valid line")
}

async fn fresh_state(gateway: Arc<dyn DataGateway>) -> AppState {
    let db = database::init::connect("sqlite::memory:")
        .await
        .expect("in-memory store");
    AppState::new(db, gateway, Arc::new(FallbackRenderer))
}

async fn register_user(state: &AppState, user_id: u64) {
    users::set_registration(&state.db, user_id, 800_000_001, &session())
        .await
        .expect("seed credential");
}

/// Counts calls and answers something harmless.
#[derive(Default)]
struct CountingGateway {
    calls: AtomicUsize,
}

#[async_trait]
impl DataGateway for CountingGateway {
    async fn query(&self, _request: &QueryRequest) -> Result<QueryResult, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(QueryResult::RewardStatus(RewardStatus {
            signed_in: false,
            claimed_count: 0,
        }))
    }

    async fn authenticate(&self, _auth: &AuthRequest) -> Result<LinkedAccount, GatewayError> {
        Err(GatewayError::MissingCredential)
    }
}

/// Answers every query with one fixed error (builder-provided).
struct FailingGateway<F: Fn() -> GatewayError + Send + Sync>(F);

#[async_trait]
impl<F: Fn() -> GatewayError + Send + Sync> DataGateway for FailingGateway<F> {
    async fn query(&self, _request: &QueryRequest) -> Result<QueryResult, GatewayError> {
        Err((self.0)())
    }

    async fn authenticate(&self, _auth: &AuthRequest) -> Result<LinkedAccount, GatewayError> {
        Err((self.0)())
    }
}

/// Echoes the abyss schedule it was asked for.
struct AbyssGateway;

#[async_trait]
impl DataGateway for AbyssGateway {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResult, GatewayError> {
        let QueryKind::Abyss { previous } = request.kind else {
            return Err(GatewayError::MissingCredential);
        };
        Ok(QueryResult::Abyss(AbyssSummary {
            previous,
            total_stars: if previous { 30 } else { 33 },
            max_floor: "12-3".to_owned(),
            total_battles: 12,
            floors: vec![],
        }))
    }

    async fn authenticate(&self, _auth: &AuthRequest) -> Result<LinkedAccount, GatewayError> {
        Err(GatewayError::MissingCredential)
    }
}

struct NotesGateway;

#[async_trait]
impl DataGateway for NotesGateway {
    async fn query(&self, _request: &QueryRequest) -> Result<QueryResult, GatewayError> {
        Ok(QueryResult::Notes(DailyNotes {
            resin: 40,
            max_resin: 160,
            resin_recovery_secs: 4 * 3600,
            completed_commissions: 2,
            total_commissions: 4,
        }))
    }

    async fn authenticate(&self, _auth: &AuthRequest) -> Result<LinkedAccount, GatewayError> {
        Err(GatewayError::MissingCredential)
    }
}

struct AcceptingAuthGateway;

#[async_trait]
impl DataGateway for AcceptingAuthGateway {
    async fn query(&self, _request: &QueryRequest) -> Result<QueryResult, GatewayError> {
        Err(GatewayError::MissingCredential)
    }

    async fn authenticate(&self, auth: &AuthRequest) -> Result<LinkedAccount, GatewayError> {
        let AuthRequest::Cookies(fields) = auth else {
            return Err(GatewayError::InvalidSession);
        };
        Ok(LinkedAccount {
            uid: 800_000_001,
            session: fields.clone(),
        })
    }
}

#[tokio::test]
async fn unregistered_user_gets_fixed_reply_and_zero_gateway_calls() {
    let gateway = Arc::new(CountingGateway::default());
    let state = fresh_state(Arc::clone(&gateway) as Arc<dyn DataGateway>).await;

    for kind in [
        QueryKind::Notes,
        QueryKind::Characters,
        QueryKind::DiarySummary,
        QueryKind::RewardStatus,
        QueryKind::Profile,
    ] {
        let reply = data::run(&state, 42, kind, "/test").await;
        assert_eq!(reply.text, text::NOT_REGISTERED);
        assert!(reply.keyboard.is_none());
    }
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn record_without_session_fields_counts_as_unregistered() {
    let gateway = Arc::new(CountingGateway::default());
    let state = fresh_state(Arc::clone(&gateway) as Arc<dyn DataGateway>).await;
    users::set_uid(&state.db, 42, 800_000_001)
        .await
        .expect("seed uid only");

    let reply = data::run(&state, 42, QueryKind::Notes, "/daily").await;
    assert_eq!(reply.text, text::NOT_REGISTERED);
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn abyss_schedules_render_distinguishable_captions() {
    let state = fresh_state(Arc::new(AbyssGateway)).await;
    register_user(&state, 7).await;

    let previous = data::run(&state, 7, QueryKind::Abyss { previous: true }, "/abyss").await;
    let current = data::run(&state, 7, QueryKind::Abyss { previous: false }, "/abyss").await;
    assert_ne!(previous.text, current.text);
    assert!(previous.text.contains("السابق"));
    assert!(current.text.contains("الحالي"));
    // Both carry the schedule toggle keyboard.
    assert!(previous.keyboard.is_some());
    assert!(current.keyboard.is_some());
}

#[tokio::test]
async fn notes_reply_contains_the_resin_pair() {
    let state = fresh_state(Arc::new(NotesGateway)).await;
    register_user(&state, 9).await;

    let reply = data::run(&state, 9, QueryKind::Notes, "/daily").await;
    assert!(reply.text.contains("40/160"), "got: {}", reply.text);
    assert!(reply.markdown);
}

#[tokio::test]
async fn already_claimed_is_informational_and_never_logged() {
    let state = fresh_state(Arc::new(FailingGateway(|| GatewayError::AlreadyClaimed))).await;
    register_user(&state, 11).await;

    let reply = data::run(&state, 11, QueryKind::RewardClaim, "claim_daily").await;
    assert_eq!(reply.text, text::ALREADY_CLAIMED);
    assert!(!reply.markdown);
    assert_eq!(logs::error_count(&state.db).await.expect("count"), 0);
}

#[tokio::test]
async fn other_claim_failures_are_logged() {
    let state = fresh_state(Arc::new(FailingGateway(|| GatewayError::Rejected {
        retcode: -1,
        message: "boom".to_owned(),
    })))
    .await;
    register_user(&state, 11).await;

    let reply = data::run(&state, 11, QueryKind::RewardClaim, "claim_daily").await;
    assert_eq!(reply.text, text::REMOTE_FAILURE);
    assert_eq!(logs::error_count(&state.db).await.expect("count"), 1);
}

#[tokio::test]
async fn invalid_session_gets_its_own_reply_and_is_logged() {
    let state = fresh_state(Arc::new(FailingGateway(|| GatewayError::InvalidSession))).await;
    register_user(&state, 13).await;

    let reply = data::run(&state, 13, QueryKind::Notes, "/daily").await;
    assert_eq!(reply.text, text::SESSION_EXPIRED);
    assert_ne!(reply.text, text::REMOTE_FAILURE);
    assert_eq!(logs::error_count(&state.db).await.expect("count"), 1);
}

#[tokio::test]
async fn successful_registration_round_trips_through_the_store() {
    let state = fresh_state(Arc::new(AcceptingAuthGateway)).await;
    let user_id = 21;

    let reply = register::start(&state, user_id).await;
    assert_eq!(reply.text, text::REGISTER_PROMPT);

    let reply = register::handle_input(&state, user_id, "cookies")
        .await
        .expect("conversation in flight");
    assert_eq!(reply.text, text::REGISTER_COOKIES_PROMPT);

    let reply = register::handle_input(&state, user_id, "u1,t2,m3,c4")
        .await
        .expect("conversation in flight");
    assert!(reply.text.contains("800000001"), "got: {}", reply.text);

    let stored = users::get_user(&state.db, user_id)
        .await
        .expect("lookup")
        .expect("registered");
    assert_eq!(stored.uid, Some(800_000_001));
    assert_eq!(stored.session, Some(session()));

    // The conversation is finished: further text is ignored.
    assert!(register::handle_input(&state, user_id, "anything")
        .await
        .is_none());
}

#[tokio::test]
async fn failed_authentication_terminates_without_persisting() {
    let state = fresh_state(Arc::new(FailingGateway(|| GatewayError::InvalidSession))).await;
    let user_id = 23;

    register::start(&state, user_id).await;
    register::handle_input(&state, user_id, "cookies").await;
    let reply = register::handle_input(&state, user_id, "u1,t2,m3,c4")
        .await
        .expect("conversation in flight");
    assert!(reply.text.starts_with("❌"), "got: {}", reply.text);

    assert!(users::get_user(&state.db, user_id)
        .await
        .expect("lookup")
        .is_none());
    // Terminated: the next message no longer belongs to a conversation.
    assert!(register::handle_input(&state, user_id, "cookies")
        .await
        .is_none());
}

#[tokio::test]
async fn messages_without_a_conversation_are_ignored() {
    let state = fresh_state(Arc::new(CountingGateway::default())).await;
    assert!(register::handle_input(&state, 99, "hello").await.is_none());
}
