//! The remote data gateway: one typed query per command, issued against the
//! game-data service on behalf of a stored credential. Command code talks to
//! the [`DataGateway`] trait only; the HoYoLAB client lives in
//! [`hoyolab`] and test doubles implement the trait directly.

use async_trait::async_trait;

use crate::database::users::{SessionFields, UserCredential};

pub mod hoyolab;

/// Ledger resource selectable from the diary menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiaryResource {
    Primogems,
    Mora,
}

impl DiaryResource {
    pub fn key(self) -> &'static str {
        match self {
            Self::Primogems => "primogems",
            Self::Mora => "mora",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Primogems => "Primogems",
            Self::Mora => "Mora",
        }
    }
}

/// History window, forwarded opaquely to the remote ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiaryPeriod {
    Week,
    Month,
    ThreeMonths,
}

impl DiaryPeriod {
    pub fn key(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::ThreeMonths => "3months",
        }
    }
}

/// The closed set of remote queries a command can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Notes,
    Characters,
    Abyss { previous: bool },
    DiarySummary,
    DiaryHistory {
        resource: DiaryResource,
        period: DiaryPeriod,
    },
    RewardStatus,
    RewardClaim,
    RewardHistory,
    Profile,
    /// Public loadout read via the showcase API; the only kind that works
    /// without stored session tokens.
    Showcase,
}

impl QueryKind {
    pub fn needs_session(self) -> bool {
        !matches!(self, Self::Showcase)
    }

    pub fn needs_uid(self) -> bool {
        !matches!(self, Self::RewardStatus | Self::RewardClaim | Self::RewardHistory)
    }
}

/// Ephemeral request: kind plus whatever the resolved credential carried.
/// Built per command invocation and discarded with it.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub kind: QueryKind,
    pub game_uid: Option<i64>,
    pub session: Option<SessionFields>,
}

impl QueryRequest {
    pub fn from_credential(kind: QueryKind, credential: &UserCredential) -> Self {
        Self {
            kind,
            game_uid: credential.uid,
            session: credential.session.clone(),
        }
    }

    fn session(&self) -> Result<&SessionFields, GatewayError> {
        self.session.as_ref().ok_or(GatewayError::MissingCredential)
    }

    fn uid(&self) -> Result<i64, GatewayError> {
        self.game_uid.ok_or(GatewayError::MissingCredential)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNotes {
    pub resin: i64,
    pub max_resin: i64,
    pub resin_recovery_secs: i64,
    pub completed_commissions: i64,
    pub total_commissions: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSummary {
    pub name: String,
    pub level: i64,
    pub constellation: i64,
    pub rarity: i64,
    pub weapon: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorSummary {
    pub index: i64,
    pub stars: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbyssSummary {
    pub previous: bool,
    pub total_stars: i64,
    pub max_floor: String,
    pub total_battles: i64,
    pub floors: Vec<FloorSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiarySnapshot {
    pub primogems: i64,
    pub mora: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryCategory {
    pub name: String,
    pub amount: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryLogEntry {
    pub action: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiaryBreakdown {
    Primogems {
        period: DiaryPeriod,
        total: i64,
        categories: Vec<DiaryCategory>,
    },
    Mora {
        period: DiaryPeriod,
        entries: Vec<DiaryLogEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardStatus {
    pub signed_in: bool,
    pub claimed_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReward {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimHistoryEntry {
    pub name: String,
    pub amount: i64,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub nickname: String,
    pub adventure_rank: i64,
    pub character_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseProfile {
    pub uid: i64,
    pub nickname: String,
    pub level: i64,
    pub world_level: i64,
    pub signature: String,
    pub showcased: usize,
}

/// Tagged union over the query kinds, carrying only what the formatter
/// renders. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Notes(DailyNotes),
    Characters(Vec<CharacterSummary>),
    Abyss(AbyssSummary),
    DiarySummary(DiarySnapshot),
    DiaryHistory(DiaryBreakdown),
    RewardStatus(RewardStatus),
    RewardClaimed(DailyReward),
    RewardHistory(Vec<ClaimHistoryEntry>),
    Profile(AccountProfile),
    Showcase(ShowcaseProfile),
}

/// Credentials submitted by a completed registration conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Cookies(SessionFields),
    Login { email: String, password: String },
}

/// Outcome of a successful [`DataGateway::authenticate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedAccount {
    pub uid: i64,
    pub session: SessionFields,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Required session fields absent. Callers check the store first; the
    /// gateway re-validates defensively.
    #[error("required credential fields are missing")]
    MissingCredential,
    /// The remote service rejected the session tokens. Not retried; only
    /// the user can refresh the session.
    #[error("the remote service rejected the session tokens")]
    InvalidSession,
    /// Expected business outcome of a claim attempt, not a system error.
    #[error("the daily reward was already claimed today")]
    AlreadyClaimed,
    /// Remote service answered with a non-success code.
    #[error("remote service rejected the request (retcode {retcode}): {message}")]
    Rejected { retcode: i32, message: String },
    /// Transport/HTTP failure. Single attempt per command, no backoff.
    #[error("remote service unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),
}

#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResult, GatewayError>;
    async fn authenticate(&self, auth: &AuthRequest) -> Result<LinkedAccount, GatewayError>;
}
