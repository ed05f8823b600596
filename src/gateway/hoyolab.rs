//! HoYoLAB-backed [`DataGateway`] implementation plus the public showcase
//! lookup on enka.network. Every call is a single attempt with an overall
//! request timeout; the caller decides what a failure means to the user.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike as _, Utc};
use reqwest::header;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::constants::REMOTE_TIMEOUT_SECS;
use crate::database::users::SessionFields;

use super::{
    AbyssSummary, AccountProfile, AuthRequest, CharacterSummary, ClaimHistoryEntry, DailyNotes,
    DailyReward, DataGateway, DiaryBreakdown, DiaryCategory, DiaryLogEntry, DiaryPeriod,
    DiaryResource, DiarySnapshot, FloorSummary, GatewayError, LinkedAccount, QueryKind,
    QueryRequest, QueryResult, RewardStatus, ShowcaseProfile,
};

const RECORD_API: &str = "https://bbs-api-os.hoyolab.com/game_record/genshin/api";
const LEDGER_API: &str = "https://sg-hk4e-api.hoyolab.com/event/ysledgeros";
const SOL_API: &str = "https://sg-hk4e-api.hoyolab.com/event/sol";
const ACCOUNT_API: &str = "https://api-account-os.hoyolab.com/binding/api";
const PASSPORT_API: &str = "https://sg-public-api.hoyolab.com/account/ma-passport/api";
const ENKA_API: &str = "https://enka.network/api/uid";

/// Daily check-in event for the overseas game.
const SOL_ACT_ID: &str = "e202102251931481";

/// Every authenticated endpoint answers this envelope; `data` is only
/// trustworthy when `retcode` is zero.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    retcode: i32,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T, GatewayError> {
    match envelope.retcode {
        0 => envelope.data.ok_or(GatewayError::Rejected {
            retcode: 0,
            message: "empty response payload".to_owned(),
        }),
        -100 | 10001 | 10103 => Err(GatewayError::InvalidSession),
        -5003 => Err(GatewayError::AlreadyClaimed),
        retcode => Err(GatewayError::Rejected {
            retcode,
            message: envelope.message,
        }),
    }
}

/// Overseas shard from the leading digits of the UID.
fn server_for_uid(uid: i64) -> Result<&'static str, GatewayError> {
    let digits = uid.to_string();
    if digits.starts_with("18") {
        return Ok("os_asia");
    }
    match digits.as_bytes().first() {
        Some(b'6') => Ok("os_usa"),
        Some(b'7') => Ok("os_euro"),
        Some(b'8') => Ok("os_asia"),
        Some(b'9') => Ok("os_cht"),
        _ => Err(GatewayError::Rejected {
            retcode: 0,
            message: format!("uid {uid} does not belong to a supported server"),
        }),
    }
}

/// The ledger is month-scoped upstream: week/month read the current month,
/// 3-months is forwarded as the month two back.
fn ledger_month(period: DiaryPeriod) -> Option<u32> {
    match period {
        DiaryPeriod::Week | DiaryPeriod::Month => None,
        DiaryPeriod::ThreeMonths => {
            let month = Utc::now().month();
            Some(if month > 2 { month - 2 } else { month + 10 })
        }
    }
}

pub struct HoyolabGateway {
    http: reqwest::Client,
}

impl HoyolabGateway {
    pub fn new() -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REMOTE_TIMEOUT_SECS))
            .user_agent("genshin-bot/0.1")
            .build()?;
        Ok(Self { http })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let envelope: Envelope<T> = request.send().await?.json().await?;
        unwrap_envelope(envelope)
    }

    async fn daily_notes(&self, request: &QueryRequest) -> Result<DailyNotes, GatewayError> {
        let session = request.session()?;
        let uid = request.uid()?;
        let role_id = uid.to_string();
        let data: NotesData = self
            .fetch(
                self.http
                    .get(format!("{RECORD_API}/dailyNote"))
                    .query(&[("server", server_for_uid(uid)?), ("role_id", role_id.as_str())])
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        Ok(DailyNotes {
            resin: data.current_resin,
            max_resin: data.max_resin,
            resin_recovery_secs: data.resin_recovery_time.parse().unwrap_or(0),
            completed_commissions: data.finished_task_num,
            total_commissions: data.total_task_num,
        })
    }

    async fn characters(
        &self,
        request: &QueryRequest,
    ) -> Result<Vec<CharacterSummary>, GatewayError> {
        let session = request.session()?;
        let uid = request.uid()?;
        let data: CharacterListData = self
            .fetch(
                self.http
                    .post(format!("{RECORD_API}/character"))
                    .json(&json!({ "server": server_for_uid(uid)?, "role_id": uid.to_string() }))
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        // Remote order is kept as-is; the formatter truncates for display.
        Ok(data
            .avatars
            .into_iter()
            .map(|avatar| CharacterSummary {
                name: avatar.name,
                level: avatar.level,
                constellation: avatar.actived_constellation_num,
                rarity: avatar.rarity,
                weapon: avatar.weapon.name,
            })
            .collect())
    }

    async fn abyss(
        &self,
        request: &QueryRequest,
        previous: bool,
    ) -> Result<AbyssSummary, GatewayError> {
        let session = request.session()?;
        let uid = request.uid()?;
        let schedule = if previous { "2" } else { "1" };
        let role_id = uid.to_string();
        let data: AbyssData = self
            .fetch(
                self.http
                    .get(format!("{RECORD_API}/spiralAbyss"))
                    .query(&[
                        ("server", server_for_uid(uid)?),
                        ("role_id", role_id.as_str()),
                        ("schedule_type", schedule),
                    ])
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        Ok(AbyssSummary {
            previous,
            total_stars: data.total_star,
            max_floor: data.max_floor,
            total_battles: data.total_battle_times,
            floors: data
                .floors
                .into_iter()
                .map(|floor| FloorSummary {
                    index: floor.index,
                    stars: floor.star,
                })
                .collect(),
        })
    }

    async fn month_info(
        &self,
        request: &QueryRequest,
        month: Option<u32>,
    ) -> Result<LedgerMonthData, GatewayError> {
        let session = request.session()?;
        let uid = request.uid()?;
        let mut query: Vec<(&str, String)> = vec![
            ("region", server_for_uid(uid)?.to_owned()),
            ("uid", uid.to_string()),
        ];
        if let Some(month) = month {
            query.push(("month", month.to_string()));
        }
        self.fetch(
            self.http
                .get(format!("{LEDGER_API}/month_info"))
                .query(&query)
                .header(header::COOKIE, session.cookie_header()),
        )
        .await
    }

    async fn diary_summary(&self, request: &QueryRequest) -> Result<DiarySnapshot, GatewayError> {
        let data = self.month_info(request, None).await?;
        Ok(DiarySnapshot {
            primogems: data.month_data.current_primogems,
            mora: data.month_data.current_mora,
        })
    }

    async fn diary_history(
        &self,
        request: &QueryRequest,
        resource: DiaryResource,
        period: DiaryPeriod,
    ) -> Result<DiaryBreakdown, GatewayError> {
        match resource {
            DiaryResource::Primogems => {
                let data = self.month_info(request, ledger_month(period)).await?;
                Ok(DiaryBreakdown::Primogems {
                    period,
                    total: data.month_data.current_primogems,
                    categories: data
                        .month_data
                        .group_by
                        .into_iter()
                        .map(|group| DiaryCategory {
                            name: group.action,
                            amount: group.num,
                            percentage: group.percent,
                        })
                        .collect(),
                })
            }
            DiaryResource::Mora => {
                let session = request.session()?;
                let uid = request.uid()?;
                let mut query: Vec<(&str, String)> = vec![
                    ("region", server_for_uid(uid)?.to_owned()),
                    ("uid", uid.to_string()),
                    ("type", "2".to_owned()),
                    ("current_page", "1".to_owned()),
                    ("page_size", "50".to_owned()),
                ];
                if let Some(month) = ledger_month(period) {
                    query.push(("month", month.to_string()));
                }
                let data: LedgerDetailData = self
                    .fetch(
                        self.http
                            .get(format!("{LEDGER_API}/month_detail"))
                            .query(&query)
                            .header(header::COOKIE, session.cookie_header()),
                    )
                    .await?;
                Ok(DiaryBreakdown::Mora {
                    period,
                    entries: data
                        .list
                        .into_iter()
                        .map(|entry| DiaryLogEntry {
                            action: entry.action,
                            amount: entry.num,
                        })
                        .collect(),
                })
            }
        }
    }

    async fn reward_status(&self, request: &QueryRequest) -> Result<RewardStatus, GatewayError> {
        let session = request.session()?;
        let data: RewardInfoData = self
            .fetch(
                self.http
                    .get(format!("{SOL_API}/info"))
                    .query(&[("act_id", SOL_ACT_ID)])
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        Ok(RewardStatus {
            signed_in: data.is_sign,
            claimed_count: data.total_sign_day,
        })
    }

    async fn claim_reward(&self, request: &QueryRequest) -> Result<DailyReward, GatewayError> {
        let session = request.session()?;
        // The sign endpoint answers -5003 when today's reward is already
        // claimed; that maps to AlreadyClaimed before we ever look at the
        // award list.
        let _: serde_json::Value = self
            .fetch(
                self.http
                    .post(format!("{SOL_API}/sign"))
                    .query(&[("act_id", SOL_ACT_ID)])
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        let status = self.reward_status(request).await?;
        let home: RewardHomeData = self
            .fetch(
                self.http
                    .get(format!("{SOL_API}/home"))
                    .query(&[("act_id", SOL_ACT_ID)])
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        let index = status.claimed_count.max(1) as usize - 1;
        let award = home
            .awards
            .into_iter()
            .nth(index)
            .ok_or(GatewayError::Rejected {
                retcode: 0,
                message: "award list shorter than sign-in count".to_owned(),
            })?;
        Ok(DailyReward {
            name: award.name,
            amount: award.cnt,
        })
    }

    async fn reward_history(
        &self,
        request: &QueryRequest,
    ) -> Result<Vec<ClaimHistoryEntry>, GatewayError> {
        let session = request.session()?;
        let data: RewardAwardData = self
            .fetch(
                self.http
                    .get(format!("{SOL_API}/award"))
                    .query(&[("act_id", SOL_ACT_ID), ("current_page", "1"), ("page_size", "10")])
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        Ok(data
            .list
            .into_iter()
            .map(|entry| ClaimHistoryEntry {
                name: entry.name,
                amount: entry.cnt,
                time: entry.created_at,
            })
            .collect())
    }

    async fn profile(&self, request: &QueryRequest) -> Result<AccountProfile, GatewayError> {
        let session = request.session()?;
        let uid = request.uid()?;
        let role_id = uid.to_string();
        let data: IndexData = self
            .fetch(
                self.http
                    .get(format!("{RECORD_API}/index"))
                    .query(&[("server", server_for_uid(uid)?), ("role_id", role_id.as_str())])
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        Ok(AccountProfile {
            nickname: data.role.nickname,
            adventure_rank: data.role.level,
            character_count: data.avatars.len(),
        })
    }

    async fn showcase(&self, uid: i64) -> Result<ShowcaseProfile, GatewayError> {
        let response = self
            .http
            .get(format!("{ENKA_API}/{uid}"))
            .send()
            .await?
            .error_for_status()?;
        let data: EnkaResponse = response.json().await?;
        Ok(ShowcaseProfile {
            uid,
            nickname: data.player_info.nickname,
            level: data.player_info.level,
            world_level: data.player_info.world_level,
            signature: data.player_info.signature,
            showcased: data.player_info.show_avatar_info_list.len(),
        })
    }

    /// Validates a cookie set by listing the game roles it can see; the
    /// first role carries the UID we link.
    async fn roles_for(&self, session: &SessionFields) -> Result<i64, GatewayError> {
        let data: RolesData = self
            .fetch(
                self.http
                    .get(format!("{ACCOUNT_API}/getUserGameRolesByCookie"))
                    .query(&[("game_biz", "hk4e_global")])
                    .header(header::COOKIE, session.cookie_header()),
            )
            .await?;
        let role = data.list.into_iter().next().ok_or(GatewayError::Rejected {
            retcode: 0,
            message: "no linked game account for these cookies".to_owned(),
        })?;
        role.game_uid.parse().map_err(|_| GatewayError::Rejected {
            retcode: 0,
            message: format!("unparsable uid in role listing: {}", role.game_uid),
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<SessionFields, GatewayError> {
        let response = self
            .http
            .post(format!("{PASSPORT_API}/webLoginByPassword"))
            .json(&json!({ "account": email, "password": password, "token_type": 6 }))
            .send()
            .await?;
        let mut jar: HashMap<String, String> = HashMap::new();
        for value in response.headers().get_all(header::SET_COOKIE) {
            if let Some((name, cookie)) = value
                .to_str()
                .ok()
                .and_then(|s| s.split(';').next())
                .and_then(|kv| kv.split_once('='))
            {
                jar.insert(name.trim().to_owned(), cookie.trim().to_owned());
            }
        }
        let envelope: Envelope<serde_json::Value> = response.json().await?;
        unwrap_envelope(envelope)?;
        let take = |name: &str| {
            jar.get(name)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| GatewayError::Rejected {
                    retcode: 0,
                    message: format!("login response carried no {name} cookie"),
                })
        };
        Ok(SessionFields {
            ltuid_v2: take("ltuid_v2")?,
            ltoken_v2: take("ltoken_v2")?,
            ltmid_v2: take("ltmid_v2")?,
            cookie_token_v2: take("cookie_token_v2")?,
        })
    }
}

#[async_trait]
impl DataGateway for HoyolabGateway {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResult, GatewayError> {
        match request.kind {
            QueryKind::Notes => self.daily_notes(request).await.map(QueryResult::Notes),
            QueryKind::Characters => self.characters(request).await.map(QueryResult::Characters),
            QueryKind::Abyss { previous } => {
                self.abyss(request, previous).await.map(QueryResult::Abyss)
            }
            QueryKind::DiarySummary => self
                .diary_summary(request)
                .await
                .map(QueryResult::DiarySummary),
            QueryKind::DiaryHistory { resource, period } => self
                .diary_history(request, resource, period)
                .await
                .map(QueryResult::DiaryHistory),
            QueryKind::RewardStatus => self
                .reward_status(request)
                .await
                .map(QueryResult::RewardStatus),
            QueryKind::RewardClaim => self
                .claim_reward(request)
                .await
                .map(QueryResult::RewardClaimed),
            QueryKind::RewardHistory => self
                .reward_history(request)
                .await
                .map(QueryResult::RewardHistory),
            QueryKind::Profile => self.profile(request).await.map(QueryResult::Profile),
            QueryKind::Showcase => self.showcase(request.uid()?).await.map(QueryResult::Showcase),
        }
    }

    async fn authenticate(&self, auth: &AuthRequest) -> Result<LinkedAccount, GatewayError> {
        match auth {
            AuthRequest::Cookies(session) => {
                let uid = self.roles_for(session).await?;
                Ok(LinkedAccount {
                    uid,
                    session: session.clone(),
                })
            }
            AuthRequest::Login { email, password } => {
                let session = self.login(email, password).await?;
                let uid = self.roles_for(&session).await?;
                Ok(LinkedAccount { uid, session })
            }
        }
    }
}

// Wire shapes, private to this client.

#[derive(Debug, Deserialize)]
struct NotesData {
    current_resin: i64,
    max_resin: i64,
    resin_recovery_time: String,
    finished_task_num: i64,
    total_task_num: i64,
}

#[derive(Debug, Deserialize)]
struct CharacterListData {
    avatars: Vec<AvatarData>,
}

#[derive(Debug, Deserialize)]
struct AvatarData {
    name: String,
    level: i64,
    rarity: i64,
    actived_constellation_num: i64,
    weapon: WeaponData,
}

#[derive(Debug, Deserialize)]
struct WeaponData {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AbyssData {
    total_star: i64,
    max_floor: String,
    total_battle_times: i64,
    floors: Vec<FloorData>,
}

#[derive(Debug, Deserialize)]
struct FloorData {
    index: i64,
    star: i64,
}

#[derive(Debug, Deserialize)]
struct LedgerMonthData {
    month_data: MonthData,
}

#[derive(Debug, Deserialize)]
struct MonthData {
    current_primogems: i64,
    current_mora: i64,
    #[serde(default)]
    group_by: Vec<GroupData>,
}

#[derive(Debug, Deserialize)]
struct GroupData {
    action: String,
    num: i64,
    percent: i64,
}

#[derive(Debug, Deserialize)]
struct LedgerDetailData {
    list: Vec<DetailEntry>,
}

#[derive(Debug, Deserialize)]
struct DetailEntry {
    action: String,
    num: i64,
}

#[derive(Debug, Deserialize)]
struct RewardInfoData {
    is_sign: bool,
    total_sign_day: i64,
}

#[derive(Debug, Deserialize)]
struct RewardHomeData {
    awards: Vec<AwardData>,
}

#[derive(Debug, Deserialize)]
struct AwardData {
    name: String,
    cnt: i64,
}

#[derive(Debug, Deserialize)]
struct RewardAwardData {
    list: Vec<AwardHistoryData>,
}

#[derive(Debug, Deserialize)]
struct AwardHistoryData {
    name: String,
    cnt: i64,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct IndexData {
    role: RoleData,
    #[serde(default)]
    avatars: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RoleData {
    nickname: String,
    level: i64,
}

#[derive(Debug, Deserialize)]
struct RolesData {
    #[serde(default)]
    list: Vec<GameRoleData>,
}

#[derive(Debug, Deserialize)]
struct GameRoleData {
    game_uid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnkaResponse {
    player_info: EnkaPlayerInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnkaPlayerInfo {
    nickname: String,
    level: i64,
    #[serde(default)]
    world_level: i64,
    #[serde(default)]
    signature: String,
    #[serde(default)]
    show_avatar_info_list: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_resolution_follows_leading_digits() {
        assert_eq!(server_for_uid(600000001).unwrap(), "os_usa");
        assert_eq!(server_for_uid(700000001).unwrap(), "os_euro");
        assert_eq!(server_for_uid(800000001).unwrap(), "os_asia");
        assert_eq!(server_for_uid(900000001).unwrap(), "os_cht");
        assert_eq!(server_for_uid(1800000001).unwrap(), "os_asia");
        assert!(server_for_uid(123).is_err());
    }

    #[test]
    fn envelope_retcodes_map_to_the_error_taxonomy() {
        let env = |retcode| Envelope::<i32> {
            retcode,
            message: String::new(),
            data: Some(1),
        };
        assert!(matches!(unwrap_envelope(env(0)), Ok(1)));
        assert!(matches!(
            unwrap_envelope(env(-100)),
            Err(GatewayError::InvalidSession)
        ));
        assert!(matches!(
            unwrap_envelope(env(10001)),
            Err(GatewayError::InvalidSession)
        ));
        assert!(matches!(
            unwrap_envelope(env(-5003)),
            Err(GatewayError::AlreadyClaimed)
        ));
        assert!(matches!(
            unwrap_envelope(env(-1)),
            Err(GatewayError::Rejected { retcode: -1, .. })
        ));
    }
}
