//! Handles the `claim_daily` / `view_claimed` buttons under the daily
//! rewards message.

use crate::commands::data;
use crate::gateway::QueryKind;
use crate::model::AppState;
use crate::ui::format::Reply;

use super::ids;

pub async fn handle(state: &AppState, user_id: u64, callback: &str) -> Reply {
    let kind = if callback == ids::CLAIM_DAILY {
        QueryKind::RewardClaim
    } else {
        QueryKind::RewardHistory
    };
    data::run(state, user_id, kind, "daily_rewards_button").await
}
