//! Handles the previous/current toggle under the abyss message.

use crate::commands::data;
use crate::gateway::QueryKind;
use crate::model::AppState;
use crate::ui::format::Reply;

use super::ids;

pub async fn handle(state: &AppState, user_id: u64, callback: &str) -> Reply {
    let previous = callback == ids::ABYSS_PREVIOUS;
    data::run(state, user_id, QueryKind::Abyss { previous }, "abyss_button").await
}
