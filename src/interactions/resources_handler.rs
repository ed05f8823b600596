//! Handles the diary resource buttons: a bare resource id opens the period
//! menu locally; a resource+period id issues the history query.

use crate::commands::data;
use crate::gateway::QueryKind;
use crate::model::AppState;
use crate::ui::buttons;
use crate::ui::format::Reply;
use crate::ui::text;

use super::ids;

pub async fn handle(state: &AppState, user_id: u64, callback: &str) -> Option<Reply> {
    let (resource, period) = ids::parse_resource_id(callback)?;
    match period {
        // Menu step, no remote call involved.
        None => Some(Reply::plain(text::CHOOSE_PERIOD).with_keyboard(buttons::period_keyboard(resource))),
        Some(period) => Some(
            data::run(
                state,
                user_id,
                QueryKind::DiaryHistory { resource, period },
                "resources_diary_button",
            )
            .await,
        ),
    }
}
