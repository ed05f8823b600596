//! Central inline-keyboard construction helpers ensuring consistent labels
//! and callback ids.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::gateway::DiaryResource;
use crate::interactions::ids;
use crate::ui::text;

fn btn(label: &str, id: impl Into<String>) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label.to_owned(), id.into())
}

pub fn abyss_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![btn(text::BTN_ABYSS_PREVIOUS, ids::ABYSS_PREVIOUS)],
        vec![btn(text::BTN_ABYSS_CURRENT, ids::ABYSS_CURRENT)],
    ])
}

pub fn resource_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![btn(text::BTN_PRIMOGEMS, ids::resource_id(DiaryResource::Primogems))],
        vec![btn(text::BTN_MORA, ids::resource_id(DiaryResource::Mora))],
    ])
}

pub fn period_keyboard(resource: DiaryResource) -> InlineKeyboardMarkup {
    use crate::gateway::DiaryPeriod;
    InlineKeyboardMarkup::new(vec![
        vec![btn(
            text::BTN_PERIOD_WEEK,
            ids::resource_period_id(resource, DiaryPeriod::Week),
        )],
        vec![btn(
            text::BTN_PERIOD_MONTH,
            ids::resource_period_id(resource, DiaryPeriod::Month),
        )],
        vec![btn(
            text::BTN_PERIOD_3MONTHS,
            ids::resource_period_id(resource, DiaryPeriod::ThreeMonths),
        )],
    ])
}

pub fn rewards_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![btn(text::BTN_CLAIM_DAILY, ids::CLAIM_DAILY)],
        vec![btn(text::BTN_VIEW_CLAIMED, ids::VIEW_CLAIMED)],
    ])
}
