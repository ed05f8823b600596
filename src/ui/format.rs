//! Pure formatter: turns a typed query result into one outgoing reply.
//! No I/O happens here; handlers own sending. Styled bodies are MarkdownV2
//! with every interpolated remote value escaped.

use teloxide::types::InlineKeyboardMarkup;

use crate::constants::MAX_LIST_ROWS;
use crate::gateway::{DiaryBreakdown, QueryResult};
use crate::ui::buttons;
use crate::ui::style::{code, escape, stat_pair, short_duration};
use crate::ui::text;

/// Image payload attached to a reply; the reply text doubles as caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub png: Vec<u8>,
}

/// Exactly one of these leaves the dispatcher per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// Whether `text` is MarkdownV2 (assembled with escaping) or plain.
    pub markdown: bool,
    pub keyboard: Option<InlineKeyboardMarkup>,
    pub photo: Option<Photo>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: false,
            keyboard: None,
            photo: None,
        }
    }

    pub fn styled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markdown: true,
            keyboard: None,
            photo: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }
}

/// Renders a query result. Pure function of its input.
pub fn render(result: &QueryResult) -> Reply {
    match result {
        QueryResult::Notes(notes) => {
            let mut body = format!(
                "*🛡 Resin الحالي:* {} \\| الوقت المتبقي: {}",
                stat_pair(notes.resin, notes.max_resin),
                code(short_duration(notes.resin_recovery_secs)),
            );
            body.push_str(&format!(
                "\n*📜 المهام اليومية:* {}",
                stat_pair(notes.completed_commissions, notes.total_commissions),
            ));
            Reply::styled(body)
        }
        QueryResult::Characters(characters) => {
            let mut body = String::from("*🗡 شخصياتك:*");
            for character in characters.iter().take(MAX_LIST_ROWS) {
                body.push_str(&format!(
                    "\n\\- {} Lv\\.{} \\| C{} \\| {}",
                    escape(&character.name),
                    character.level,
                    character.constellation,
                    escape(&character.weapon),
                ));
            }
            push_truncation_note(&mut body, characters.len());
            Reply::styled(body)
        }
        QueryResult::Abyss(abyss) => {
            let header = if abyss.previous {
                "*↩ Spiral Abyss السابق:*"
            } else {
                "*🌀 Spiral Abyss الحالي:*"
            };
            let mut body = format!(
                "{header}\n\\- Stars: {}\n\\- أعمق طابق: {}\n\\- عدد المعارك: {}",
                code(abyss.total_stars),
                code(&abyss.max_floor),
                code(abyss.total_battles),
            );
            for floor in abyss.floors.iter().take(MAX_LIST_ROWS) {
                body.push_str(&format!(
                    "\n\\- الطابق {}: ⭐ {}",
                    floor.index,
                    code(floor.stars),
                ));
            }
            Reply::styled(body).with_keyboard(buttons::abyss_keyboard())
        }
        QueryResult::DiarySummary(snapshot) => {
            let body = format!(
                "💎 *Primogems الحالية:* {}\n💰 *Mora الحالية:* {}\n\n{}",
                code(snapshot.primogems),
                code(snapshot.mora),
                escape("اختر المورد لعرض إحصائياته التاريخية:"),
            );
            Reply::styled(body).with_keyboard(buttons::resource_keyboard())
        }
        QueryResult::DiaryHistory(DiaryBreakdown::Primogems {
            period,
            total,
            categories,
        }) => {
            let mut body = format!(
                "💎 *Primogems المكتسبة \\({}\\):* {}\n\n*🔹 مصادر Primogems:*",
                period.key(),
                code(total),
            );
            for category in categories.iter().take(MAX_LIST_ROWS) {
                body.push_str(&format!(
                    "\n\\- {}% من {} \\({} primogems\\)",
                    category.percentage,
                    escape(&category.name),
                    code(category.amount),
                ));
            }
            Reply::styled(body)
        }
        QueryResult::DiaryHistory(DiaryBreakdown::Mora { period, entries }) => {
            let mut body = format!("💰 *سجل Mora \\({}\\):*", period.key());
            for entry in entries.iter().take(MAX_LIST_ROWS) {
                body.push_str(&format!(
                    "\n\\- {} : {} mora",
                    escape(&entry.action),
                    code(entry.amount),
                ));
            }
            push_truncation_note(&mut body, entries.len());
            Reply::styled(body)
        }
        QueryResult::RewardStatus(status) => {
            let state_line = if status.signed_in {
                "✅ تم تسجيل الدخول اليومي"
            } else {
                "❌ لم يتم تسجيل الدخول اليوم"
            };
            let body = format!(
                "*📊 حالة المكافأة اليومية:*\n{}\n*عدد المكافآت المطالبة:* {}",
                escape(state_line),
                code(status.claimed_count),
            );
            Reply::styled(body).with_keyboard(buttons::rewards_keyboard())
        }
        // Informational, deliberately not styled as an error.
        QueryResult::RewardClaimed(reward) => Reply::plain(format!(
            "✅ تم المطالبة بالمكافأة اليومية: {}x {}",
            reward.amount, reward.name,
        )),
        QueryResult::RewardHistory(entries) => {
            let mut body = String::from("*📜 المكافآت المطالبة سابقًا:*");
            for entry in entries.iter().take(MAX_LIST_ROWS) {
                body.push_str(&format!(
                    "\n\\- {} : {}x {}",
                    escape(&entry.time),
                    entry.amount,
                    escape(&entry.name),
                ));
            }
            push_truncation_note(&mut body, entries.len());
            Reply::styled(body)
        }
        QueryResult::Profile(profile) => Reply::styled(format!(
            "*👤 بيانات المستخدم:*\n\\- الاسم: {}\n\\- Adventure Rank: {}\n\\- عدد الشخصيات: {}",
            escape(&profile.nickname),
            code(profile.adventure_rank),
            code(profile.character_count),
        )),
        QueryResult::Showcase(profile) => {
            let mut body = format!(
                "*🃏 بطاقة اللاعب:*\n\\- الاسم: {}\n\\- Adventure Rank: {}\n\\- مستوى العالم: {}\n\\- الشخصيات المعروضة: {}",
                escape(&profile.nickname),
                code(profile.level),
                code(profile.world_level),
                code(profile.showcased),
            );
            if !profile.signature.is_empty() {
                body.push_str(&format!("\n\\- التوقيع: {}", escape(&profile.signature)));
            }
            Reply::styled(body)
        }
    }
}

/// Lists keep remote order and cut at the display cap; note what was left.
fn push_truncation_note(body: &mut String, total: usize) {
    if total > MAX_LIST_ROWS {
        body.push_str(&format!("\n… والمزيد \\({}\\)", total - MAX_LIST_ROWS));
    }
}
