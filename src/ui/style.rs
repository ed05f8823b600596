//! Central MarkdownV2 styling helpers.
//! Remote-supplied text (character names, reward names, ledger actions) can
//! contain any of the dialect's reserved characters; everything interpolated
//! into a styled message goes through [`escape`] or [`code`].

use std::fmt::Display;

/// Characters reserved by Telegram MarkdownV2 outside code spans.
const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Escapes free text for interpolation into a MarkdownV2 message.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if RESERVED.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Wraps a value in an inline code span. Inside a span only the backtick
/// and the backslash are special.
pub fn code<T: Display>(value: T) -> String {
    let raw = value.to_string();
    let mut body = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '`' || ch == '\\' {
            body.push('\\');
        }
        body.push(ch);
    }
    format!("`{body}`")
}

/// `current/max` pair rendered as a code span, e.g. `` `40/160` ``.
pub fn stat_pair(current: i64, max: i64) -> String {
    format!("`{current}/{max}`")
}

/// Remaining-time display as `h:mm`.
pub fn short_duration(total_secs: i64) -> String {
    let total_secs = total_secs.max(0);
    format!("{}:{:02}", total_secs / 3600, (total_secs % 3600) / 60)
}
