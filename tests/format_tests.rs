//! Formatter properties: escaping of remote text, informational vs error
//! styling, and display caps.

use genshin_bot::gateway::{
    CharacterSummary, ClaimHistoryEntry, DailyNotes, DailyReward, DiaryBreakdown, DiaryCategory,
    DiaryPeriod, QueryResult, RewardStatus,
};
use genshin_bot::ui::format::render;
use genshin_bot::ui::style::{code, escape, short_duration, stat_pair};

#[test]
fn escape_neutralizes_dialect_characters() {
    assert_eq!(escape("a*b_c`d"), "a\\*b\\_c\\`d");
    assert_eq!(escape("x.y!z-w"), "x\\.y\\!z\\-w");
    assert_eq!(escape("[link](url)"), "\\[link\\]\\(url\\)");
    assert_eq!(escape("عادي"), "عادي");
}

#[test]
fn code_spans_escape_backticks_and_backslashes() {
    assert_eq!(code("plain"), "`plain`");
    assert_eq!(code("a`b"), "`a\\`b`");
    assert_eq!(code("a\\b"), "`a\\\\b`");
    assert_eq!(code(42), "`42`");
}

#[test]
fn stat_pair_and_duration_shapes() {
    assert_eq!(stat_pair(40, 160), "`40/160`");
    assert_eq!(short_duration(4 * 3600 + 5 * 60), "4:05");
    assert_eq!(short_duration(-3), "0:00");
}

#[test]
fn character_names_are_escaped_into_the_styled_body() {
    let reply = render(&QueryResult::Characters(vec![CharacterSummary {
        name: "Hu*Tao_`v`".to_owned(),
        level: 90,
        constellation: 1,
        rarity: 5,
        weapon: "Staff_of*Homa".to_owned(),
    }]));
    assert!(reply.markdown);
    assert!(reply.text.contains("Hu\\*Tao\\_\\`v\\`"), "got: {}", reply.text);
    assert!(reply.text.contains("Staff\\_of\\*Homa"));
}

#[test]
fn notes_body_contains_the_literal_resin_pair() {
    let reply = render(&QueryResult::Notes(DailyNotes {
        resin: 40,
        max_resin: 160,
        resin_recovery_secs: 3600,
        completed_commissions: 4,
        total_commissions: 4,
    }));
    assert!(reply.text.contains("40/160"));
}

#[test]
fn claimed_reward_is_plain_informational_text() {
    let reply = render(&QueryResult::RewardClaimed(DailyReward {
        name: "Primogem".to_owned(),
        amount: 60,
    }));
    assert!(!reply.markdown);
    assert!(reply.text.starts_with("✅"));
    assert!(reply.text.contains("60x Primogem"));
}

#[test]
fn reward_status_carries_the_claim_menu() {
    let reply = render(&QueryResult::RewardStatus(RewardStatus {
        signed_in: true,
        claimed_count: 12,
    }));
    assert!(reply.keyboard.is_some());
    assert!(reply.text.contains("`12`"));
}

#[test]
fn long_lists_truncate_at_the_display_cap_in_remote_order() {
    let entries: Vec<ClaimHistoryEntry> = (0..25)
        .map(|i| ClaimHistoryEntry {
            name: format!("Reward {i}"),
            amount: 1,
            time: format!("2026-08-{:02}", i + 1),
        })
        .collect();
    let reply = render(&QueryResult::RewardHistory(entries));
    assert!(reply.text.contains("Reward 0"));
    assert!(reply.text.contains("Reward 9"));
    assert!(!reply.text.contains("Reward 10"));
    assert!(reply.text.contains("15"), "truncation note names the rest");
}

#[test]
fn diary_breakdown_labels_the_requested_period() {
    let reply = render(&QueryResult::DiaryHistory(DiaryBreakdown::Primogems {
        period: DiaryPeriod::Week,
        total: 1200,
        categories: vec![DiaryCategory {
            name: "Events".to_owned(),
            amount: 600,
            percentage: 50,
        }],
    }));
    assert!(reply.text.contains("week"));
    assert!(reply.text.contains("`1200`"));
    assert!(reply.text.contains("Events"));
}
