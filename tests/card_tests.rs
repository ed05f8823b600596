//! The fallback card must always produce bytes, deterministically.

use genshin_bot::gateway::ShowcaseProfile;
use genshin_bot::ui::card::{fallback_card, select_renderer, CardRenderer as _};

fn profile() -> ShowcaseProfile {
    ShowcaseProfile {
        uid: 800_000_001,
        nickname: "Traveler".to_owned(),
        level: 58,
        world_level: 8,
        signature: "ad astra".to_owned(),
        showcased: 8,
    }
}

#[test]
fn fallback_card_yields_png_bytes() {
    let bytes = fallback_card(&profile());
    assert!(!bytes.is_empty());
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn fallback_card_is_deterministic() {
    assert_eq!(fallback_card(&profile()), fallback_card(&profile()));
}

#[test]
fn fallback_card_survives_unrenderable_text() {
    let mut exotic = profile();
    exotic.nickname = "مسافر 🌸".to_owned();
    exotic.signature = String::new();
    let bytes = fallback_card(&exotic);
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn selected_renderer_without_service_never_fails() {
    let renderer = select_renderer(None);
    let bytes = renderer.render(&profile()).await.expect("fallback renders");
    assert!(!bytes.is_empty());
}
