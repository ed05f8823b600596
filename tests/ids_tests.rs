use genshin_bot::gateway::{DiaryPeriod, DiaryResource};
use genshin_bot::interactions::ids::{
    is_resource, parse_resource_id, resource_id, resource_period_id, ABYSS_CURRENT, CLAIM_DAILY,
};

#[test]
fn parse_bare_resource() {
    let (resource, period) = parse_resource_id("resource_primogems").expect("should parse");
    assert_eq!(resource, DiaryResource::Primogems);
    assert_eq!(period, None);
}

#[test]
fn parse_resource_with_period() {
    let (resource, period) = parse_resource_id("resource_mora_week").expect("should parse");
    assert_eq!(resource, DiaryResource::Mora);
    assert_eq!(period, Some(DiaryPeriod::Week));

    let (resource, period) = parse_resource_id("resource_primogems_3months").expect("should parse");
    assert_eq!(resource, DiaryResource::Primogems);
    assert_eq!(period, Some(DiaryPeriod::ThreeMonths));
}

#[test]
fn parse_bad_ids() {
    assert!(parse_resource_id("resource_").is_none());
    assert!(parse_resource_id("resource_gems").is_none());
    assert!(parse_resource_id("resource_mora_century").is_none());
    assert!(parse_resource_id("claim_daily").is_none());
}

#[test]
fn builders_round_trip_through_the_parser() {
    for resource in [DiaryResource::Primogems, DiaryResource::Mora] {
        let bare = resource_id(resource);
        assert!(is_resource(&bare));
        assert_eq!(parse_resource_id(&bare), Some((resource, None)));
        for period in [
            DiaryPeriod::Week,
            DiaryPeriod::Month,
            DiaryPeriod::ThreeMonths,
        ] {
            let full = resource_period_id(resource, period);
            assert_eq!(parse_resource_id(&full), Some((resource, Some(period))));
        }
    }
}

#[test]
fn families_do_not_collide() {
    assert!(!is_resource(CLAIM_DAILY));
    assert!(!is_resource(ABYSS_CURRENT));
}
