//! Centralized callback-data string constants for inline buttons.
//! Consolidating here reduces typos and keeps the router, the keyboard
//! builders, and the tests on one vocabulary.

use crate::gateway::{DiaryPeriod, DiaryResource};

pub const CLAIM_DAILY: &str = "claim_daily";
pub const VIEW_CLAIMED: &str = "view_claimed";
pub const ABYSS_PREVIOUS: &str = "abyss_previous";
pub const ABYSS_CURRENT: &str = "abyss_current";
pub const RESOURCE_PREFIX: &str = "resource_"; // followed by resource key, optionally _<period>

pub fn resource_id(resource: DiaryResource) -> String {
    format!("{RESOURCE_PREFIX}{}", resource.key())
}

pub fn resource_period_id(resource: DiaryResource, period: DiaryPeriod) -> String {
    format!("{RESOURCE_PREFIX}{}_{}", resource.key(), period.key())
}

pub fn is_resource(id: &str) -> bool {
    id.starts_with(RESOURCE_PREFIX)
}

/// Parse a resource callback id into its resource and optional period.
/// Expected forms: `resource_<resource>` and `resource_<resource>_<period>`.
pub fn parse_resource_id(id: &str) -> Option<(DiaryResource, Option<DiaryPeriod>)> {
    let rest = id.strip_prefix(RESOURCE_PREFIX)?;
    let (resource_key, period_key) = match rest.split_once('_') {
        Some((resource_key, period_key)) => (resource_key, Some(period_key)),
        None => (rest, None),
    };
    let resource = match resource_key {
        "primogems" => DiaryResource::Primogems,
        "mora" => DiaryResource::Mora,
        _ => return None,
    };
    let period = match period_key {
        None => None,
        Some("week") => Some(DiaryPeriod::Week),
        Some("month") => Some(DiaryPeriod::Month),
        Some("3months") => Some(DiaryPeriod::ThreeMonths),
        Some(_) => return None,
    };
    Some((resource, period))
}
