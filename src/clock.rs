//! Remote clock lookup for the storefront header, display-only
use anyhow::Context;
use chrono::{DateTime, FixedOffset};

pub const WORLD_TIME_BASE_URL: &str = "https://worldtimeapi.org/api/timezone";

/// Extracts the `datetime` field from a world-time response body.
pub fn parse_world_time(body: &serde_json::Value) -> anyhow::Result<DateTime<FixedOffset>> {
    let datetime = body
        .get("datetime")
        .and_then(|value| value.as_str())
        .context("world time response is missing the datetime field")?;

    DateTime::parse_from_rfc3339(datetime).context("world time datetime is not valid RFC3339")
}

/// Fetches the current time for a zone such as
/// `America/Argentina/Buenos_Aires`. Failures here never affect catalog or
/// cart state; callers are free to swallow them.
pub fn fetch_zone_time(zone: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let url = format!("{WORLD_TIME_BASE_URL}/{zone}");
    let body: serde_json::Value = ureq::get(&url).call()?.into_json()?;
    parse_world_time(&body)
}

pub fn format_zone_time(datetime: &DateTime<FixedOffset>) -> String {
    datetime.format("%A %-d %B %Y, %H:%M:%S").to_string()
}
