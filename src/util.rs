/// Utility helpers used by all collectors.
///
/// This module contains:
/// - Account identifier construction
/// - Time helpers
/// - Insight metric extraction shared by the Graph API platforms
///
/// IMPORTANT:
/// - No platform-specific request logic should live here.
/// - Everything in this module is pure and deterministic
///   (except `now_iso8601`).
///

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

/// Build the run-wide account identifier.
///
/// Format:
///     <platform>:<id>
///
/// Examples:
/// - ("tiktok", "usuario1")      -> "tiktok:usuario1"
/// - ("instagram", "1784140...") -> "instagram:1784140..."
///
pub fn account_id(platform: &str, id: &str) -> String {
    format!("{}:{}", platform, id)
}

/// Current UTC time as ISO-8601 with microseconds and an explicit
/// `+00:00` offset.
///
/// Example: "2026-10-18T06:00:00.123456+00:00"
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse a view count out of an arbitrary JSON value.
///
/// Accepted:
/// - unsigned integers             -> as is
/// - non-negative floats           -> truncated
/// - strings holding an integer    -> parsed (whitespace trimmed)
///
/// Everything else (null, negative numbers, objects, "12.5",
/// "n/a", ...) returns `None`.
///
pub fn parse_view_count(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            }
        }
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Derive a view count from a Graph API insights list.
///
/// INPUT:
/// - `metrics`: the `data` array of an insights object, each entry
///   shaped like `{"name": "...", "values": [{"value": ...}]}`
/// - `allow`: metric names considered a view count
///
/// BEHAVIOR:
/// - Walks metrics in order, starting from 0
/// - Every allow-listed metric whose first value parses overwrites
///   the running count, so the LAST parseable match wins
/// - A metric whose value does not parse leaves the running count
///   unchanged
///
/// RETURNS:
/// - the derived count
/// - the number of allow-listed metrics that failed to parse
///
pub fn views_from_insights(metrics: &[Value], allow: &[&str]) -> (u64, usize) {
    let mut views = 0;
    let mut parse_failures = 0;

    for metric in metrics {
        let Some(name) = metric.get("name").and_then(Value::as_str) else {
            continue;
        };
        if !allow.contains(&name) {
            continue;
        }

        match metric
            .pointer("/values/0/value")
            .and_then(parse_view_count)
        {
            Some(v) => views = v,
            None => parse_failures += 1,
        }
    }

    (views, parse_failures)
}

/// Read an optional string field, mapping absent / null / non-string
/// values to an empty string.
pub fn str_field(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
