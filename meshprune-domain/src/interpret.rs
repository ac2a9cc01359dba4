//! Field interpreters.
//!
//! Every function here is total: absent or oddly-typed fields map to the neutral value
//! (unknown type, not favorite, never seen, no custom path) instead of an error.

use chrono::{DateTime, Utc};
use meshprune_types::contact::{RawContact, fields};
use meshprune_types::review::{TypeCategory, UNNAMED};
use serde_json::Value;

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Markers that mean "no fixed route, flood the mesh".
pub const DEFAULT_FLOOD_MARKERS: [&str; 3] = ["flood", "ff", "0"];

/// Lowest bit of a JSON number after truncation toward zero.
///
/// Floats too large for an integer type keep their parity; non-numbers have no bit set.
fn low_bit(v: &Value) -> bool {
    if let Some(n) = v.as_i64() {
        return n & 1 == 1;
    }
    if let Some(n) = v.as_u64() {
        return n & 1 == 1;
    }
    v.as_f64()
        .filter(|f| f.is_finite())
        .is_some_and(|f| f.trunc().rem_euclid(2.0) == 1.0)
}

pub fn classify_type(code: Option<&Value>) -> TypeCategory {
    let exact = code.and_then(|v| match v.as_i64() {
        Some(n) => Some(n),
        None => v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64),
    });
    match exact {
        Some(1) => TypeCategory::Companion,
        Some(2) => TypeCategory::Repeater,
        Some(3) => TypeCategory::Room,
        Some(4) => TypeCategory::Sensor,
        _ => TypeCategory::Unknown,
    }
}

/// Bit 0 of `flags` marks a favorite.
pub fn detect_favorite(flags: Option<&Value>) -> bool {
    flags.is_some_and(low_bit)
}

/// Later of the two epoch-second timestamps, if either is a number.
pub fn compute_last_seen(advert: Option<&Value>, modified: Option<&Value>) -> Option<DateTime<Utc>> {
    let secs = [advert, modified]
        .into_iter()
        .flatten()
        .filter_map(Value::as_f64)
        .fold(None, |acc: Option<f64>, ts| Some(acc.map_or(ts, |a| a.max(ts))))?;

    let ms = secs * 1000.0;
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

/// Whole days elapsed since `last_seen`, floored. Negative for future timestamps.
pub fn age_in_days(now: DateTime<Utc>, last_seen: Option<DateTime<Utc>>) -> Option<i64> {
    last_seen.map(|ts| (now - ts).num_milliseconds().div_euclid(MS_PER_DAY))
}

/// Text of a routing path value, or `None` when the value is empty-ish
/// (`null`, `false`, `0`, `""`, or an array that renders empty).
///
/// Arrays render their elements joined by `,`, with `null` elements as empty text.
pub fn path_text(path: Option<&Value>) -> Option<String> {
    match path? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(value_text(other)).filter(|t| !t.is_empty()),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// True when the path is set to something other than a flood marker.
///
/// `flood_markers` must already be lowercase.
pub fn has_custom_path(path: Option<&Value>, flood_markers: &[String]) -> bool {
    let Some(text) = path_text(path) else {
        return false;
    };
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    !flood_markers.iter().any(|m| *m == normalized)
}

pub fn display_name(raw: &RawContact) -> String {
    raw.non_empty_str(fields::CUSTOM_NAME)
        .or_else(|| raw.non_empty_str(fields::NAME))
        .unwrap_or(UNNAMED)
        .to_string()
}
