use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

pub fn parse_body(raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow::anyhow!("empty response body"));
    }
    serde_json::from_str(trimmed).context("invalid json body")
}

/// Walks a path of object keys.
pub fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = value;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key)
            && let Some(s) = as_string(v)
            && !s.is_empty()
        {
            return Some(s);
        }
    }
    None
}

pub fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers or numeric strings; TheSportsDB sends almost everything as text.
pub fn as_u32_lenient(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

pub fn as_i32_lenient(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

pub fn as_f64_lenient(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned = s.trim().trim_end_matches('%').trim();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    }
}

pub fn pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(as_u32_lenient))
}

/// Minutes past `u16::MAX` are garbage, not a wrapped clock.
pub fn minute_of(value: Option<u32>) -> Option<u16> {
    value.and_then(|m| u16::try_from(m).ok())
}

pub fn u32_at(value: &Value, path: &[&str]) -> Option<u32> {
    at(value, path).and_then(as_u32_lenient)
}

pub fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    at(value, path)
        .and_then(as_string)
        .filter(|s| !s.is_empty())
}

pub fn id_at(value: &Value, path: &[&str]) -> String {
    string_at(value, path).unwrap_or_default()
}

/// Display text for a statistic cell; absent, null and blank read as "-".
pub fn display_value(value: Option<&Value>) -> String {
    value
        .and_then(as_string)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "-".to_string())
}

/// Accepts RFC 3339 (`2025-08-23T18:45:00+00:00`, `...Z`) and the naive
/// `2025-08-23T18:45:00` / `2025-08-23 18:45:00` forms, read as UTC.
pub fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = trimmed.trim_end_matches('Z').replace(' ', "T");
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&naive, fmt) {
            return Some(dt.and_utc());
        }
    }
    None
}
