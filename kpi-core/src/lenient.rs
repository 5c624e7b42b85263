//! Tolerant field decoders for API payloads.
//!
//! The portal API is not consistent about scalar types: ids arrive as numbers
//! or strings, numeric measurements sometimes arrive as strings, and optional
//! fields may be `null`. These helpers coerce what they can and map anything
//! else to `None` (or an empty id) instead of failing the whole collection.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Id text of a JSON number. Integral values render without a fraction,
/// so `3`, `3.0` and `"3"` all name the same entity.
pub(crate) fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

/// Coerce a scalar JSON value to its id text. Non-scalars become `""`.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string(deserializer)
}

/// Required display text; `null` and non-scalars become `""`.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(scalar_text).unwrap_or_default())
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub(crate) fn integer<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|n| n.is_finite() && n.fract() == 0.0)
        .map(|n| n as i32))
}

pub(crate) fn month<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = integer(deserializer)?;
    Ok(value.filter(|m| (1..=12).contains(m)).map(|m| m as u32))
}

/// Optional display text. Numbers are rendered, blank strings become `None`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
