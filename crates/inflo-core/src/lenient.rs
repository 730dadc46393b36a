//! Forgiving deserializers for numbers the backend copies out of agent output.
//!
//! Scores, rates, and counts may arrive as numbers, numeric strings
//! (`"92"`, `"3.4%"`, `"12,500"`), or floats where an integer is expected.
//! Anything still unreadable becomes `None` so the caller's default applies
//! instead of the whole payload failing.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn parse_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.trim().parse::<f64>().ok()
}

fn as_float(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_text(s),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn float_to_count(value: f64) -> Option<u64> {
    (0.0..=u64::MAX as f64).contains(&value).then(|| value.round() as u64)
}

/// `Option<f64>` from a number or numeric string.
///
/// # Errors
///
/// Never fails on content; only propagates errors from the underlying
/// deserializer.
pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_float))
}

/// `Option<u64>` from an integer, a non-negative float (rounded), or a
/// numeric string.
///
/// # Errors
///
/// Never fails on content; only propagates errors from the underlying
/// deserializer.
pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().and_then(float_to_count)),
        Some(other) => as_float(&other).and_then(float_to_count),
        None => None,
    })
}
