//! Body Canonicalizer
//!
//! Normalizes request payloads into the text that feeds the fingerprint.

use serde_json::{Number, Value};

use crate::error::{MockError, Result};

// == Canonicalize ==
/// Canonical text of a raw request body.
///
/// Empty input is legal and yields an empty string. Anything else must parse
/// as exactly one JSON object; arrays, scalars, `null` and unparsable bytes
/// all fail with `MalformedPayload`.
pub fn canonicalize(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Ok(String::new());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|_| MockError::MalformedPayload)?;
    match value {
        Value::Object(_) => Ok(canonicalize_value(&value)),
        _ => Err(MockError::MalformedPayload),
    }
}

/// Largest magnitude below which every integer is exact as an f64 (2^53).
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

// == Canonicalize Value ==
/// Compact serialization with object keys in lexicographic order and
/// integral floats written as integers, so `10`, `10.0` and `1e1` agree.
///
/// `serde_json::Map` is BTree-backed, so parsing already sorted the keys.
pub fn canonicalize_value(value: &Value) -> String {
    // Serializing a Value cannot fail: every key is a string
    serde_json::to_string(&normalize_numbers(value)).unwrap_or_default()
}

fn normalize_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(normalize_number(n)),
        Value::Array(items) => Value::Array(items.iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), normalize_numbers(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn normalize_number(n: &Number) -> Number {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT {
                return Number::from(f as i64);
            }
        }
    }
    n.clone()
}
