//! Response envelopes.
//!
//! Collection endpoints wrap their array differently (bare array, a fixed
//! key, or one of several keys depending on the insurer). Each endpoint
//! declares its [`ListShape`] and decoding happens in one place.

use super::error::ApiError;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// The body is the array
    Bare,
    /// The array sits under a fixed key
    Key(&'static str),
    /// First key that is present and non-null, then the body itself
    Probe(&'static [&'static str]),
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn expect_array(endpoint: &str, candidate: Value, source: &str) -> Result<Vec<Value>, ApiError> {
    match candidate {
        Value::Array(items) => Ok(items),
        other => Err(ApiError::Shape {
            endpoint: endpoint.to_string(),
            detail: format!("expected an array at {source}, found {}", describe(&other)),
        }),
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Body of a read. Non-2xx becomes [`ApiError::Status`], an empty 2xx body
/// reads as `null`, anything else must be JSON.
pub fn decode_body(endpoint: &str, status: u16, text: &str) -> Result<Value, ApiError> {
    if !is_success(status) {
        return Err(ApiError::from_status(status, text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(format!("{endpoint}: {e}")))
}

/// Body of a create, update or delete. Any 2xx is a success; a reply that
/// is not JSON (`Deleted`, `OK`) reads as `null`.
pub fn decode_mutation_body(status: u16, text: &str) -> Result<Value, ApiError> {
    if !is_success(status) {
        return Err(ApiError::from_status(status, text));
    }
    Ok(serde_json::from_str(text).unwrap_or(Value::Null))
}

/// Extract the record array from a collection response.
pub fn decode_list(
    endpoint: &str,
    body: Value,
    shape: ListShape,
) -> Result<Vec<Value>, ApiError> {
    match shape {
        ListShape::Bare => expect_array(endpoint, body, "body"),
        ListShape::Key(key) => {
            let candidate = match body {
                Value::Object(mut map) => map.remove(key).unwrap_or(Value::Null),
                _ => Value::Null,
            };
            expect_array(endpoint, candidate, key)
        }
        ListShape::Probe(keys) => {
            if let Value::Object(map) = &body {
                if let Some(key) = keys
                    .iter()
                    .find(|k| map.get(**k).is_some_and(|v| !v.is_null()))
                {
                    let candidate = map.get(*key).cloned().unwrap_or(Value::Null);
                    return expect_array(endpoint, candidate, key);
                }
            }
            expect_array(endpoint, body, "body")
        }
    }
}

/// Extract a single record, optionally wrapped under `key`.
pub fn decode_object(endpoint: &str, body: Value, key: Option<&str>) -> Result<Value, ApiError> {
    let candidate = match (key, body) {
        (None, body) => body,
        (Some(key), Value::Object(mut map)) => map.remove(key).unwrap_or(Value::Null),
        (Some(_), _) => Value::Null,
    };
    match candidate {
        Value::Object(_) => Ok(candidate),
        other => Err(ApiError::Shape {
            endpoint: endpoint.to_string(),
            detail: format!(
                "expected an object at {}, found {}",
                key.unwrap_or("body"),
                describe(&other)
            ),
        }),
    }
}
