// src/api/parser.rs
//! Turns raw TestRail response bodies into records.
//!
//! Bulk endpoints answer either with a bare JSON array (TestRail < 6.7) or
//! with an object wrapping the array under the endpoint's collection key.
//! Both shapes are accepted.

use super::client::ApiResponse;
use super::endpoints::Endpoint;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::TestRailError;
use crate::model::{Page, Record};
use serde_json::Value;

/// Parse a bulk endpoint response into a page of records.
pub fn parse_page_response(
    result: ApiResponse<String>,
    endpoint: &Endpoint,
) -> Result<Page, TestRailError> {
    let value = parse_body(result)?;
    page_from_value(value, endpoint)
}

/// Parse a single-object endpoint response.
pub fn parse_record_response(result: ApiResponse<String>) -> Result<Record, TestRailError> {
    match parse_body(result)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(TestRailError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Extracts the records of a bulk response that is already decoded.
pub fn page_from_value(value: Value, endpoint: &Endpoint) -> Result<Page, TestRailError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut wrapper) => {
            let key = endpoint.collection_key().ok_or_else(|| {
                TestRailError::MalformedResponse(format!(
                    "{} returned an object but is not a bulk endpoint",
                    endpoint.path()
                ))
            })?;
            match wrapper.remove(key) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(TestRailError::MalformedResponse(format!(
                        "{} response has no '{}' list",
                        endpoint.path(),
                        key
                    )))
                }
            }
        }
        other => {
            return Err(TestRailError::MalformedResponse(format!(
                "{} returned {} instead of a list",
                endpoint.path(),
                json_type_name(&other)
            )))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map.into_iter().collect::<Record>()),
            other => Err(TestRailError::MalformedResponse(format!(
                "{} list contains {} instead of objects",
                endpoint.path(),
                json_type_name(&other)
            ))),
        })
        .collect()
}

/// Decodes the body, mapping non-2xx statuses to `TestRailError::Service`.
fn parse_body(result: ApiResponse<String>) -> Result<Value, TestRailError> {
    if !result.status.is_success() {
        return Err(TestRailError::Service {
            status: result.status,
            message: error_message(&result.data),
            url: result.url,
        });
    }

    serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        TestRailError::MalformedResponse(format!("{} (body: {})", e, preview(&result.data)))
    })
}

/// TestRail reports failures as `{"error": "..."}`; fall back to the body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| preview(body))
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
