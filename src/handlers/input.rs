// Field extraction and coercion for JSON request bodies.
//
// Clients send numbers either as JSON numbers or as text, and leave optional
// fields out, null, or empty. Everything here normalizes those shapes or
// produces a 400 naming the offending field.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::{Map, Value};

use crate::error::ApiError;

pub type Body = Map<String, Value>;

/// Unwrap a JSON extractor result into an object body
pub fn object_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Body, ApiError> {
    let Json(value) = payload.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::invalid_json("Request body must be a JSON object")),
    }
}

/// Absent, null and blank text all count as "not provided"
fn provided<'a>(body: &'a Body, field: &str) -> Option<&'a Value> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

pub fn required_text(body: &Body, field: &str) -> Result<String, ApiError> {
    optional_text(body, field)?.ok_or_else(|| ApiError::missing_field(field))
}

pub fn required_int(body: &Body, field: &str) -> Result<i32, ApiError> {
    optional_int(body, field)?.ok_or_else(|| ApiError::missing_field(field))
}

/// Text field, stored exactly as sent; numbers are accepted and rendered as
/// text
pub fn optional_text(body: &Body, field: &str) -> Result<Option<String>, ApiError> {
    match provided(body, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(ApiError::bad_request(format!("Invalid value for {}: expected text", field))),
    }
}

pub fn optional_int(body: &Body, field: &str) -> Result<Option<i32>, ApiError> {
    let invalid = || ApiError::bad_request(format!("Invalid value for {}: expected an integer", field));

    match provided(body, field) {
        None => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i).map(Some).map_err(|_| invalid());
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
                    Ok(Some(f as i32))
                }
                _ => Err(invalid()),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i32>().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

pub fn optional_float(body: &Body, field: &str) -> Result<Option<f64>, ApiError> {
    let invalid = || ApiError::bad_request(format!("Invalid value for {}: expected a number", field));

    match provided(body, field) {
        None => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Some(f)),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

/// Boolean flag; absent means false
pub fn flag(body: &Body, field: &str) -> Result<bool, ApiError> {
    let invalid = || ApiError::bad_request(format!("Invalid value for {}: expected a boolean", field));

    match provided(body, field) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(invalid()),
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(invalid()),
        },
        Some(_) => Err(invalid()),
    }
}

/// Text or a list of texts; lists are stored comma-joined
pub fn text_list(body: &Body, field: &str) -> Result<Option<String>, ApiError> {
    match provided(body, field) {
        Some(Value::Array(items)) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) if !s.trim().is_empty() => parts.push(s.clone()),
                    Value::String(_) => {}
                    _ => {
                        return Err(ApiError::bad_request(format!(
                            "Invalid value for {}: expected a list of text",
                            field
                        )))
                    }
                }
            }
            Ok(if parts.is_empty() { None } else { Some(parts.join(",")) })
        }
        _ => optional_text(body, field),
    }
}
