//! Request validation.
//!
//! Every handler input passes through one of [`validate_query`],
//! [`validate_body`] or [`validate_route_param`] before any upstream call.
//! Validation collects every offending field rather than stopping at the
//! first, and reports each as a dotted path (`lines.0.quantity`) plus a
//! message.

mod cart;
mod products;

pub use cart::{CartCreateBody, CartLinesAddBody, CartLinesRemoveBody, CartLinesUpdateBody};
pub use products::{
    CartId, CollectionHandle, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageQuery, ProductHandle,
    ProductListQuery,
};

use std::collections::HashMap;
use std::fmt::Display;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Decoded query string; a repeated key keeps its last value.
pub type QueryParams = HashMap<String, String>;

/// Decoded path parameters.
pub type RouteParams = HashMap<String, String>;

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the field; empty for the input as a whole.
    pub path: String,
    pub message: String,
}

/// Input rejected before reaching upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed")]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// A failure concerning the input as a whole.
    #[must_use]
    pub fn whole(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                path: String::new(),
                message: message.into(),
            }],
        }
    }

    /// A failure concerning a single field.
    #[must_use]
    pub fn field(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                path: path.into(),
                message: message.into(),
            }],
        }
    }
}

/// A query-string shape.
pub trait QueryShape: Sized {
    fn from_query(params: &QueryParams, errors: &mut FieldErrors) -> Self;
}

/// A JSON body shape.
pub trait BodyShape: Sized {
    fn from_body(body: &Value, errors: &mut FieldErrors) -> Self;
}

/// A path parameter shape.
pub trait RouteParamShape: Sized {
    fn from_params(params: &RouteParams, errors: &mut FieldErrors) -> Self;
}

/// Validate a decoded query string.
///
/// # Errors
///
/// Returns every field that fails the shape.
pub fn validate_query<T: QueryShape>(params: &QueryParams) -> Result<T, ValidationError> {
    let mut errors = FieldErrors::default();
    let value = T::from_query(params, &mut errors);
    errors.into_result(value)
}

/// Decode a raw query string (without the leading `?`).
#[must_use]
pub fn parse_query_string(raw: Option<&str>) -> QueryParams {
    raw.map(|raw| {
        url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect()
    })
    .unwrap_or_default()
}

/// Validate a raw JSON body.
///
/// # Errors
///
/// Malformed JSON fails with a single error at path `""`; otherwise every
/// field that fails the shape is reported.
pub fn validate_body<T: BodyShape>(raw: &[u8]) -> Result<T, ValidationError> {
    let body: Value = serde_json::from_slice(raw)
        .map_err(|e| ValidationError::whole(format!("Invalid JSON body: {e}")))?;

    let mut errors = FieldErrors::default();
    let value = T::from_body(&body, &mut errors);
    errors.into_result(value)
}

/// Validate path parameters.
///
/// # Errors
///
/// Returns every parameter that fails the shape.
pub fn validate_route_param<T: RouteParamShape>(params: &RouteParams) -> Result<T, ValidationError> {
    let mut errors = FieldErrors::default();
    let value = T::from_params(params, &mut errors);
    errors.into_result(value)
}

// =============================================================================
// Field checks
// =============================================================================

/// Accumulates field errors while a shape is read.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Record an error at `path`.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }

    /// Expect a JSON object.
    pub fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        if let Value::Object(map) = value {
            Some(map)
        } else {
            self.push(path, expected("object", value));
            None
        }
    }

    /// Expect an array field; `None` and no error when it is absent.
    pub fn optional_array<'a>(
        &mut self,
        object: &'a Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<&'a [Value]> {
        match object.get(key) {
            None => None,
            Some(Value::Array(items)) => Some(items.as_slice()),
            Some(other) => {
                self.push(path, expected("array", other));
                None
            }
        }
    }

    /// Expect a non-empty array field.
    pub fn non_empty_array<'a>(
        &mut self,
        object: &'a Map<String, Value>,
        key: &str,
        path: &str,
        empty_message: &str,
    ) -> Option<&'a [Value]> {
        if !object.contains_key(key) {
            self.push(path, "Required");
            return None;
        }
        let items = self.optional_array(object, key, path)?;
        if items.is_empty() {
            self.push(path, empty_message);
            return None;
        }
        Some(items)
    }

    /// Expect a non-empty string.
    pub fn non_empty_string(
        &mut self,
        value: Option<&Value>,
        path: &str,
        empty_message: &str,
    ) -> Option<String> {
        match value {
            None => {
                self.push(path, "Required");
                None
            }
            Some(Value::String(s)) if s.is_empty() => {
                self.push(path, empty_message);
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.push(path, expected("string", other));
                None
            }
        }
    }

    /// Expect an integer no smaller than `min`.
    pub fn integer_at_least(
        &mut self,
        value: Option<&Value>,
        path: &str,
        min: i64,
        below_message: &str,
    ) -> Option<i64> {
        let number = match value {
            None => {
                self.push(path, "Required");
                return None;
            }
            Some(Value::Number(n)) => n,
            Some(other) => {
                self.push(path, expected("number", other));
                return None;
            }
        };

        let Some(int) = as_integer(number) else {
            self.push(path, "Expected integer, received float");
            return None;
        };
        if int < min {
            self.push(path, below_message);
            return None;
        }
        Some(int)
    }
}

/// Integral JSON number, accepting `2.0` as `2`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn as_integer(number: &serde_json::Number) -> Option<i64> {
    if let Some(int) = number.as_i64() {
        return Some(int);
    }
    let float = number.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float <= i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}

/// Join a parent path and a key or index.
pub(crate) fn join(parent: &str, key: impl Display) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn expected(kind: &str, received: &Value) -> String {
    let received = match received {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("Expected {kind}, received {received}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_paths() {
        assert_eq!(join("", "lines"), "lines");
        assert_eq!(join("lines", 0), "lines.0");
        assert_eq!(join("lines.0", "quantity"), "lines.0.quantity");
    }

    #[test]
    fn test_parse_query_string_decodes_and_keeps_last() {
        let params = parse_query_string(Some("search=dried%20fruit&limit=5&limit=7"));
        assert_eq!(params.get("search").unwrap(), "dried fruit");
        assert_eq!(params.get("limit").unwrap(), "7");
        assert!(parse_query_string(None).is_empty());
    }

    #[test]
    fn test_integer_checks() {
        let mut errors = FieldErrors::default();
        assert_eq!(
            errors.integer_at_least(Some(&json!(2.0)), "q", 1, "low"),
            Some(2)
        );
        assert_eq!(errors.integer_at_least(Some(&json!(1.5)), "q", 1, "low"), None);
        assert_eq!(errors.integer_at_least(Some(&json!("3")), "q", 1, "low"), None);
        assert_eq!(errors.integer_at_least(Some(&json!(0)), "q", 1, "low"), None);
        assert_eq!(errors.integer_at_least(None, "q", 1, "low"), None);

        let messages: Vec<_> = errors.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "Expected integer, received float",
                "Expected number, received string",
                "low",
                "Required"
            ]
        );
    }

    #[test]
    fn test_string_checks() {
        let mut errors = FieldErrors::default();
        assert_eq!(
            errors.non_empty_string(Some(&json!("x")), "id", "empty"),
            Some("x".to_string())
        );
        assert_eq!(errors.non_empty_string(Some(&json!("")), "id", "empty"), None);
        assert_eq!(errors.non_empty_string(Some(&json!(5)), "id", "empty"), None);
        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.errors[0].message, "empty");
    }
}
