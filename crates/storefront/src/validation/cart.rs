//! Cart request bodies.

use serde_json::Value;

use super::{BodyShape, FieldErrors, join};
use crate::shopify::{CartLineInput, CartLineUpdateInput};

fn line_input(item: &Value, path: &str, errors: &mut FieldErrors) -> Option<CartLineInput> {
    let object = errors.object(item, path)?;
    let merchandise_id = errors.non_empty_string(
        object.get("merchandiseId"),
        &join(path, "merchandiseId"),
        "Merchandise ID is required",
    );
    let quantity = errors.integer_at_least(
        object.get("quantity"),
        &join(path, "quantity"),
        1,
        "Quantity must be at least 1",
    );
    Some(CartLineInput {
        merchandise_id: merchandise_id?,
        quantity: quantity?,
    })
}

fn line_inputs(items: &[Value], errors: &mut FieldErrors) -> Vec<CartLineInput> {
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| line_input(item, &join("lines", i), errors))
        .collect()
}

/// `POST /api/cart` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartCreateBody {
    /// Initial lines; empty creates an empty cart.
    pub lines: Vec<CartLineInput>,
}

impl BodyShape for CartCreateBody {
    fn from_body(body: &Value, errors: &mut FieldErrors) -> Self {
        let Some(object) = errors.object(body, "") else {
            return Self::default();
        };
        let lines = errors
            .optional_array(object, "lines", "lines")
            .map(|items| line_inputs(items, errors))
            .unwrap_or_default();
        Self { lines }
    }
}

/// `POST /api/cart/{cartId}/lines` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLinesAddBody {
    pub lines: Vec<CartLineInput>,
}

impl BodyShape for CartLinesAddBody {
    fn from_body(body: &Value, errors: &mut FieldErrors) -> Self {
        let lines = errors
            .object(body, "")
            .and_then(|object| {
                errors.non_empty_array(
                    object,
                    "lines",
                    "lines",
                    "At least one line item is required",
                )
            })
            .map(|items| line_inputs(items, errors))
            .unwrap_or_default();
        Self { lines }
    }
}

/// `PATCH /api/cart/{cartId}/lines` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLinesUpdateBody {
    pub lines: Vec<CartLineUpdateInput>,
}

fn line_update(item: &Value, path: &str, errors: &mut FieldErrors) -> Option<CartLineUpdateInput> {
    let object = errors.object(item, path)?;
    let id = errors.non_empty_string(
        object.get("lineId"),
        &join(path, "lineId"),
        "Line ID is required",
    );
    let quantity = errors.integer_at_least(
        object.get("quantity"),
        &join(path, "quantity"),
        0,
        "Quantity must be 0 or greater",
    );
    Some(CartLineUpdateInput {
        id: id?,
        quantity: quantity?,
    })
}

impl BodyShape for CartLinesUpdateBody {
    fn from_body(body: &Value, errors: &mut FieldErrors) -> Self {
        let items = errors.object(body, "").and_then(|object| {
            errors.non_empty_array(
                object,
                "lines",
                "lines",
                "At least one line update is required",
            )
        });
        let lines = items
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| line_update(item, &join("lines", i), errors))
                    .collect()
            })
            .unwrap_or_default();
        Self { lines }
    }
}

/// `DELETE /api/cart/{cartId}/lines` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLinesRemoveBody {
    pub line_ids: Vec<String>,
}

impl BodyShape for CartLinesRemoveBody {
    fn from_body(body: &Value, errors: &mut FieldErrors) -> Self {
        let items = errors.object(body, "").and_then(|object| {
            errors.non_empty_array(
                object,
                "lineIds",
                "lineIds",
                "At least one line ID is required",
            )
        });
        let line_ids = items
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| {
                        errors.non_empty_string(
                            Some(item),
                            &join("lineIds", i),
                            "Line ID is required",
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { line_ids }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::validation::{ValidationError, validate_body};

    fn paths(err: &ValidationError) -> Vec<&str> {
        err.errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_create_accepts_missing_lines() {
        let body: CartCreateBody = validate_body(b"{}").unwrap();
        assert!(body.lines.is_empty());
    }

    #[test]
    fn test_create_validates_present_lines() {
        let body: CartCreateBody = validate_body(
            br#"{"lines":[{"merchandiseId":"gid://shopify/ProductVariant/1","quantity":2}]}"#,
        )
        .unwrap();
        assert_eq!(body.lines[0].quantity, 2);

        let err = validate_body::<CartCreateBody>(br#"{"lines":[{"merchandiseId":"v","quantity":0}]}"#)
            .unwrap_err();
        assert_eq!(paths(&err), ["lines.0.quantity"]);
    }

    #[test]
    fn test_malformed_json_has_empty_path() {
        let err = validate_body::<CartLinesAddBody>(b"{not json").unwrap_err();
        assert_eq!(paths(&err), [""]);
        assert!(err.errors[0].message.starts_with("Invalid JSON body"));
    }

    #[test]
    fn test_non_object_body() {
        let err = validate_body::<CartLinesAddBody>(b"[1,2]").unwrap_err();
        assert_eq!(paths(&err), [""]);
        assert_eq!(err.errors[0].message, "Expected object, received array");
    }

    #[test]
    fn test_add_requires_lines() {
        let err = validate_body::<CartLinesAddBody>(br#"{"lines":[]}"#).unwrap_err();
        assert_eq!(err.errors[0].message, "At least one line item is required");

        let err = validate_body::<CartLinesAddBody>(b"{}").unwrap_err();
        assert_eq!(err.errors[0].message, "Required");
    }

    #[test]
    fn test_add_collects_every_line_error() {
        let err = validate_body::<CartLinesAddBody>(
            br#"{"lines":[{"merchandiseId":"","quantity":1},{"merchandiseId":"v","quantity":1.5},"x"]}"#,
        )
        .unwrap_err();
        assert_eq!(
            paths(&err),
            ["lines.0.merchandiseId", "lines.1.quantity", "lines.2"]
        );
    }

    #[test]
    fn test_update_allows_zero_quantity() {
        let body: CartLinesUpdateBody =
            validate_body(br#"{"lines":[{"lineId":"gid://shopify/CartLine/1","quantity":0}]}"#)
                .unwrap();
        assert_eq!(body.lines[0].id, "gid://shopify/CartLine/1");
        assert_eq!(body.lines[0].quantity, 0);

        let err =
            validate_body::<CartLinesUpdateBody>(br#"{"lines":[{"lineId":"l","quantity":-1}]}"#)
                .unwrap_err();
        assert_eq!(err.errors[0].message, "Quantity must be 0 or greater");
    }

    #[test]
    fn test_remove_requires_non_empty_ids() {
        let body: CartLinesRemoveBody = validate_body(br#"{"lineIds":["a","b"]}"#).unwrap();
        assert_eq!(body.line_ids, ["a", "b"]);

        let err = validate_body::<CartLinesRemoveBody>(br#"{"lineIds":["a",""]}"#).unwrap_err();
        assert_eq!(paths(&err), ["lineIds.1"]);

        let err = validate_body::<CartLinesRemoveBody>(br#"{"lineIds":[]}"#).unwrap_err();
        assert_eq!(err.errors[0].message, "At least one line ID is required");
    }
}
