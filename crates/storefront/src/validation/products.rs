//! Product listing query and path parameter shapes.

use storefront_api_core::Cursor;

use super::{FieldErrors, QueryParams, QueryShape, RouteParamShape, RouteParams};
use crate::shopify::ProductSortKey;

/// Page size used when `limit` is absent.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page clients may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// `GET /api/products` query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListQuery {
    /// Cursor from a previous page, passed upstream verbatim.
    pub cursor: Option<Cursor>,
    /// Page size in `1..=100`.
    pub limit: i64,
    /// Upstream product search syntax.
    pub search: Option<String>,
    pub sort_key: Option<ProductSortKey>,
    pub reverse: bool,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            cursor: None,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            sort_key: None,
            reverse: false,
        }
    }
}

fn non_blank(params: &QueryParams, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Parse `limit`, pushing an error and falling back to the default.
pub(super) fn parse_limit(params: &QueryParams, errors: &mut FieldErrors) -> i64 {
    let Some(raw) = params.get("limit").filter(|v| !v.is_empty()) else {
        return DEFAULT_PAGE_SIZE;
    };
    match raw.trim().parse::<i64>() {
        Ok(limit) if limit < 1 => {
            errors.push("limit", "Number must be greater than or equal to 1");
            DEFAULT_PAGE_SIZE
        }
        Ok(limit) if limit > MAX_PAGE_SIZE => {
            errors.push("limit", "Number must be less than or equal to 100");
            DEFAULT_PAGE_SIZE
        }
        Ok(limit) => limit,
        Err(_) => {
            errors.push("limit", format!("Expected integer, received \"{raw}\""));
            DEFAULT_PAGE_SIZE
        }
    }
}

impl QueryShape for ProductListQuery {
    fn from_query(params: &QueryParams, errors: &mut FieldErrors) -> Self {
        let limit = parse_limit(params, errors);

        let sort_key = params.get("sortKey").and_then(|raw| {
            let key = ProductSortKey::from_graphql(raw);
            if key.is_none() {
                let allowed = ProductSortKey::ALL
                    .iter()
                    .map(|k| format!("'{}'", k.as_str()))
                    .collect::<Vec<_>>()
                    .join(" | ");
                errors.push(
                    "sortKey",
                    format!("Invalid enum value. Expected {allowed}, received '{raw}'"),
                );
            }
            key
        });

        Self {
            cursor: non_blank(params, "cursor").map(Cursor::from),
            limit,
            search: non_blank(params, "search"),
            sort_key,
            reverse: params.get("reverse").is_some_and(|v| v == "true"),
        }
    }
}

/// `limit`/`cursor` pair for collection product pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub cursor: Option<Cursor>,
    pub limit: i64,
}

impl QueryShape for PageQuery {
    fn from_query(params: &QueryParams, errors: &mut FieldErrors) -> Self {
        Self {
            cursor: non_blank(params, "cursor").map(Cursor::from),
            limit: parse_limit(params, errors),
        }
    }
}

fn required_param(
    params: &RouteParams,
    key: &str,
    errors: &mut FieldErrors,
    message: &str,
) -> String {
    match params.get(key) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => {
            errors.push(key, message);
            String::new()
        }
    }
}

/// `{handle}` of a product route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductHandle {
    pub handle: String,
}

impl RouteParamShape for ProductHandle {
    fn from_params(params: &RouteParams, errors: &mut FieldErrors) -> Self {
        Self {
            handle: required_param(params, "handle", errors, "Product handle is required"),
        }
    }
}

/// `{handle}` of a collection route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    pub handle: String,
}

impl RouteParamShape for CollectionHandle {
    fn from_params(params: &RouteParams, errors: &mut FieldErrors) -> Self {
        Self {
            handle: required_param(params, "handle", errors, "Collection handle is required"),
        }
    }
}

/// `{cartId}` of a cart route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartId {
    pub cart_id: String,
}

impl RouteParamShape for CartId {
    fn from_params(params: &RouteParams, errors: &mut FieldErrors) -> Self {
        Self {
            cart_id: required_param(params, "cartId", errors, "Cart ID is required"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::validation::{parse_query_string, validate_query, validate_route_param};

    fn list(query: &str) -> Result<ProductListQuery, crate::validation::ValidationError> {
        validate_query(&parse_query_string(Some(query)))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(list("").unwrap(), ProductListQuery::default());
        assert_eq!(list("limit=").unwrap().limit, 20);
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(list("limit=1").unwrap().limit, 1);
        assert_eq!(list("limit=100").unwrap().limit, 100);

        let err = list("limit=0").unwrap_err();
        assert_eq!(err.errors[0].path, "limit");
        assert!(list("limit=101").is_err());
        assert!(list("limit=-5").is_err());
    }

    #[test]
    fn test_non_integer_limit() {
        let err = list("limit=ten").unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].path, "limit");
        assert!(list("limit=2.5").is_err());
    }

    #[test]
    fn test_reverse_only_true_string() {
        assert!(list("reverse=true").unwrap().reverse);
        assert!(!list("reverse=1").unwrap().reverse);
        assert!(!list("reverse=TRUE").unwrap().reverse);
    }

    #[test]
    fn test_sort_key_membership() {
        assert_eq!(
            list("sortKey=BEST_SELLING").unwrap().sort_key,
            Some(ProductSortKey::BestSelling)
        );
        let err = list("sortKey=RANDOM").unwrap_err();
        assert_eq!(err.errors[0].path, "sortKey");
        assert!(err.errors[0].message.contains("'RANDOM'"));
    }

    #[test]
    fn test_all_errors_are_reported() {
        let err = list("limit=500&sortKey=nope").unwrap_err();
        let paths: Vec<_> = err.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["limit", "sortKey"]);
    }

    #[test]
    fn test_cursor_and_search_pass_through() {
        let query = list("cursor=eyJsYXN0IjoxfQ%3D%3D&search=title%3Apineapple").unwrap();
        assert_eq!(query.cursor.unwrap().as_str(), "eyJsYXN0IjoxfQ==");
        assert_eq!(query.search.as_deref(), Some("title:pineapple"));
    }

    #[test]
    fn test_route_params() {
        let mut params = RouteParams::new();
        params.insert("handle".to_string(), "dried-pineapple".to_string());
        let handle: ProductHandle = validate_route_param(&params).unwrap();
        assert_eq!(handle.handle, "dried-pineapple");

        params.insert("handle".to_string(), String::new());
        let err = validate_route_param::<ProductHandle>(&params).unwrap_err();
        assert_eq!(err.errors[0].message, "Product handle is required");

        let err = validate_route_param::<CartId>(&RouteParams::new()).unwrap_err();
        assert_eq!(err.errors[0].path, "cartId");
    }
}
