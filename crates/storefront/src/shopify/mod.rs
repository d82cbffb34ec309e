//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Operation documents are plain GraphQL strings (see `storefront::queries`)
//! - Shopify is source of truth - NO local sync, direct API calls
//! - Read queries may be served from an injected [`ResponseCache`]; mutations
//!   never touch it
//! - Raw responses are reshaped into the wire types of `storefront-api-core`
//!   by the pure functions in [`conversions`]
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::shopify::{ResponseCache, StorefrontClient};
//!
//! let cache = ResponseCache::new(&config.shopify);
//! let client = StorefrontClient::new(&config.shopify, cache)?;
//!
//! let product = client.get_product_by_handle("dried-pineapple").await?;
//! ```

mod storefront;
pub mod types;

pub use storefront::{
    ExecuteOptions, Operation, OperationKind, ResponseCache, RetryPolicy, StorefrontClient,
    cache_key, conversions, queries,
};
pub use types::*;

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when interacting with the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Required connection settings are missing.
    #[error("Storefront API is not configured: {0}")]
    Configuration(String),

    /// The HTTP request could not be completed (connect, timeout, TLS, body).
    #[error("Storefront API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Shopify answered with a non-success HTTP status.
    #[error("Storefront API request failed: HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
        /// Wait requested by a `Retry-After` header, if any.
        retry_after: Option<Duration>,
    },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// The response carried neither errors nor data.
    #[error("No data returned from Storefront API")]
    EmptyResponse,

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ShopifyError {
    /// Whether the failure happened on the wire rather than in GraphQL.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// Whether another attempt could succeed.
    ///
    /// Only transport failures, rate limiting and 5xx statuses qualify.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Wait the upstream asked for before the next attempt.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        Self {
            message: e.message,
            locations: e.locations.map_or_else(Vec::new, |locs| {
                locs.into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: i64::from(l.line),
                        column: i64::from(l.column),
                    })
                    .collect()
            }),
            path: e.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                        graphql_client::PathFragment::Index(i) => {
                            serde_json::Value::Number(i.into())
                        }
                    })
                    .collect()
            }),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_graphql_error_empty_messages() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("products".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: products.0 at line 5:10"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![],
            path: vec![],
        }];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");
    }

    #[test]
    fn test_status_error_is_network_and_retryable() {
        let err = ShopifyError::Status {
            status: 503,
            body: "Service Unavailable".to_string(),
            retry_after: None,
        };
        assert!(err.is_network());
        assert!(err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Storefront API request failed: HTTP 503: Service Unavailable"
        );
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = ShopifyError::Status {
            status: 401,
            body: "Unauthorized".to_string(),
            retry_after: None,
        };
        assert!(err.is_network());
        assert!(!err.is_retryable());

        assert!(!ShopifyError::GraphQL(vec![]).is_retryable());
        assert!(!ShopifyError::EmptyResponse.is_network());
        assert!(!ShopifyError::Configuration("missing".to_string()).is_retryable());
    }

    #[test]
    fn test_retry_after_only_on_status() {
        let err = ShopifyError::Status {
            status: 429,
            body: String::new(),
            retry_after: Some(Duration::from_secs(1)),
        };
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(1)));
        assert_eq!(ShopifyError::EmptyResponse.retry_after(), None);
    }
}
