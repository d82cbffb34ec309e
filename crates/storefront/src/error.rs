//! Unified error handling with Sentry integration.
//!
//! Every failure a handler can produce becomes an [`AppError`], rendered as
//!
//! ```json
//! {"error": {"message": "...", "code": "...", "details": ...}}
//! ```
//!
//! with a status and machine-readable code. Server errors are captured to
//! Sentry before responding. Internal messages are only echoed back (as
//! `details.originalMessage`) in development.

use std::any::Any;
use std::future::Future;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::config::Environment;
use crate::shopify::{CartUserError, ShopifyError};
use crate::state::AppState;
use crate::validation::ValidationError;

/// Cart mutations that can come back without a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutation {
    Create,
    LinesAdd,
    LinesUpdate,
    LinesRemove,
}

impl CartMutation {
    const fn code(self) -> &'static str {
        match self {
            Self::Create => "CART_CREATE_FAILED",
            Self::LinesAdd => "CART_LINES_ADD_FAILED",
            Self::LinesUpdate => "CART_LINES_UPDATE_FAILED",
            Self::LinesRemove => "CART_LINES_REMOVE_FAILED",
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::Create => "Failed to create cart",
            Self::LinesAdd => "Failed to add lines to cart",
            Self::LinesUpdate => "Failed to update cart lines",
            Self::LinesRemove => "Failed to remove cart lines",
        }
    }
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Product with handle \"{0}\" not found")]
    ProductNotFound(String),

    #[error("Collection with handle \"{0}\" not found")]
    CollectionNotFound(String),

    #[error("Cart with ID \"{0}\" not found")]
    CartNotFound(String),

    /// Upstream rejected a cart mutation on business rules.
    #[error("Cart operation failed")]
    CartUserErrors(Vec<CartUserError>),

    /// A cart mutation returned neither a cart nor user errors.
    #[error("{}", .0.message())]
    CartMutationFailed(CartMutation),

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// No route matched the request.
    #[error("Route not found")]
    RouteNotFound,

    /// The path exists but not for this method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request body exceeded the size limit.
    #[error("Request body is too large")]
    PayloadTooLarge,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Body of the error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::CartUserErrors(_) => StatusCode::BAD_REQUEST,
            Self::ProductNotFound(_)
            | Self::CollectionNotFound(_)
            | Self::CartNotFound(_)
            | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Shopify(err) => match err {
                ShopifyError::GraphQL(_) | ShopifyError::Transport(_) | ShopifyError::Status { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::CartMutationFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::CollectionNotFound(_) => "COLLECTION_NOT_FOUND",
            Self::CartNotFound(_) => "CART_NOT_FOUND",
            Self::CartUserErrors(_) => "CART_ERROR",
            Self::CartMutationFailed(mutation) => mutation.code(),
            Self::Shopify(err) => match err {
                ShopifyError::Configuration(_) => "CONFIG_ERROR",
                ShopifyError::GraphQL(_) => "SHOPIFY_API_ERROR",
                ShopifyError::Transport(_) | ShopifyError::Status { .. } => "SHOPIFY_NETWORK_ERROR",
                ShopifyError::EmptyResponse | ShopifyError::Parse(_) => "INTERNAL_ERROR",
            },
            Self::RouteNotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn body(&self, environment: Environment) -> ErrorBody {
        let original = || {
            environment
                .exposes_internal_errors()
                .then(|| json!({ "originalMessage": self.to_string() }))
        };

        let (message, details) = match self {
            Self::Validation(err) => (
                "Validation failed".to_string(),
                Some(Value::Array(
                    err.errors
                        .iter()
                        .map(|e| json!({ "path": e.path, "message": e.message }))
                        .collect(),
                )),
            ),
            Self::CartUserErrors(errors) => (
                self.to_string(),
                Some(Value::Array(errors.iter().map(user_error_detail).collect())),
            ),
            Self::Shopify(ShopifyError::Configuration(_)) => {
                ("Server configuration error".to_string(), None)
            }
            Self::Shopify(ShopifyError::GraphQL(_)) => ("Shopify API error".to_string(), original()),
            Self::Shopify(ShopifyError::Transport(_) | ShopifyError::Status { .. }) => (
                "Failed to communicate with Shopify".to_string(),
                original(),
            ),
            Self::Shopify(_) | Self::Internal(_) => {
                ("An unexpected error occurred".to_string(), original())
            }
            Self::ProductNotFound(_)
            | Self::CollectionNotFound(_)
            | Self::CartNotFound(_)
            | Self::CartMutationFailed(_)
            | Self::RouteNotFound
            | Self::MethodNotAllowed
            | Self::PayloadTooLarge => (self.to_string(), None),
        };

        ErrorBody {
            message,
            code: Some(self.code()),
            details,
        }
    }

    /// Render with the disclosure policy of `environment`.
    #[must_use]
    pub fn into_response_with(self, environment: Environment) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                code = self.code(),
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        let envelope = ErrorEnvelope {
            error: self.body(environment),
        };
        (status, Json(envelope)).into_response()
    }
}

fn user_error_detail(error: &CartUserError) -> Value {
    let field = error
        .field
        .as_ref()
        .map(|parts| parts.join("."))
        .filter(|joined| !joined.is_empty());
    json!({
        "field": field,
        "message": error.message,
        "code": error.code,
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(Environment::Production)
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Run a handler body and render any failure with the configured
/// environment's disclosure policy.
pub async fn with_error_handling<T, F>(state: &AppState, handler: F) -> Response
where
    T: IntoResponse,
    F: Future<Output = Result<T>>,
{
    match handler.await {
        Ok(response) => response.into_response(),
        Err(err) => err.into_response_with(state.config().environment),
    }
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> Response {
    AppError::RouteNotFound.into_response()
}

/// Fallback for known paths requested with an unsupported method.
pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_response()
}

/// Panic handler for `CatchPanicLayer`: renders the panic as an
/// `INTERNAL_ERROR` envelope under `environment`'s disclosure policy.
pub fn panic_response(
    environment: Environment,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |panic| {
        let message = panic
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_string()))
            .unwrap_or_else(|| "handler panicked".to_string());
        AppError::Internal(message).into_response_with(environment)
    }
}
