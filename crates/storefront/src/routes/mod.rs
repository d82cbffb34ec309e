//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Health check
//!
//! # Products
//! GET    /api/products                        - Product listing
//! GET    /api/products/{handle}               - Product detail
//! GET    /api/collections/{handle}/products   - Products in a collection
//!
//! # Cart
//! POST   /api/cart                            - Create cart
//! GET    /api/cart/{cartId}                   - Get cart
//! POST   /api/cart/{cartId}/lines             - Add lines
//! PATCH  /api/cart/{cartId}/lines             - Update line quantities
//! DELETE /api/cart/{cartId}/lines             - Remove lines
//! POST   /api/cart/{cartId}/checkout          - Checkout hand-off URL
//! ```
//!
//! Every handler validates its input, calls the Storefront API at most once,
//! reshapes the response and renders failures through
//! [`crate::error::with_error_handling`]. Extractor rejections are taken as
//! `Result`s so they reach the same error envelope.

pub mod cart;
pub mod products;

use axum::{
    Router,
    body::Bytes,
    extract::{
        Path,
        rejection::{BytesRejection, PathRejection},
    },
    http::StatusCode,
    routing::{get, post},
};

use crate::error::{AppError, Result, method_not_allowed, route_not_found};
use crate::state::AppState;
use crate::validation::{RouteParams, ValidationError};

/// Extracted path parameters or the reason they could not be decoded.
pub type PathParams = std::result::Result<Path<RouteParams>, PathRejection>;

/// Buffered request body or the reason it could not be read.
pub type RequestBody = std::result::Result<Bytes, BytesRejection>;

/// Unwrap path parameters, reporting a decoding failure against `key`.
pub(crate) fn path_params(params: PathParams, key: &str) -> Result<RouteParams> {
    params
        .map(|Path(params)| params)
        .map_err(|rejection| ValidationError::field(key, rejection.body_text()).into())
}

/// Unwrap a buffered body; an oversized body becomes `PAYLOAD_TOO_LARGE`.
pub(crate) fn request_body(body: RequestBody) -> Result<Bytes> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            ValidationError::whole(rejection.body_text()).into()
        }
    })
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new().route("/{handle}/products", get(products::collection_products))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::create))
        .route("/{cartId}", get(cart::show))
        .route(
            "/{cartId}/lines",
            post(cart::add_lines)
                .patch(cart::update_lines)
                .delete(cart::remove_lines),
        )
        .route("/{cartId}/checkout", post(cart::checkout))
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/products", product_routes())
        .nest("/api/collections", collection_routes())
        .nest("/api/cart", cart_routes())
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Liveness check; never touches upstream.
async fn health() -> &'static str {
    "ok"
}
