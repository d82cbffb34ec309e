//! Cart route handlers.
//!
//! Cart IDs are issued by Shopify and passed through verbatim; no cart state
//! is kept locally. Mutation responses carry either the updated cart or the
//! user errors Shopify reported.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storefront_api_core::{CartResponse, CheckoutResponse};
use tracing::instrument;

use super::{PathParams, RequestBody, path_params, request_body};
use crate::error::{AppError, CartMutation, Result, with_error_handling};
use crate::shopify::CartMutationPayload;
use crate::shopify::conversions::convert_cart;
use crate::state::AppState;
use crate::validation::{
    CartCreateBody, CartId, CartLinesAddBody, CartLinesRemoveBody, CartLinesUpdateBody,
    validate_body, validate_route_param,
};

/// Turn a mutation payload into a cart, surfacing user errors first.
fn mutation_result(payload: CartMutationPayload, mutation: CartMutation) -> Result<CartResponse> {
    if !payload.user_errors.is_empty() {
        return Err(AppError::CartUserErrors(payload.user_errors));
    }
    payload
        .cart
        .map(convert_cart)
        .ok_or(AppError::CartMutationFailed(mutation))
}

// =============================================================================
// Create / read
// =============================================================================

/// `POST /api/cart`
#[instrument(skip(state, body))]
pub async fn create(State(state): State<AppState>, body: RequestBody) -> Response {
    with_error_handling(&state, create_cart(&state, body)).await
}

async fn create_cart(state: &AppState, body: RequestBody) -> Result<impl IntoResponse> {
    let body = request_body(body)?;

    // An absent body creates an empty cart; a present one must be valid.
    let CartCreateBody { lines } = if body.trim_ascii().is_empty() {
        CartCreateBody::default()
    } else {
        validate_body::<CartCreateBody>(&body)?
    };

    let payload = state.storefront().create_cart(&lines).await?;
    let cart = mutation_result(payload, CartMutation::Create)?;

    Ok((StatusCode::CREATED, Json(cart)))
}

/// `GET /api/cart/{cartId}`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, params: PathParams) -> Response {
    with_error_handling(&state, get_cart(&state, params)).await
}

async fn get_cart(state: &AppState, params: PathParams) -> Result<Json<CartResponse>> {
    let params = path_params(params, "cartId")?;
    let CartId { cart_id } = validate_route_param::<CartId>(&params)?;

    let cart = state
        .storefront()
        .get_cart(&cart_id)
        .await?
        .ok_or(AppError::CartNotFound(cart_id))?;

    Ok(Json(convert_cart(cart)))
}

// =============================================================================
// Lines
// =============================================================================

/// `POST /api/cart/{cartId}/lines`
#[instrument(skip(state, body))]
pub async fn add_lines(
    State(state): State<AppState>,
    params: PathParams,
    body: RequestBody,
) -> Response {
    with_error_handling(&state, add_cart_lines(&state, params, body)).await
}

async fn add_cart_lines(
    state: &AppState,
    params: PathParams,
    body: RequestBody,
) -> Result<Json<CartResponse>> {
    let params = path_params(params, "cartId")?;
    let CartId { cart_id } = validate_route_param::<CartId>(&params)?;
    let body = request_body(body)?;
    let CartLinesAddBody { lines } = validate_body::<CartLinesAddBody>(&body)?;

    let payload = state.storefront().add_cart_lines(&cart_id, &lines).await?;
    Ok(Json(mutation_result(payload, CartMutation::LinesAdd)?))
}

/// `PATCH /api/cart/{cartId}/lines`
#[instrument(skip(state, body))]
pub async fn update_lines(
    State(state): State<AppState>,
    params: PathParams,
    body: RequestBody,
) -> Response {
    with_error_handling(&state, update_cart_lines(&state, params, body)).await
}

async fn update_cart_lines(
    state: &AppState,
    params: PathParams,
    body: RequestBody,
) -> Result<Json<CartResponse>> {
    let params = path_params(params, "cartId")?;
    let CartId { cart_id } = validate_route_param::<CartId>(&params)?;
    let body = request_body(body)?;
    let CartLinesUpdateBody { lines } = validate_body::<CartLinesUpdateBody>(&body)?;

    let payload = state
        .storefront()
        .update_cart_lines(&cart_id, &lines)
        .await?;
    Ok(Json(mutation_result(payload, CartMutation::LinesUpdate)?))
}

/// `DELETE /api/cart/{cartId}/lines`
#[instrument(skip(state, body))]
pub async fn remove_lines(
    State(state): State<AppState>,
    params: PathParams,
    body: RequestBody,
) -> Response {
    with_error_handling(&state, remove_cart_lines(&state, params, body)).await
}

async fn remove_cart_lines(
    state: &AppState,
    params: PathParams,
    body: RequestBody,
) -> Result<Json<CartResponse>> {
    let params = path_params(params, "cartId")?;
    let CartId { cart_id } = validate_route_param::<CartId>(&params)?;
    let body = request_body(body)?;
    let CartLinesRemoveBody { line_ids } = validate_body::<CartLinesRemoveBody>(&body)?;

    let payload = state
        .storefront()
        .remove_cart_lines(&cart_id, &line_ids)
        .await?;
    Ok(Json(mutation_result(payload, CartMutation::LinesRemove)?))
}

// =============================================================================
// Checkout
// =============================================================================

/// `POST /api/cart/{cartId}/checkout`
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>, params: PathParams) -> Response {
    with_error_handling(&state, checkout_url(&state, params)).await
}

async fn checkout_url(state: &AppState, params: PathParams) -> Result<Json<CheckoutResponse>> {
    let params = path_params(params, "cartId")?;
    let CartId { cart_id } = validate_route_param::<CartId>(&params)?;

    let cart = state
        .storefront()
        .get_cart(&cart_id)
        .await?
        .ok_or(AppError::CartNotFound(cart_id))?;

    Ok(Json(CheckoutResponse {
        checkout_url: cart.checkout_url,
    }))
}
