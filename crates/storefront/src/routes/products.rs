//! Product and collection route handlers.

use axum::{
    Json,
    extract::{RawQuery, State},
    response::Response,
};
use storefront_api_core::{ProductDetailResponse, ProductListResponse};
use tracing::instrument;

use super::{PathParams, path_params};
use crate::error::{AppError, Result, with_error_handling};
use crate::shopify::conversions::{
    convert_collection_products, convert_product_detail, convert_product_list,
};
use crate::state::AppState;
use crate::validation::{
    CollectionHandle, PageQuery, ProductHandle, ProductListQuery, parse_query_string,
    validate_query, validate_route_param,
};

/// `GET /api/products`
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    with_error_handling(&state, list_products(&state, query.as_deref())).await
}

async fn list_products(state: &AppState, raw_query: Option<&str>) -> Result<Json<ProductListResponse>> {
    let query: ProductListQuery = validate_query(&parse_query_string(raw_query))?;

    let connection = state
        .storefront()
        .get_products(
            query.limit,
            query.cursor.as_ref(),
            query.search.as_deref(),
            query.sort_key,
            query.reverse,
        )
        .await?;

    Ok(Json(convert_product_list(connection)))
}

/// `GET /api/products/{handle}`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, params: PathParams) -> Response {
    with_error_handling(&state, product_detail(&state, params)).await
}

async fn product_detail(state: &AppState, params: PathParams) -> Result<Json<ProductDetailResponse>> {
    let params = path_params(params, "handle")?;
    let ProductHandle { handle } = validate_route_param::<ProductHandle>(&params)?;

    let product = state
        .storefront()
        .get_product_by_handle(&handle)
        .await?
        .ok_or(AppError::ProductNotFound(handle))?;

    Ok(Json(convert_product_detail(product)))
}

/// `GET /api/collections/{handle}/products`
#[instrument(skip(state))]
pub async fn collection_products(
    State(state): State<AppState>,
    params: PathParams,
    RawQuery(query): RawQuery,
) -> Response {
    with_error_handling(
        &state,
        list_collection_products(&state, params, query.as_deref()),
    )
    .await
}

async fn list_collection_products(
    state: &AppState,
    params: PathParams,
    raw_query: Option<&str>,
) -> Result<Json<ProductListResponse>> {
    let params = path_params(params, "handle")?;
    let CollectionHandle { handle } = validate_route_param::<CollectionHandle>(&params)?;
    let page: PageQuery = validate_query(&parse_query_string(raw_query))?;

    let collection = state
        .storefront()
        .get_collection_products(&handle, page.limit, page.cursor.as_ref())
        .await?
        .ok_or(AppError::CollectionNotFound(handle))?;

    Ok(Json(convert_collection_products(collection)))
}
