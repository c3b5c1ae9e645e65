// HTTP request handlers
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use products_shared::{ListQuery, NewProduct, Product, ProductPatch, SearchQuery};
use serde::Serialize;
use tracing::debug;

use crate::server::errors::ApiError;
use crate::server::state::AppState;

pub const SERVICE_NAME: &str = "products-api";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Engine connectivity, under the key existing health consumers read.
    #[serde(rename = "elasticsearch")]
    pub search_engine: &'static str,
}

/// Health check endpoint. Always 200; engine connectivity is reported in the body.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let engine = state.catalog.engine_status().await;

    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        search_engine: engine.as_str(),
    })
}

/// `GET /products?skip&limit&category`
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query?;
    let products = state.catalog.list(&query).await?;

    debug!(skip = query.skip, limit = query.limit, count = products.len(), "Listed products");
    Ok(Json(products))
}

/// `GET /products/search?q&limit`
pub async fn search_products(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query?;
    let products = state.catalog.search(&query).await?;

    debug!(query = %query.query, count = products.len(), "Searched products");
    Ok(Json(products))
}

/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    let product = state.catalog.get(&id).await?;
    Ok(Json(product))
}

/// `POST /products`
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(new_product) = payload?;
    let product = state.catalog.create(new_product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/{id}`
///
/// The service checks that the product exists before applying the patch.
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let product = state.catalog.update(&id, patch).await?;
    Ok(Json(product))
}

/// `DELETE /products/{id}`
///
/// Deleting is idempotent in the catalog, so existence is checked here to
/// answer 404 for unknown ids.
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !state.catalog.exists(&id).await? {
        return Err(ApiError::NotFound);
    }
    state.catalog.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
