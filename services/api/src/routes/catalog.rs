//! Public catalog routes

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::error;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// List all products
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state.product_repository.list().await.map_err(|e| {
        error!("Failed to list products: {}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(products))
}

/// Get a single product by id. A malformed id is a 400, a missing one a 404.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: Uuid = id.parse().map_err(|_| ApiError::Validation {
        message: "Invalid product id".to_string(),
        errors: vec![],
    })?;

    let product = state
        .product_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to load product: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}
