//! Admin routes: product management, order workflow, user listing, uploads

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{NewProduct, OrderStatus, UpdateProduct, UpdateStatusBody},
    repositories::StatusUpdate,
    state::AppState,
    validation::FieldError,
};

/// List all products (admin view of the public catalog)
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = state.product_repository.list().await.map_err(|e| {
        error!("Failed to list products: {}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(products))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation(vec![FieldError::new(
            "name",
            "Name is required",
        )]));
    }

    let product = state
        .product_repository
        .create(&payload)
        .await
        .map_err(|e| {
            error!("Failed to create product: {}", e);
            ApiError::Internal(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Product added",
            "product": product,
        })),
    ))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProduct>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .product_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update product: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(json!({
        "message": "Product updated",
        "product": product,
    })))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.product_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete product: {}", e);
        ApiError::Internal(e)
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    Ok(Json(json!({ "message": "Product deleted" })))
}

/// Seed the default catalog (idempotent)
pub async fn seed_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let created = state.product_repository.seed_defaults().await.map_err(|e| {
        error!("Failed to seed products: {}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(json!({
        "message": "Seed completed",
        "created": created,
    })))
}

/// List all orders across all users, decorated with owner identity
pub async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let orders = state
        .order_repository
        .list_all_with_owner()
        .await
        .map_err(|e| {
            error!("Failed to list orders: {}", e);
            ApiError::Internal(e)
        })?;

    Ok(Json(orders))
}

/// Update an order's status; terminal orders reject any change
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(payload): Json<UpdateStatusBody>,
) -> Result<impl IntoResponse, ApiError> {
    let new_status: OrderStatus = payload.status.parse().map_err(|message: String| {
        ApiError::validation(vec![FieldError::new("status", &message)])
    })?;

    let outcome = state
        .order_repository
        .set_status(&order_id, new_status)
        .await
        .map_err(|e| {
            error!("Failed to update order status: {}", e);
            ApiError::Internal(e)
        })?;

    match outcome {
        StatusUpdate::Updated(order) => Ok(Json(json!({
            "message": "Order status updated",
            "order": order,
        }))),
        StatusUpdate::NotFound => Err(ApiError::NotFound("Order not found".to_string())),
        StatusUpdate::InvalidTransition { from } => Err(ApiError::InvalidTransition {
            from,
            to: new_status,
        }),
    }
}

/// List all users with identity fields only
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_repository.list_summaries().await.map_err(|e| {
        error!("Failed to list users: {}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(users))
}

/// Accept a multipart image upload and return its public URL
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::validation(vec![FieldError::new("image", "Malformed upload")])
    })? {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let filename = sanitized_filename(&original_name, Utc::now().timestamp_millis());

        let data = field.bytes().await.map_err(|e| {
            error!("Failed to read upload body: {}", e);
            ApiError::validation(vec![FieldError::new("image", "Upload too large or truncated")])
        })?;

        let path = state.uploads_dir.join(&filename);
        tokio::fs::write(&path, &data).await.map_err(|e| {
            error!("Failed to write upload to {}: {}", path.display(), e);
            ApiError::Internal(e.into())
        })?;

        info!("Stored upload {} ({} bytes)", filename, data.len());

        return Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": "Uploaded",
                "url": format!("/uploads/{}", filename),
            })),
        ));
    }

    Err(ApiError::validation(vec![FieldError::new(
        "image",
        "No file uploaded",
    )]))
}

/// Build `<millis>_<base><ext>` with the base reduced to safe characters.
fn sanitized_filename(original: &str, millis: i64) -> String {
    let (base, ext) = match original.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base, format!(".{}", ext)),
        _ => (original, String::new()),
    };

    let base: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();

    let ext: String = ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect();

    format!("{}_{}{}", millis, base, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_filename_keeps_safe_characters() {
        assert_eq!(
            sanitized_filename("thekua-photo_1.jpeg", 1700000000000),
            "1700000000000_thekua-photo_1.jpeg"
        );
    }

    #[test]
    fn test_sanitized_filename_replaces_unsafe_characters() {
        assert_eq!(
            sanitized_filename("my photo (1).png", 42),
            "42_my_photo__1_.png"
        );
    }

    #[test]
    fn test_sanitized_filename_blocks_path_traversal() {
        let name = sanitized_filename("../../etc/passwd", 42);
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[test]
    fn test_sanitized_filename_without_extension() {
        assert_eq!(sanitized_filename("upload", 42), "42_upload");
    }
}
