//! User-scoped routes: profile, cart, and order placement

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::{
        CartLine, NewOrder, PlaceOrderBody, UpdateProfileRequest, cart_total, generate_order_id,
        normalize_lines,
    },
    repositories::is_unique_violation,
    state::AppState,
    validation::validate_customer_details,
};

/// Request body for `PUT /api/user/cart`
#[derive(Deserialize)]
pub struct CartBody {
    #[serde(default)]
    pub cart: Vec<CartLine>,
}

/// Get the caller's profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to load profile: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": user.profile() })))
}

/// Update the caller's profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .update_profile(auth.id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update profile: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({
        "message": "Profile updated",
        "user": user.profile(),
    })))
}

/// Get the caller's cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = state
        .user_repository
        .get_cart(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to load cart: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "cart": cart })))
}

/// Replace the caller's cart wholesale.
///
/// The incoming array is normalized before persisting: duplicate product
/// ids merge by summing quantities, zero-quantity lines are dropped.
pub async fn replace_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CartBody>,
) -> Result<impl IntoResponse, ApiError> {
    let cart = normalize_lines(payload.cart);

    let cart = state
        .user_repository
        .replace_cart(auth.id, &cart)
        .await
        .map_err(|e| {
            error!("Failed to replace cart: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({
        "message": "Cart updated",
        "cart": cart,
    })))
}

/// List the caller's orders, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state
        .order_repository
        .list_for_user(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to list orders: {}", e);
            ApiError::Internal(e)
        })?;

    Ok(Json(json!({ "orders": orders })))
}

/// Place an order from the caller's cart.
///
/// The item snapshot comes from the request when present, otherwise from
/// the stored cart. The total is recomputed server-side, the initial
/// status is always `Pending`, and the cart clear commits in the same
/// transaction as the order insert.
pub async fn place_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<PlaceOrderBody>,
) -> Result<impl IntoResponse, ApiError> {
    let order_data = payload.order_data;

    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    validate_customer_details(&order_data.customer_details).map_err(ApiError::validation)?;

    let items = if order_data.items.is_empty() {
        user.cart.clone()
    } else {
        order_data.items
    };
    let items = normalize_lines(items);
    let total_amount = cart_total(&items);

    let order_id = order_data
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| generate_order_id(Utc::now()));

    let new_order = NewOrder {
        order_id,
        user_id: user.id,
        items,
        total_amount,
        customer_details: order_data.customer_details,
        order_date: order_data.order_date,
        order_time: order_data.order_time,
        delivery_date: order_data.delivery_date,
    };

    let order = state.order_repository.place(&new_order).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Duplicate("Order already exists".to_string())
        } else {
            error!("Failed to place order: {}", e);
            ApiError::Internal(e)
        }
    })?;

    info!("Order {} placed by {}", order.order_id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order placed",
            "order": order,
        })),
    ))
}
