//! Storefront API routes

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::services::ServeDir;

use crate::{
    middleware::{require_admin, require_user},
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod user;

/// Maximum accepted upload size (5 MiB)
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Create the router for the storefront API
pub fn create_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route(
            "/api/user/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/api/user/cart", get(user::get_cart).put(user::replace_cart))
        .route(
            "/api/user/orders",
            get(user::list_orders).post(user::place_order),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let admin_routes = Router::new()
        .route(
            "/api/admin/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/api/admin/products/:id",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route("/api/admin/seed-products", post(admin::seed_products))
        .route("/api/admin/orders", get(admin::list_orders))
        .route("/api/admin/orders/:order_id", put(admin::update_order_status))
        .route("/api/admin/users", get(admin::list_users))
        .route(
            "/api/admin/upload-image",
            post(admin::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/admin/login", post(auth::admin_login))
        .route("/api/products", get(catalog::list_products))
        .route("/api/products/:id", get(catalog::get_product))
        .merge(user_routes)
        .merge(admin_routes)
        .nest_service("/uploads", ServeDir::new(state.uploads_dir.clone()))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(json!({
        "message": "Thekua Backend API is running",
        "status": "healthy",
        "database": database,
    }))
}
