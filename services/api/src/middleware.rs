//! Middleware for bearer-token authentication
//!
//! A missing token yields 401; a malformed, expired, or wrong-role token
//! yields 403. The two failure kinds are separated by status code on
//! purpose, matching the contract the frontend relies on.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::warn;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Authenticated storefront user, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Authenticated admin, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub id: Uuid,
}

/// Gate for user-scoped routes
pub async fn require_user(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        bearer.ok_or_else(|| ApiError::AuthRequired("Access token required".to_string()))?;

    let claims = state.jwt_service.validate_token(bearer.token()).map_err(|e| {
        warn!("Token validation failed: {}", e);
        ApiError::AuthInvalid("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Gate for admin-scoped routes; rejects any token lacking the admin role
/// claim, even if the token is otherwise valid for user routes.
pub async fn require_admin(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) =
        bearer.ok_or_else(|| ApiError::AuthRequired("Admin token required".to_string()))?;

    let claims = state.jwt_service.validate_token(bearer.token()).map_err(|e| {
        warn!("Admin token validation failed: {}", e);
        ApiError::AuthInvalid("Invalid or expired token".to_string())
    })?;

    if !claims.is_admin() {
        return Err(ApiError::AuthInvalid("Invalid or expired token".to_string()));
    }

    req.extensions_mut().insert(AuthAdmin { id: claims.sub });

    Ok(next.run(req).await)
}
