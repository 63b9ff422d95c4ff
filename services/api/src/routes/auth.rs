//! Authentication routes: signup, login, admin login, token verification

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{error, info};

use crate::{
    error::ApiError,
    middleware::AuthUser,
    models::{LoginRequest, SignupRequest},
    repositories::is_unique_violation,
    state::AppState,
    validation::{validate_login, validate_signup},
};

/// User signup endpoint
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_signup(&payload).map_err(ApiError::validation)?;

    if state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(ApiError::Internal)?
        .is_some()
    {
        return Err(ApiError::Duplicate("User already exists".to_string()));
    }

    let user = state.user_repository.create(&payload).await.map_err(|e| {
        // Two signups can race past the existence check; the unique index
        // catches the loser.
        if is_unique_violation(&e) {
            ApiError::Duplicate("User already exists".to_string())
        } else {
            error!("Failed to create user: {}", e);
            ApiError::Internal(e)
        }
    })?;

    let token = state.jwt_service.generate_user_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::Internal(e)
    })?;

    info!("User signed up: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created",
            "token": token,
            "user": user.safe(),
        })),
    ))
}

/// User login endpoint.
///
/// An unknown email and a wrong password produce the same response, so the
/// endpoint cannot be used to probe which emails are registered.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_login(&payload).map_err(ApiError::validation)?;

    let key = payload.email.trim().to_lowercase();
    if !state.rate_limiter.is_allowed(&key).await {
        return Err(ApiError::RateLimited);
    }

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal(e)
        })?;

    // Unknown email and wrong password take the same exit.
    let Some(user) = user else {
        return Err(ApiError::InvalidCredentials("Invalid credentials".to_string()));
    };
    let password_ok = state
        .user_repository
        .verify_password(&user, &payload.password)
        .map_err(ApiError::Internal)?;
    if !password_ok {
        return Err(ApiError::InvalidCredentials("Invalid credentials".to_string()));
    }

    state.rate_limiter.reset(&key).await;

    let token = state.jwt_service.generate_user_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::Internal(e)
    })?;

    info!("User logged in: {}", user.email);

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": user.safe(),
    })))
}

/// Admin login endpoint
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_login(&payload).map_err(ApiError::validation)?;

    let key = payload.email.trim().to_lowercase();
    if !state.rate_limiter.is_allowed(&key).await {
        return Err(ApiError::RateLimited);
    }

    let admin = state
        .admin_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up admin: {}", e);
            ApiError::Internal(e)
        })?;

    let Some(admin) = admin else {
        return Err(ApiError::InvalidCredentials(
            "Invalid admin credentials".to_string(),
        ));
    };
    let password_ok = state
        .admin_repository
        .verify_password(&admin, &payload.password)
        .map_err(ApiError::Internal)?;
    if !password_ok {
        return Err(ApiError::InvalidCredentials(
            "Invalid admin credentials".to_string(),
        ));
    }

    state.rate_limiter.reset(&key).await;

    let token = state.jwt_service.generate_admin_token(&admin).map_err(|e| {
        error!("Failed to generate admin token: {}", e);
        ApiError::Internal(e)
    })?;

    info!("Admin logged in: {}", admin.email);

    Ok(Json(json!({
        "message": "Admin login successful",
        "token": token,
    })))
}

/// Token verification endpoint for the logged-in user
pub async fn verify(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal(e)
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({
        "message": "Token valid",
        "user": user.safe(),
    })))
}
