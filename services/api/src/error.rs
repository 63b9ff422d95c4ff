//! Custom error types for the storefront API
//!
//! Every route handler maps its failures into this taxonomy; the
//! `IntoResponse` impl turns each variant into a JSON body with a
//! human-readable `message` field. Unexpected failures stay generic so
//! internals never leak to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::OrderStatus;
use crate::validation::FieldError;

/// Custom error type for the storefront API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input (400), with field-level details
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    /// Unique constraint violation, e.g. email already registered (400)
    #[error("{0}")]
    Duplicate(String),

    /// Failed login; deliberately does not distinguish unknown account
    /// from wrong password (401)
    #[error("{0}")]
    InvalidCredentials(String),

    /// Missing bearer token (401)
    #[error("{0}")]
    AuthRequired(String),

    /// Malformed, expired, or wrong-role token (403)
    #[error("{0}")]
    AuthInvalid(String),

    /// Referenced entity absent (404)
    #[error("{0}")]
    NotFound(String),

    /// Status change attempted on an order in a terminal state (409)
    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Too many attempts (429)
    #[error("Too many attempts, please try again later")]
    RateLimited,

    /// Unexpected failure (500)
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Shorthand for a validation failure with a single field error.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let message = errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "Invalid input".to_string());
        ApiError::Validation { message, errors }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation { .. } | ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials(_) | ApiError::AuthRequired(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::AuthInvalid(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            ApiError::Validation { message, errors } => {
                json!({ "message": message, "errors": errors })
            }
            ApiError::Internal(_) => {
                json!({ "message": "Internal server error" })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ApiError::validation(vec![FieldError::new(
                "name",
                "Name must be at least 2 characters long"
            )])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Duplicate("User already exists".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::InvalidCredentials("Invalid credentials".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::AuthRequired("Access token required".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::AuthInvalid("Invalid or expired token".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ApiError::NotFound("Order not found".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(ApiError::RateLimited), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            status_of(ApiError::Internal(anyhow::anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_message_is_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("connection string leaked"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The anyhow source must not reach the body; the mapping uses a
        // fixed message.
    }

    #[test]
    fn test_transition_message_names_both_states() {
        let err = ApiError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Shipped,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change order status from Cancelled to Shipped"
        );
    }
}
