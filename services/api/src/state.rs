//! Application state shared across handlers

use sqlx::PgPool;
use std::path::PathBuf;

use crate::jwt::JwtService;
use crate::rate_limiter::RateLimiter;
use crate::repositories::{AdminRepository, OrderRepository, ProductRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub admin_repository: AdminRepository,
    pub product_repository: ProductRepository,
    pub order_repository: OrderRepository,
    pub rate_limiter: RateLimiter,
    pub uploads_dir: PathBuf,
}
