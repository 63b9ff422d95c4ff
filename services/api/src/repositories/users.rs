//! User repository for database operations
//!
//! The cart lives as a JSONB column on the user row, mirroring the source
//! system's one-document-per-user layout; replacing it is a single-row
//! atomic update (last write wins across concurrent replacements).

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use tracing::info;
use uuid::Uuid;

use crate::models::{AdminUserSummary, CartLine, SignupRequest, UpdateProfileRequest, User};

use super::{hash_password, verify_password_hash};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, mobile, dob, avatar, cart, created_at, updated_at";

fn user_from_row(row: &PgRow) -> User {
    let Json(cart): Json<Vec<CartLine>> = row.get("cart");
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        mobile: row.get("mobile"),
        dob: row.get("dob"),
        avatar: row.get("avatar"),
        cart,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with an empty cart, hashing the password
    pub async fn create(&self, payload: &SignupRequest) -> Result<User> {
        info!("Creating new user: {}", payload.email);

        let password_hash = hash_password(&payload.password)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(payload.name.trim())
        .bind(payload.email.trim().to_lowercase())
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_from_row(&row))
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Verify a user's password
    pub fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        verify_password_hash(&user.password_hash, password)
    }

    /// Partially update profile fields; absent fields are left untouched
    pub async fn update_profile(
        &self,
        id: Uuid,
        payload: &UpdateProfileRequest,
    ) -> Result<Option<User>> {
        info!("Updating profile for user: {}", id);

        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                mobile = COALESCE($3, mobile),
                dob = COALESCE($4, dob),
                avatar = COALESCE($5, avatar),
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(payload.name.as_deref().map(str::trim))
        .bind(&payload.mobile)
        .bind(payload.dob)
        .bind(&payload.avatar)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Get a user's cart; `None` when the user does not exist
    pub async fn get_cart(&self, id: Uuid) -> Result<Option<Vec<CartLine>>> {
        let row = sqlx::query("SELECT cart FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| {
            let Json(cart): Json<Vec<CartLine>> = row.get("cart");
            cart
        }))
    }

    /// Replace a user's cart wholesale; `None` when the user does not exist
    pub async fn replace_cart(&self, id: Uuid, cart: &[CartLine]) -> Result<Option<Vec<CartLine>>> {
        info!("Replacing cart for user: {}", id);

        let row = sqlx::query(
            r#"
            UPDATE users
            SET cart = $2, updated_at = now()
            WHERE id = $1
            RETURNING cart
            "#,
        )
        .bind(id)
        .bind(Json(cart))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| {
            let Json(cart): Json<Vec<CartLine>> = row.get("cart");
            cart
        }))
    }

    /// List all users with identity fields only (admin view)
    pub async fn list_summaries(&self) -> Result<Vec<AdminUserSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let users = rows
            .into_iter()
            .map(|row| AdminUserSummary {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(users)
    }
}
