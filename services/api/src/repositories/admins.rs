//! Admin repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::models::Admin;

use super::{hash_password, verify_password_hash};

fn admin_from_row(row: &PgRow) -> Admin {
    Admin {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Admin repository
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(admin_from_row))
    }

    /// Create a new admin, hashing the password
    pub async fn create(&self, username: &str, email: &str, password: &str) -> Result<Admin> {
        info!("Creating admin: {}", email);

        let password_hash = hash_password(password)?;

        let row = sqlx::query(
            r#"
            INSERT INTO admins (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email.trim().to_lowercase())
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin_from_row(&row))
    }

    /// Verify an admin's password
    pub fn verify_password(&self, admin: &Admin, password: &str) -> Result<bool> {
        verify_password_hash(&admin.password_hash, password)
    }
}
