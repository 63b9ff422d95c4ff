//! Admin model and related payloads

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Admin entity as stored in the database.
///
/// Distinguished from a regular user only by the table it lives in and the
/// `role: admin` claim embedded in its tokens.
#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
