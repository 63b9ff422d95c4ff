//! User model and related payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::CartLine;

/// User entity as stored in the database.
///
/// The password hash never leaves the process: responses use [`SafeUser`]
/// or [`UserProfile`], and the field is skipped even if the entity is
/// serialized directly.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub mobile: Option<String>,
    pub dob: Option<NaiveDate>,
    pub avatar: Option<String>,
    pub cart: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Minimal identity returned by the auth endpoints.
    pub fn safe(&self) -> SafeUser {
        SafeUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    /// Full profile minus credentials and cart.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            mobile: self.mobile.clone(),
            dob: self.dob,
            avatar: self.avatar.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Minimal user identity for auth responses
#[derive(Debug, Clone, Serialize)]
pub struct SafeUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Full profile response
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub dob: Option<NaiveDate>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Signup request payload
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update payload. Email and password are not updatable here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub dob: Option<NaiveDate>,
    pub avatar: Option<String>,
}

/// Row returned by the admin user listing
#[derive(Debug, Clone, Serialize)]
pub struct AdminUserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Anu Kumar".to_string(),
            email: "anu@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$secret".to_string(),
            mobile: None,
            dob: None,
            avatar: None,
            cart: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = sample_user();

        let entity = serde_json::to_string(&user).unwrap();
        assert!(!entity.contains("argon2"));
        assert!(!entity.contains("password_hash"));

        let safe = serde_json::to_string(&user.safe()).unwrap();
        assert!(!safe.contains("argon2"));

        let profile = serde_json::to_string(&user.profile()).unwrap();
        assert!(!profile.contains("argon2"));
    }

    #[test]
    fn test_safe_user_carries_identity_only() {
        let user = sample_user();
        let safe = serde_json::to_value(user.safe()).unwrap();
        let keys: Vec<&str> = safe.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"id") && keys.contains(&"name") && keys.contains(&"email"));
    }
}
