//! JWT service for token generation and validation
//!
//! Tokens are signed with a shared server secret (HS256) and expire seven
//! days after issuance. User tokens carry the subject id and email; admin
//! tokens carry the subject id and a `role: admin` claim that admin-gated
//! routes check independently of signature validity.

use anyhow::Result;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::models::{Admin, User};

/// Role claim value carried by admin tokens
pub const ROLE_ADMIN: &str = "admin";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token expiration time in seconds (default: 7 days)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Shared signing secret (required)
    /// - `JWT_TOKEN_EXPIRY`: Token expiry in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string()) // 7 days
            .parse()
            .unwrap_or(604_800);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id (user or admin)
    pub sub: Uuid,
    /// Email, present on user tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role, present on admin tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

impl Claims {
    /// Whether this token carries the admin role claim
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ROLE_ADMIN)
    }
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    fn now() -> Result<u64> {
        Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs())
    }

    /// Generate a token for a storefront user
    pub fn generate_user_token(&self, user: &User) -> Result<String> {
        let now = Self::now()?;

        let claims = Claims {
            sub: user.id,
            email: Some(user.email.clone()),
            role: None,
            iat: now,
            exp: now + self.config.token_expiry,
        };

        let token = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;
        Ok(token)
    }

    /// Generate a token carrying the admin role claim
    pub fn generate_admin_token(&self, admin: &Admin) -> Result<String> {
        let now = Self::now()?;

        let claims = Claims {
            sub: admin.id,
            email: None,
            role: Some(ROLE_ADMIN.to_string()),
            iat: now,
            exp: now + self.config.token_expiry,
        };

        let token = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serial_test::serial;

    fn service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test_secret_for_unit_tests".to_string(),
            token_expiry: 604_800,
        })
    }

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Anu Kumar".to_string(),
            email: "anu@x.com".to_string(),
            password_hash: "hash".to_string(),
            mobile: None,
            dob: None,
            avatar: None,
            cart: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_admin() -> Admin {
        Admin {
            id: Uuid::new_v4(),
            username: "superadmin".to_string(),
            email: "admin@thekua.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_token_round_trip() {
        let service = service();
        let user = sample_user();

        let token = service.generate_user_token(&user).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email.as_deref(), Some("anu@x.com"));
        assert!(!claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 604_800);
    }

    #[test]
    fn test_admin_token_carries_role_claim() {
        let service = service();
        let admin = sample_admin();

        let token = service.generate_admin_token(&admin).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, admin.id);
        assert!(claims.is_admin());
        assert!(claims.email.is_none());
    }

    #[test]
    fn test_token_with_wrong_secret_rejected() {
        let token = service().generate_user_token(&sample_user()).unwrap();

        let other = JwtService::new(JwtConfig {
            secret: "a_different_secret".to_string(),
            token_expiry: 604_800,
        });
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(service().validate_token("not.a.token").is_err());
        assert!(service().validate_token("").is_err());
    }

    #[test]
    #[serial]
    fn test_jwt_config_from_env() {
        unsafe {
            std::env::set_var("JWT_SECRET", "env_secret");
            std::env::remove_var("JWT_TOKEN_EXPIRY");
        }

        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "env_secret");
        assert_eq!(config.token_expiry, 604_800);

        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_jwt_config_requires_secret() {
        unsafe {
            std::env::remove_var("JWT_SECRET");
        }
        assert!(JwtConfig::from_env().is_err());
    }
}
