//! Explicit admin provisioning
//!
//! Runs only when `ADMIN_BOOTSTRAP=true`, with credentials taken from the
//! environment. Idempotent: an existing admin with the configured email is
//! left untouched.

use anyhow::Result;
use tracing::info;

use crate::repositories::AdminRepository;

/// Admin bootstrap configuration
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Whether provisioning should run at all
    pub enabled: bool,
    /// Admin username (default: "superadmin")
    pub username: String,
    /// Admin email
    pub email: String,
    /// Admin password
    pub password: String,
}

impl BootstrapConfig {
    /// Create a new BootstrapConfig from environment variables
    ///
    /// # Environment Variables
    /// - `ADMIN_BOOTSTRAP`: "true"/"1" to enable provisioning (default: disabled)
    /// - `ADMIN_USERNAME`: admin username (default: "superadmin")
    /// - `ADMIN_EMAIL`: admin email (required when enabled)
    /// - `ADMIN_PASSWORD`: admin password (required when enabled)
    pub fn from_env() -> Result<Self> {
        let enabled = std::env::var("ADMIN_BOOTSTRAP")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let username =
            std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "superadmin".to_string());

        if !enabled {
            return Ok(Self {
                enabled,
                username,
                email: String::new(),
                password: String::new(),
            });
        }

        let email = std::env::var("ADMIN_EMAIL")
            .map_err(|_| anyhow::anyhow!("ADMIN_EMAIL must be set when ADMIN_BOOTSTRAP is enabled"))?;
        let password = std::env::var("ADMIN_PASSWORD").map_err(|_| {
            anyhow::anyhow!("ADMIN_PASSWORD must be set when ADMIN_BOOTSTRAP is enabled")
        })?;

        Ok(Self {
            enabled,
            username,
            email,
            password,
        })
    }
}

/// Provision the configured admin if it does not exist yet.
///
/// Returns whether a new admin was created.
pub async fn ensure_admin(repository: &AdminRepository, config: &BootstrapConfig) -> Result<bool> {
    if !config.enabled {
        return Ok(false);
    }

    if repository.find_by_email(&config.email).await?.is_some() {
        info!("Admin {} already provisioned", config.email);
        return Ok(false);
    }

    repository
        .create(&config.username, &config.email, &config.password)
        .await?;

    info!("Provisioned admin {}", config.email);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_bootstrap_disabled_by_default() {
        unsafe {
            std::env::remove_var("ADMIN_BOOTSTRAP");
            std::env::remove_var("ADMIN_EMAIL");
            std::env::remove_var("ADMIN_PASSWORD");
        }

        let config = BootstrapConfig::from_env().unwrap();
        assert!(!config.enabled);
    }

    #[test]
    #[serial]
    fn test_bootstrap_requires_credentials_when_enabled() {
        unsafe {
            std::env::set_var("ADMIN_BOOTSTRAP", "true");
            std::env::remove_var("ADMIN_EMAIL");
            std::env::remove_var("ADMIN_PASSWORD");
        }

        assert!(BootstrapConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("ADMIN_BOOTSTRAP");
        }
    }

    #[test]
    #[serial]
    fn test_bootstrap_reads_credentials() {
        unsafe {
            std::env::set_var("ADMIN_BOOTSTRAP", "1");
            std::env::set_var("ADMIN_EMAIL", "admin@thekua.com");
            std::env::set_var("ADMIN_PASSWORD", "Admin@123");
        }

        let config = BootstrapConfig::from_env().unwrap();
        assert!(config.enabled);
        assert_eq!(config.username, "superadmin");
        assert_eq!(config.email, "admin@thekua.com");

        unsafe {
            std::env::remove_var("ADMIN_BOOTSTRAP");
            std::env::remove_var("ADMIN_EMAIL");
            std::env::remove_var("ADMIN_PASSWORD");
        }
    }
}
