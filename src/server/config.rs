/**
 * Server Configuration
 *
 * Loads service configuration from the environment.
 *
 * # Variables
 *
 * - `ADMIN_PASSWORD` - mandatory; the server refuses to start without it
 * - `PORT` - listen port, default 8080
 * - `DATA_DIR` - document storage directory, default `data`
 * - `STATIC_DIR` - optional client build to serve, default `client/build`
 * - `PAGE_HEADER_NAME`, `TIMEZONE`, `PAGE_BANNER_HTML` - presentation
 *   defaults handed to viewers until an admin saves a configuration
 *
 * The admin password is never kept in memory as plaintext: it is hashed at
 * load time and the hash is what login requests are verified against.
 */

use std::path::PathBuf;

use thiserror::Error;

use crate::calendar::document::PageConfig;

/// Fatal configuration errors. These abort startup; nothing else does.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ADMIN_PASSWORD environment variable is not set")]
    MissingAdminPassword,

    #[error("failed to hash admin password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Immutable service configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,
    /// Directory holding the per-year document records
    pub data_dir: PathBuf,
    /// Directory of static client assets, served if it exists
    pub static_dir: PathBuf,
    /// bcrypt hash of the admin secret
    pub admin_password_hash: String,
    /// Page configuration served until an admin saves one
    pub page_defaults: PageConfig,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingAdminPassword` when `ADMIN_PASSWORD` is
    /// unset or empty. This is the service's one fatal boot precondition.
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_password = std::env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|password| !password.is_empty())
            .ok_or(ConfigError::MissingAdminPassword)?;
        let admin_password_hash = bcrypt::hash(&admin_password, bcrypt::DEFAULT_COST)?;

        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let data_dir = PathBuf::from(
            std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        );
        let static_dir = PathBuf::from(
            std::env::var("STATIC_DIR").unwrap_or_else(|_| "client/build".to_string()),
        );

        let page_defaults = PageConfig {
            header_name: std::env::var("PAGE_HEADER_NAME").ok(),
            timezone: std::env::var("TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
            banner_html: std::env::var("PAGE_BANNER_HTML").ok(),
        };

        Ok(Self {
            port,
            data_dir,
            static_dir,
            admin_password_hash,
            page_defaults,
        })
    }
}
