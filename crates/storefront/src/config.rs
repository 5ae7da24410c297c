//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DESSERT_LAB_API_URL` - Base URL of the REST backend
//!
//! ## Optional
//! - `DESSERT_LAB_POSTAL_URL` - Postal-code lookup service base URL
//!   (default: <https://api.postalpincode.in>)
//! - `DESSERT_LAB_PAGE_SIZE` - Catalog page size (default: 9)

use url::Url;

/// Default postal-code lookup service.
const DEFAULT_POSTAL_URL: &str = "https://api.postalpincode.in";

/// Default number of products per catalog page.
const DEFAULT_PAGE_SIZE: usize = 9;

/// Configuration errors that can occur during loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the REST backend.
    pub api_base_url: Url,
    /// Base URL of the postal-code lookup service.
    pub postal_base_url: Url,
    /// Number of products per catalog page.
    pub page_size: usize,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_url("DESSERT_LAB_API_URL", &get_required_env("DESSERT_LAB_API_URL")?)?;
        let postal_base_url = parse_url(
            "DESSERT_LAB_POSTAL_URL",
            &get_env_or_default("DESSERT_LAB_POSTAL_URL", DEFAULT_POSTAL_URL),
        )?;
        let page_size = parse_page_size(get_optional_env("DESSERT_LAB_PAGE_SIZE").as_deref())?;

        Ok(Self {
            api_base_url,
            postal_base_url,
            page_size,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a URL-valued variable.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the catalog page size, falling back to the default when unset.
fn parse_page_size(value: Option<&str>) -> Result<usize, ConfigError> {
    let Some(raw) = value else {
        return Ok(DEFAULT_PAGE_SIZE);
    };
    match raw.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        Ok(_) => Err(ConfigError::InvalidEnvVar(
            "DESSERT_LAB_PAGE_SIZE".to_string(),
            "page size must be at least 1".to_string(),
        )),
        Err(e) => Err(ConfigError::InvalidEnvVar(
            "DESSERT_LAB_PAGE_SIZE".to_string(),
            e.to_string(),
        )),
    }
}
