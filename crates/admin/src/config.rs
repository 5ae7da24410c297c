//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DESSERT_LAB_API_URL` - Base URL of the REST backend
//!
//! ## Optional
//! - `DESSERT_LAB_ADMIN_TOKEN` - Bootstrap bearer token for headless use
//!   (the CLI); interactive sessions take the token from login instead.
//!   Validated against placeholder patterns and minimum entropy.
//! - `DESSERT_LAB_ORDERS_PAGE_LIMIT` - Orders per admin page (default: 3)
//! - `DESSERT_LAB_PRODUCTS_PAGE_LIMIT` - Products per admin page (default: 6)
//! - `DESSERT_LAB_USERS_PAGE_LIMIT` - Users per admin page (default: 3)

use std::collections::HashMap;

use secrecy::SecretString;
use url::Url;

/// Minimum Shannon entropy for a plausible real token (bits per char).
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-", "changeme", "replace", "placeholder", "example", "insert", "todo", "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the REST backend.
    pub api_base_url: Url,
    /// Bootstrap bearer token, when configured.
    pub admin_token: Option<SecretString>,
    /// Orders per page in the order panel.
    pub orders_page_limit: u32,
    /// Products per page in the product panel.
    pub products_page_limit: u32,
    /// Users per page in the user panel.
    pub users_page_limit: u32,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the admin token fails placeholder/entropy validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = std::env::var("DESSERT_LAB_API_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DESSERT_LAB_API_URL".to_string()))
            .and_then(|raw| {
                Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("DESSERT_LAB_API_URL".to_string(), e.to_string())
                })
            })?;

        let admin_token = match std::env::var("DESSERT_LAB_ADMIN_TOKEN") {
            Ok(raw) => {
                validate_token_strength(&raw, "DESSERT_LAB_ADMIN_TOKEN")?;
                Some(SecretString::from(raw))
            }
            Err(_) => None,
        };

        Ok(Self {
            api_base_url,
            admin_token,
            orders_page_limit: parse_limit("DESSERT_LAB_ORDERS_PAGE_LIMIT", 3)?,
            products_page_limit: parse_limit("DESSERT_LAB_PRODUCTS_PAGE_LIMIT", 6)?,
            users_page_limit: parse_limit("DESSERT_LAB_USERS_PAGE_LIMIT", 3)?,
        })
    }
}

/// Parse a page-limit variable, falling back to its default when unset.
fn parse_limit(key: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => match raw.parse::<u32>() {
            Ok(limit) if limit > 0 => Ok(limit),
            Ok(_) => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "page limit must be at least 1".to_string(),
            )),
            Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        },
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // Token length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a configured token is not a placeholder and has
/// sufficient entropy. Real tokens (JWTs, API keys) pass easily; typed-in
/// filler does not.
fn validate_token_strength(token: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(token);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_repeated_char_is_zero() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let result = validate_token_strength("your-admin-token-here", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_low_entropy_token_rejected() {
        let result = validate_token_strength("aaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_realistic_token_accepted() {
        // JWT-shaped high-entropy string
        let result = validate_token_strength("eyJhbGciOiJIUzI1NiJ9.x8Kp2qRv.T3mZw9Yf", "TEST_VAR");
        assert!(result.is_ok());
    }
}
