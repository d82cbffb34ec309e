//! Storefront API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Shopify (checked per request, not at startup)
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_API_TOKEN` - Storefront API access token
//!
//! A missing domain or token does not stop the server from booting. Every
//! upstream call fails with a configuration error instead, which the API
//! reports as `CONFIG_ERROR`.
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_ENV` - `development` or `production` (default: production)
//! - `SHOPIFY_STOREFRONT_API_VERSION` - API version (default: 2024-10)
//! - `SHOPIFY_STOREFRONT_ENDPOINT` - Full GraphQL endpoint URL override
//! - `SHOPIFY_REQUEST_TIMEOUT_SECS` - Upstream request timeout (default: 10)
//! - `SHOPIFY_READ_RETRIES` - Extra attempts for failed read queries (default: 0)
//! - `SHOPIFY_CACHE_TTL_MS` - Default response cache TTL (default: 60000)
//! - `SHOPIFY_CACHE_MAX_ENTRIES` - Response cache capacity (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default Storefront API version.
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment environment.
///
/// Controls whether internal error messages are echoed back to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Whether internal error details may be returned to clients.
    #[must_use]
    pub const fn exposes_internal_errors(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Name used for Sentry and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("expected `development` or `production`, got `{other}`")),
        }
    }
}

/// Storefront API application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store_domain: Option<String>,
    /// Storefront API access token (server-side only)
    pub access_token: Option<SecretString>,
    /// Shopify API version (e.g., 2024-10)
    pub api_version: String,
    /// Full endpoint override; replaces the URL derived from the store domain
    pub endpoint_override: Option<Url>,
    /// Timeout for a single upstream request
    pub request_timeout: Duration,
    /// Extra attempts for failed read queries (never applied to mutations)
    pub read_retries: u32,
    /// TTL for cached responses when the caller does not pick one
    pub cache_ttl: Duration,
    /// Maximum number of cached responses
    pub cache_max_entries: u64,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store_domain", &self.store_domain)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_version", &self.api_version)
            .field("endpoint_override", &self.endpoint_override)
            .field("request_timeout", &self.request_timeout)
            .field("read_retries", &self.read_retries)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_max_entries", &self.cache_max_entries)
            .finish()
    }
}

impl Default for ShopifyStorefrontConfig {
    fn default() -> Self {
        Self {
            store_domain: None,
            access_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            endpoint_override: None,
            request_timeout: Duration::from_secs(10),
            read_retries: 0,
            cache_ttl: Duration::from_millis(60_000),
            cache_max_entries: 1000,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("STOREFRONT_PORT", "3000")?;
        let environment = parse_env_or_default("STOREFRONT_ENV", "production")?;
        let shopify = ShopifyStorefrontConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            environment,
            shopify,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint_override = get_optional_env("SHOPIFY_STOREFRONT_ENDPOINT")
            .map(|raw| {
                Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SHOPIFY_STOREFRONT_ENDPOINT".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        let timeout_secs: u64 = parse_env_or_default("SHOPIFY_REQUEST_TIMEOUT_SECS", "10")?;
        let cache_ttl_ms: u64 = parse_env_or_default("SHOPIFY_CACHE_TTL_MS", "60000")?;

        Ok(Self {
            store_domain: get_optional_env("SHOPIFY_STORE_DOMAIN"),
            access_token: get_optional_env("SHOPIFY_STOREFRONT_API_TOKEN").map(SecretString::from),
            api_version: get_env_or_default("SHOPIFY_STOREFRONT_API_VERSION", DEFAULT_API_VERSION),
            endpoint_override,
            request_timeout: Duration::from_secs(timeout_secs),
            read_retries: parse_env_or_default("SHOPIFY_READ_RETRIES", "0")?,
            cache_ttl: Duration::from_millis(cache_ttl_ms),
            cache_max_entries: parse_env_or_default("SHOPIFY_CACHE_MAX_ENTRIES", "1000")?,
        })
    }

    /// Resolve the GraphQL endpoint URL.
    ///
    /// Returns `None` when neither an override nor a store domain is set.
    #[must_use]
    pub fn endpoint(&self) -> Option<String> {
        if let Some(url) = &self.endpoint_override {
            return Some(url.to_string());
        }
        self.store_domain.as_deref().map(|store| {
            format!(
                "https://{}/api/{}/graphql.json",
                store.trim_end_matches('/'),
                self.api_version
            )
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to a default.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            "development".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert_eq!(
            " Production ".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_only_development_exposes_internals() {
        assert!(Environment::Development.exposes_internal_errors());
        assert!(!Environment::Production.exposes_internal_errors());
    }

    #[test]
    fn test_endpoint_from_store_domain() {
        let config = ShopifyStorefrontConfig {
            store_domain: Some("test.myshopify.com".to_string()),
            ..ShopifyStorefrontConfig::default()
        };
        assert_eq!(
            config.endpoint().unwrap(),
            "https://test.myshopify.com/api/2024-10/graphql.json"
        );
    }

    #[test]
    fn test_endpoint_override_wins() {
        let config = ShopifyStorefrontConfig {
            store_domain: Some("test.myshopify.com".to_string()),
            endpoint_override: Some(Url::parse("http://127.0.0.1:9000/graphql").unwrap()),
            ..ShopifyStorefrontConfig::default()
        };
        assert_eq!(config.endpoint().unwrap(), "http://127.0.0.1:9000/graphql");
    }

    #[test]
    fn test_endpoint_missing_domain() {
        assert!(ShopifyStorefrontConfig::default().endpoint().is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            environment: Environment::Production,
            shopify: ShopifyStorefrontConfig::default(),
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_shopify_config_debug_redacts_secrets() {
        let config = ShopifyStorefrontConfig {
            store_domain: Some("test.myshopify.com".to_string()),
            access_token: Some(SecretString::from("super_secret_storefront_token")),
            ..ShopifyStorefrontConfig::default()
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("test.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_storefront_token"));
    }
}
