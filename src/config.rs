//! Configuration Module
//!
//! Environment-driven settings with working defaults for every knob; nothing
//! here is required to boot a development server.

use std::env;
use std::path::PathBuf;

// == Env Helpers ==

/// Reads and parses an environment variable, falling back to `default`.
fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean environment variable. `true` and `1` (case-insensitive)
/// are true, any other set value is false, unset falls back to `default`.
fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1"),
        Err(_) => default,
    }
}

// == Config Structs ==

/// Server configuration parameters.
///
/// Every field has a default; the environment only overrides.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Root of the route-definition tree walked at startup
    pub routes_dir: PathBuf,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Session cookie settings
    pub session: SessionConfig,
}

/// Response cache tuning.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether the caching middleware is mounted at all
    pub enabled: bool,
    /// Maximum number of entries the store can hold
    pub max_entries: usize,
    /// Entry time-to-live in milliseconds
    pub ttl_ms: u64,
    /// Release an expired entry once on read instead of dropping it unseen
    pub allow_stale: bool,
    /// Reads refresh an entry's age and recency
    pub update_age_on_get: bool,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
}

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Set the `Secure` attribute on the session cookie
    pub cookie_secure: bool,
    /// Inactivity expiry in seconds
    pub cookie_max_age: i64,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `ROUTES_DIR` - route-definition tree root (default: "routes")
    /// - `CACHE_ENABLED` - mount the response cache middleware (default: true)
    /// - `CACHE_MAX_ENTRIES` - cache store capacity (default: 500)
    /// - `CACHE_TTL_MS` - entry TTL in milliseconds (default: 1800000, 30 min)
    /// - `CACHE_ALLOW_STALE` - release expired entries once on read (default: false)
    /// - `CACHE_UPDATE_AGE_ON_GET` - reads refresh age and recency (default: false)
    /// - `CACHE_CLEANUP_INTERVAL` - expiry sweep period in seconds (default: 60)
    /// - `SESSION_COOKIE_SECURE` - Secure attribute on the cookie (default: false)
    /// - `SESSION_COOKIE_MAX_AGE` - inactivity expiry in seconds (default: 172800, 48 h)
    pub fn from_env() -> Self {
        Self {
            server_port: env_parse("PORT", 3000),
            routes_dir: PathBuf::from(
                env::var("ROUTES_DIR").unwrap_or_else(|_| "routes".to_string()),
            ),
            cache: CacheConfig {
                enabled: env_bool("CACHE_ENABLED", true),
                max_entries: env_parse("CACHE_MAX_ENTRIES", 500),
                ttl_ms: env_parse("CACHE_TTL_MS", 1_800_000),
                allow_stale: env_bool("CACHE_ALLOW_STALE", false),
                update_age_on_get: env_bool("CACHE_UPDATE_AGE_ON_GET", false),
                cleanup_interval: env_parse("CACHE_CLEANUP_INTERVAL", 60),
            },
            session: SessionConfig {
                cookie_secure: env_bool("SESSION_COOKIE_SECURE", false),
                cookie_max_age: env_parse("SESSION_COOKIE_MAX_AGE", 172_800),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            routes_dir: PathBuf::from("routes"),
            cache: CacheConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 500,
            ttl_ms: 1_800_000,
            allow_stale: false,
            update_age_on_get: false,
            cleanup_interval: 60,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_secure: false,
            cookie_max_age: 172_800,
        }
    }
}
