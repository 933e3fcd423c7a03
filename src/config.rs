//! Environment-backed configuration
//!
//! Loaded once at startup into a global, read through `with_config()`.
//! A `.env` file is honored for local development, matching the hosting
//! setups this bot usually runs on.

use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;

/// Default upstream base URL (CoinMarketCap Pro API)
pub const DEFAULT_CMC_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

const DEFAULT_CACHE_TTL_SECS: i64 = 60;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Root configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub upstream: UpstreamConfig,
    pub webserver: WebserverConfig,
}

/// Telegram bot connection
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from @BotFather
    pub bot_token: String,
}

/// Upstream price provider connection
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Static API key sent in the X-CMC_PRO_API_KEY header
    pub api_key: String,
    /// Base URL of the quotes API (overridable for testing)
    pub base_url: String,
    /// Request timeout so a slow upstream cannot stall a command handler
    pub timeout_secs: u64,
    /// How long a fetched price stays valid
    pub cache_ttl_secs: i64,
}

/// Liveness webserver bind address
#[derive(Debug, Clone)]
pub struct WebserverConfig {
    pub host: String,
    pub port: u16,
}

/// Global configuration instance, set once by load_config()
static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from the environment and initialize the global CONFIG
///
/// Call once at startup. Missing required variables and unparseable numeric
/// values are load errors, not silent defaults.
pub fn load_config() -> Result<(), String> {
    // Pull in .env first so the vars below can come from it
    dotenv::dotenv().ok();

    let config = Config {
        telegram: TelegramConfig {
            bot_token: require_env("TELEGRAM_TOKEN")?,
        },
        upstream: UpstreamConfig {
            api_key: require_env("CMC_API_KEY")?,
            base_url: env_or("CMC_BASE_URL", DEFAULT_CMC_BASE_URL),
            timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?,
            cache_ttl_secs: parse_env("PRICE_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
        },
        webserver: WebserverConfig {
            host: env_or("WEBSERVER_HOST", DEFAULT_HOST),
            port: parse_env("WEBSERVER_PORT", DEFAULT_PORT)?,
        },
    };

    if config.upstream.cache_ttl_secs <= 0 {
        return Err("PRICE_CACHE_TTL_SECS must be positive".to_string());
    }
    if config.upstream.timeout_secs == 0 {
        return Err("UPSTREAM_TIMEOUT_SECS must be positive".to_string());
    }

    logger::info(LogTag::Config, "Configuration loaded from environment");

    CONFIG
        .set(config)
        .map_err(|_| "Configuration already loaded".to_string())
}

/// Thread-safe read access to the global configuration
///
/// # Example
/// ```rust,ignore
/// let ttl = with_config(|cfg| cfg.upstream.cache_ttl_secs);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    f(CONFIG.get().expect("config accessed before load_config()"))
}

fn require_env(key: &str) -> Result<String, String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("Missing required environment variable '{}'", key)),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid value for '{}': '{}'", key, v)),
        _ => Ok(default),
    }
}
