use anyhow::{Context, Result};

const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_ONET_API_BASE: &str = "https://services.onetcenter.org/ws/online";
const DEFAULT_ONET_SITE_BASE: &str = "https://www.onetonline.org";

/// Application configuration loaded from environment variables.
///
/// Both API keys are optional at startup: a missing `ONET_API_KEY` switches the
/// occupation directory to page scraping, and a missing `ANTHROPIC_API_KEY` is
/// reported per request by the generation endpoints.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_url: String,
    /// `username:password` for the O*NET web services.
    pub onet_api_key: Option<String>,
    pub onet_api_base: String,
    pub onet_site_base: String,
    pub upstream_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_api_url: env_or("ANTHROPIC_API_URL", DEFAULT_ANTHROPIC_API_URL),
            onet_api_key: optional_env("ONET_API_KEY"),
            onet_api_base: env_or("ONET_API_BASE", DEFAULT_ONET_API_BASE),
            onet_site_base: env_or("ONET_SITE_BASE", DEFAULT_ONET_SITE_BASE),
            upstream_timeout_secs: env_or("UPSTREAM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            anthropic_api_url: DEFAULT_ANTHROPIC_API_URL.to_string(),
            onet_api_key: None,
            onet_api_base: DEFAULT_ONET_API_BASE.to_string(),
            onet_site_base: DEFAULT_ONET_SITE_BASE.to_string(),
            upstream_timeout_secs: 120,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Reads a variable, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
