//! Environment-driven configuration for the upstream provider clients.
//!
//! A missing credential degrades the affected client to a `Configuration`
//! error on use; it never prevents the rest of the application from starting.

use std::env;
use url::Url;

const DEFAULT_CRYPTOCOMPARE_ENDPOINT: &str = "https://min-api.cryptocompare.com/";
const DEFAULT_COINGECKO_ENDPOINT: &str = "https://api.coingecko.com/api/v3/";

/// Provider credentials and endpoint base URLs.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Cryptocompare API key; optional, the free tier works without one.
    pub cryptocompare_key: Option<String>,
    pub cryptocompare_endpoint: Url,
    /// RapidAPI key authenticating the coin-ranking and news hosts.
    pub rapidapi_key: Option<String>,
    pub coingecko_endpoint: Url,
    /// GraphQL content API endpoint serving educational posts.
    pub cms_endpoint: Option<Url>,
    pub cms_token: Option<String>,
}

impl FeedConfig {
    pub fn from_env() -> Self {
        Self {
            cryptocompare_key: env_opt("CRYPTOCOMPARE_API_KEY"),
            cryptocompare_endpoint: env_url(
                "CRYPTOCOMPARE_ENDPOINT",
                DEFAULT_CRYPTOCOMPARE_ENDPOINT,
            ),
            rapidapi_key: env_opt("RAPIDAPI_KEY"),
            coingecko_endpoint: env_url("COINGECKO_ENDPOINT", DEFAULT_COINGECKO_ENDPOINT),
            cms_endpoint: env_opt("GRAPHCMS_ENDPOINT").and_then(|raw| Url::parse(&raw).ok()),
            cms_token: env_opt("GRAPHCMS_TOKEN"),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            cryptocompare_key: None,
            cryptocompare_endpoint: Url::parse(DEFAULT_CRYPTOCOMPARE_ENDPOINT)
                .expect("default endpoint is valid"),
            rapidapi_key: None,
            coingecko_endpoint: Url::parse(DEFAULT_COINGECKO_ENDPOINT)
                .expect("default endpoint is valid"),
            cms_endpoint: None,
            cms_token: None,
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_url(name: &str, default: &str) -> Url {
    env_opt(name)
        .and_then(|raw| Url::parse(&raw).ok())
        .unwrap_or_else(|| Url::parse(default).expect("default endpoint is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints_parse() {
        let config = FeedConfig::default();
        assert_eq!(config.cryptocompare_endpoint.host_str(), Some("min-api.cryptocompare.com"));
        assert_eq!(config.coingecko_endpoint.host_str(), Some("api.coingecko.com"));
        assert!(config.rapidapi_key.is_none());
    }
}
