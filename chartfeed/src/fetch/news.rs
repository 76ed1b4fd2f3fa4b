//! RapidAPI crypto-news client. Two upstream feeds are supported; the
//! response is passed through provider-shaped for the `{data: ...}` proxy
//! route.

use crate::{config::FeedConfig, error::FeedError, fetch::check_status};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

const HOST: &str = "cryptocurrency-news2.p.rapidapi.com";

/// Upstream news feed selector.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsProvider {
    #[default]
    CoinDesk,
    CoinTelegraph,
}

impl NewsProvider {
    pub fn as_path(&self) -> &'static str {
        match self {
            NewsProvider::CoinDesk => "coindesk",
            NewsProvider::CoinTelegraph => "cointelegraph",
        }
    }

    /// Parse a provider name, falling back to CoinDesk for anything
    /// unrecognised.
    pub fn parse_or_default(input: &str) -> Self {
        match input {
            "cointelegraph" => NewsProvider::CoinTelegraph,
            _ => NewsProvider::CoinDesk,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsApi {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl NewsApi {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.rapidapi_key.clone(),
        }
    }

    /// Fetch the latest headlines from one news feed.
    pub async fn latest(&self, provider: NewsProvider) -> Result<Value, FeedError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(FeedError::Configuration("RAPIDAPI_KEY"))?;

        let url = Url::parse(&format!("https://{HOST}/v1/{}", provider.as_path()))?;

        let response = check_status(
            self.client
                .get(url)
                .header("X-RapidAPI-Key", key)
                .header("X-RapidAPI-Host", HOST)
                .send()
                .await?,
        )
        .await?;

        response
            .json::<Value>()
            .await
            .map_err(|error| FeedError::Parse(error.to_string()))
    }
}
