//! RapidAPI coin-ranking client backing the market-cap table and coin list.
//!
//! Responses are passed through provider-shaped; the proxy routes wrap them
//! in `{data: ...}` without reshaping.

use crate::{config::FeedConfig, error::FeedError, fetch::check_status};
use serde_json::Value;
use url::Url;

const HOST: &str = "coinranking1.p.rapidapi.com";

/// Coin-ranking UUID for Bitcoin, the coin-detail widget's fixed subject.
const BTC_UUID: &str = "Qwsogvtv82FCd";
/// Reference currency UUID for USD.
const USD_REFERENCE_UUID: &str = "yhjMzLPhuIDl";

#[derive(Debug, Clone)]
pub struct CoinRanking {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl CoinRanking {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.rapidapi_key.clone(),
        }
    }

    /// Fetch the ranked coin list, USD-referenced.
    pub async fn coins(&self, limit: u32) -> Result<Value, FeedError> {
        let mut url = Url::parse(&format!("https://{HOST}/coins"))?;
        url.query_pairs_mut()
            .append_pair("referenceCurrencyUuid", USD_REFERENCE_UUID)
            .append_pair("limit", &limit.to_string());

        self.get(url).await
    }

    /// Fetch the BTC coin detail with 24h statistics.
    pub async fn coin_detail(&self) -> Result<Value, FeedError> {
        let mut url = Url::parse(&format!("https://{HOST}/coin/{BTC_UUID}"))?;
        url.query_pairs_mut()
            .append_pair("referenceCurrencyUuid", USD_REFERENCE_UUID)
            .append_pair("timePeriod", "24h");

        self.get(url).await
    }

    async fn get(&self, url: Url) -> Result<Value, FeedError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(FeedError::Configuration("RAPIDAPI_KEY"))?;

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
