//! CoinGecko client for the tokenomics panel, keyed by lowercase coin slug.
//!
//! See docs: <https://docs.coingecko.com/reference/coins-id>

use crate::{config::FeedConfig, error::FeedError, fetch::check_status};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone)]
pub struct CoinGecko {
    client: reqwest::Client,
    base: Url,
}

impl CoinGecko {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: config.coingecko_endpoint.clone(),
        }
    }

    /// Fetch coin metadata and flatten the nested `market_data.{...}.usd`
    /// quotes into a [`Tokenomics`] record.
    pub async fn tokenomics(&self, slug: &str) -> Result<Tokenomics, FeedError> {
        let mut url = self.base.join(&format!("coins/{slug}"))?;
        url.query_pairs_mut()
            .append_pair("localization", "false")
            .append_pair("tickers", "false")
            .append_pair("market_data", "true")
            .append_pair("community_data", "false")
            .append_pair("developer_data", "false");

        let response = check_status(self.client.get(url).send().await?).await?;
        let coin = response
            .json::<CoinResponse>()
            .await
            .map_err(|error| FeedError::Parse(error.to_string()))?;

        Ok(Tokenomics::from(coin))
    }
}

/// Flattened tokenomics snapshot for one coin, USD-quoted.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
pub struct Tokenomics {
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub ath: f64,
    pub ath_change_pct: f64,
    pub atl: f64,
    pub atl_change_pct: f64,
    pub price_change_24h: f64,
    pub price_change_pct_24h: f64,
    pub market_cap_change_pct_24h: f64,
    pub fully_diluted_valuation: Option<f64>,
    pub image: Option<String>,
}

impl From<CoinResponse> for Tokenomics {
    fn from(coin: CoinResponse) -> Self {
        let market = coin.market_data;
        Self {
            name: coin.name,
            symbol: coin.symbol.to_uppercase(),
            market_cap_rank: coin.market_cap_rank,
            price: market.current_price.usd,
            market_cap: market.market_cap.usd,
            volume_24h: market.total_volume.usd,
            circulating_supply: market.circulating_supply,
            max_supply: market.max_supply,
            ath: market.ath.usd,
            ath_change_pct: market.ath_change_percentage.usd,
            atl: market.atl.usd,
            atl_change_pct: market.atl_change_percentage.usd,
            price_change_24h: market.price_change_24h.unwrap_or_default(),
            price_change_pct_24h: market.price_change_percentage_24h.unwrap_or_default(),
            market_cap_change_pct_24h: market.market_cap_change_percentage_24h.unwrap_or_default(),
            fully_diluted_valuation: market.fully_diluted_valuation.and_then(|quote| quote.usd),
            image: coin.image.and_then(|image| image.large),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CoinResponse {
    name: String,
    symbol: String,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    market_data: MarketData,
    #[serde(default)]
    image: Option<CoinImage>,
}

#[derive(Debug, Deserialize)]
struct MarketData {
    current_price: UsdQuote,
    market_cap: UsdQuote,
    total_volume: UsdQuote,
    #[serde(default)]
    circulating_supply: Option<f64>,
    #[serde(default)]
    max_supply: Option<f64>,
    ath: UsdQuote,
    ath_change_percentage: UsdQuote,
    atl: UsdQuote,
    atl_change_percentage: UsdQuote,
    #[serde(default)]
    price_change_24h: Option<f64>,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    market_cap_change_percentage_24h: Option<f64>,
    #[serde(default)]
    fully_diluted_valuation: Option<OptionalUsdQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct UsdQuote {
    #[serde(default)]
    usd: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OptionalUsdQuote {
    #[serde(default)]
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CoinImage {
    #[serde(default)]
    large: Option<String>,
}
