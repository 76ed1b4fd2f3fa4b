//! Cryptocompare client: historical OHLCV (the chart's candle source) and
//! the 24h price ticker.
//!
//! See docs: <https://min-api.cryptocompare.com/documentation>

use crate::{
    candle::{Candle, RawCandle, TimestampUnit},
    config::FeedConfig,
    error::FeedError,
    fetch::check_status,
    symbol::Interval,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Cryptocompare REST client.
#[derive(Debug, Clone)]
pub struct CryptoCompare {
    client: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl CryptoCompare {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: config.cryptocompare_endpoint.clone(),
            api_key: config.cryptocompare_key.clone(),
        }
    }

    /// Fetch raw historical candles for a provider asset code over one
    /// timeframe. Returns the provider records unmodified; callers pass them
    /// through [`normalize`](crate::candle::normalize).
    ///
    /// A non-2xx status fails with `UpstreamHttp`; a 2xx payload carrying the
    /// provider's `Response: "Error"` envelope fails with `UpstreamData`.
    pub async fn history(
        &self,
        asset: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<Vec<CryptoCompareCandle>, FeedError> {
        let url = self.history_url(asset, interval, limit)?;

        debug!(%asset, %interval, limit, "fetching historical candles");

        let response = check_status(self.client.get(url).send().await?).await?;
        let envelope = response
            .json::<HistoEnvelope>()
            .await
            .map_err(|error| FeedError::Parse(error.to_string()))?;

        if envelope.response == "Error" {
            return Err(FeedError::UpstreamData(envelope.message));
        }

        Ok(envelope.data.map(|data| data.data).unwrap_or_default())
    }

    /// Historical candles request URL. The `aggregate` pair is always sent,
    /// even for a factor of 1, matching the requests the chart frontend has
    /// always issued.
    fn history_url(&self, asset: &str, interval: Interval, limit: u32) -> Result<Url, FeedError> {
        let histo = interval.histo();
        let mut url = self.base.join(&format!("data/v2/{}", histo.endpoint.as_str()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("fsym", asset)
                .append_pair("tsym", "USD")
                .append_pair("limit", &limit.to_string())
                .append_pair("aggregate", &histo.aggregate.to_string());
            if let Some(key) = &self.api_key {
                pairs.append_pair("api_key", key);
            }
        }
        Ok(url)
    }

    /// Fetch the 24h ticker for a provider asset code from the
    /// `pricemultifull` endpoint.
    pub async fn ticker(&self, asset: &str) -> Result<Ticker, FeedError> {
        let mut url = self.base.join("data/pricemultifull")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("fsyms", asset).append_pair("tsyms", "USD");
            if let Some(key) = &self.api_key {
                pairs.append_pair("api_key", key);
            }
        }

        let response = check_status(self.client.get(url).send().await?).await?;
        let envelope = response
            .json::<PriceMultiFull>()
            .await
            .map_err(|error| FeedError::Parse(error.to_string()))?;

        envelope
            .raw
            .get(asset)
            .and_then(|quotes| quotes.get("USD"))
            .map(|raw| Ticker {
                price: raw.price,
                change_24h: raw.change_24h,
                change_pct_24h: raw.change_pct_24h,
            })
            .ok_or(FeedError::EmptyResult)
    }
}

/// Raw Cryptocompare histo record. Timestamps are already whole seconds;
/// `volumeto` is the quote-denominated volume the chart displays.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
pub struct CryptoCompareCandle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(rename = "volumefrom", default)]
    pub volume_from: f64,
    #[serde(rename = "volumeto", default)]
    pub volume_to: f64,
}

impl RawCandle for CryptoCompareCandle {
    fn candle(&self) -> Candle {
        Candle {
            time: TimestampUnit::Seconds.to_seconds(self.time),
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume_to,
        }
    }
}

/// Binance-shape kline tuple `[time_ms, open, high, low, close, volume]`,
/// the wire format the proxy route re-emits and the chart consumes.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct BinanceKline(pub i64, pub f64, pub f64, pub f64, pub f64, pub f64);

impl RawCandle for BinanceKline {
    fn candle(&self) -> Candle {
        Candle {
            time: TimestampUnit::Millis.to_seconds(self.0),
            open: self.1,
            high: self.2,
            low: self.3,
            close: self.4,
            volume: self.5,
        }
    }
}

impl From<Candle> for BinanceKline {
    fn from(candle: Candle) -> Self {
        Self(
            candle.time * 1000,
            candle.open,
            candle.high,
            candle.low,
            candle.close,
            candle.volume,
        )
    }
}

/// 24h price ticker derived from `RAW[asset][USD]`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Ticker {
    pub price: f64,
    pub change_24h: f64,
    pub change_pct_24h: f64,
}

#[derive(Debug, Deserialize)]
struct HistoEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Data")]
    data: Option<HistoData>,
}

#[derive(Debug, Deserialize)]
struct HistoData {
    #[serde(rename = "Data", default)]
    data: Vec<CryptoCompareCandle>,
}

#[derive(Debug, Deserialize)]
struct PriceMultiFull {
    #[serde(rename = "RAW", default)]
    raw: HashMap<String, HashMap<String, RawTicker>>,
}

#[derive(Debug, Deserialize)]
struct RawTicker {
    #[serde(rename = "PRICE")]
    price: f64,
    #[serde(rename = "CHANGE24HOUR")]
    change_24h: f64,
    #[serde(rename = "CHANGEPCT24HOUR")]
    change_pct_24h: f64,
}
