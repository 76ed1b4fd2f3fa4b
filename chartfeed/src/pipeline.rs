//! End-to-end chart pipeline: symbol mapping, fetch, and normalisation in
//! one facade the server routes and widgets consume.
//!
//! Every refresh rebuilds its series from scratch; nothing is cached or
//! updated incrementally, so a consumer always replaces its output wholesale.

use crate::{
    candle::{Candle, normalize},
    config::FeedConfig,
    error::FeedError,
    fetch::{
        coingecko::{CoinGecko, Tokenomics},
        cryptocompare::{CryptoCompare, Ticker},
    },
    symbol::{self, Interval},
};
use tracing::info;

/// Market-data pipeline facade owning the candle and metadata clients.
#[derive(Debug, Clone)]
pub struct ChartFeed {
    cryptocompare: CryptoCompare,
    coingecko: CoinGecko,
}

impl ChartFeed {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            cryptocompare: CryptoCompare::new(config),
            coingecko: CoinGecko::new(config),
        }
    }

    /// Canonical candle sequence for a UI symbol and timeframe: resolve the
    /// provider asset code, fetch raw history, and normalise it.
    ///
    /// An empty result is returned as an empty sequence ("no data yet"), not
    /// an error.
    pub async fn candles(
        &self,
        ui_symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<Vec<Candle>, FeedError> {
        let asset = symbol::asset_code(ui_symbol);
        let raw = self.cryptocompare.history(asset, interval, limit).await?;
        let candles = normalize(&raw);

        info!(%ui_symbol, %asset, %interval, candles = candles.len(), "candle refresh");
        Ok(candles)
    }

    /// 24h price ticker for a UI symbol.
    pub async fn ticker(&self, ui_symbol: &str) -> Result<Ticker, FeedError> {
        self.cryptocompare
            .ticker(symbol::asset_code(ui_symbol))
            .await
    }

    /// Tokenomics snapshot for a UI symbol.
    pub async fn tokenomics(&self, ui_symbol: &str) -> Result<Tokenomics, FeedError> {
        self.coingecko.tokenomics(symbol::coin_slug(ui_symbol)).await
    }

    /// Ticker and tokenomics for one header refresh, fetched together.
    pub async fn snapshot(&self, ui_symbol: &str) -> Result<(Ticker, Tokenomics), FeedError> {
        futures::try_join!(self.ticker(ui_symbol), self.tokenomics(ui_symbol))
    }
}
