//! Translation of UI-level trading-pair symbols and timeframes into the
//! vocabulary of the upstream market-data providers.
//!
//! Lookups never fail: an unknown symbol maps to the BTC asset and an unknown
//! interval maps to the 1h request, so the chart always renders something
//! instead of surfacing a configuration error to the end user.

use serde::{Deserialize, Serialize};

/// Canonical chart timeframes exposed by the UI.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Deserialize, Serialize,
)]
pub enum Interval {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[default]
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "1w")]
    W1,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::H1 => "1h",
            Interval::H4 => "4h",
            Interval::D1 => "1d",
            Interval::W1 => "1w",
        }
    }

    /// Parse a canonical interval string, falling back to `1h` for anything
    /// unrecognised.
    pub fn parse_or_default(input: &str) -> Self {
        match input {
            "1m" => Interval::M1,
            "5m" => Interval::M5,
            "15m" => Interval::M15,
            "1h" => Interval::H1,
            "4h" => Interval::H4,
            "1d" => Interval::D1,
            "1w" => Interval::W1,
            _ => Interval::H1,
        }
    }

    /// Cryptocompare historical endpoint and aggregation factor serving this
    /// timeframe.
    pub fn histo(&self) -> HistoRequest {
        match self {
            Interval::M1 => HistoRequest::new(HistoEndpoint::Minute, 1),
            Interval::M5 => HistoRequest::new(HistoEndpoint::Minute, 5),
            Interval::M15 => HistoRequest::new(HistoEndpoint::Minute, 15),
            Interval::H1 => HistoRequest::new(HistoEndpoint::Hour, 1),
            Interval::H4 => HistoRequest::new(HistoEndpoint::Hour, 4),
            Interval::D1 => HistoRequest::new(HistoEndpoint::Day, 1),
            Interval::W1 => HistoRequest::new(HistoEndpoint::Day, 7),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Provider-specific historical candle request derived from an [`Interval`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct HistoRequest {
    pub endpoint: HistoEndpoint,
    pub aggregate: u32,
}

impl HistoRequest {
    pub fn new(endpoint: HistoEndpoint, aggregate: u32) -> Self {
        Self {
            endpoint,
            aggregate,
        }
    }
}

/// Cryptocompare historical data endpoint family.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum HistoEndpoint {
    Minute,
    Hour,
    Day,
}

impl HistoEndpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoEndpoint::Minute => "histominute",
            HistoEndpoint::Hour => "histohour",
            HistoEndpoint::Day => "histoday",
        }
    }
}

/// Provider asset code (Cryptocompare `fsym`) for a canonical trading-pair
/// symbol. Unknown symbols fall back to `"BTC"`.
///
/// The `XMLUSDT` key is the spelling the deployed symbol tables use for the
/// XLM pair; it is reproduced here unchanged so every component resolves the
/// same identifiers.
pub fn asset_code(symbol: &str) -> &'static str {
    match symbol {
        "BTCUSDT" => "BTC",
        "ETHUSDT" => "ETH",
        "BNBUSDT" => "BNB",
        "SOLUSDT" => "SOL",
        "ADAUSDT" => "ADA",
        "XRPUSDT" => "XRP",
        "DOGEUSDT" => "DOGE",
        "DOTUSDT" => "DOT",
        "MATICUSDT" => "MATIC",
        "LTCUSDT" => "LTC",
        "LINKUSDT" => "LINK",
        "XMLUSDT" => "XLM",
        _ => "BTC",
    }
}

/// CoinGecko coin slug for a canonical trading-pair symbol. Unknown symbols
/// fall back to `"bitcoin"`.
pub fn coin_slug(symbol: &str) -> &'static str {
    match symbol {
        "BTCUSDT" => "bitcoin",
        "ETHUSDT" => "ethereum",
        "BNBUSDT" => "binancecoin",
        "SOLUSDT" => "solana",
        "ADAUSDT" => "cardano",
        "XRPUSDT" => "ripple",
        "DOGEUSDT" => "dogecoin",
        "DOTUSDT" => "polkadot",
        "MATICUSDT" => "matic-network",
        "LTCUSDT" => "litecoin",
        "LINKUSDT" => "chainlink",
        "XMLUSDT" => "stellar",
        _ => "bitcoin",
    }
}
