//! Chartfeed - normalised market data for crypto dashboard charts
//!
//! The pipeline turns a UI-level trading pair and timeframe into render-ready
//! series:
//! - symbol/interval mapping into upstream provider vocabulary
//! - single-shot OHLCV fetching with a uniform error taxonomy
//! - normalisation into a canonical, time-ordered, deduplicated candle
//!   sequence
//! - derived indicator series (SMA, EMA, Bollinger, RSI, MACD) positionally
//!   aligned back onto candle timestamps
//! - Heikin-Ashi smoothing via a stateful fold
//!
//! Around the pipeline sit typed clients for the remaining dashboard
//! upstreams (price ticker, tokenomics, coin rankings, news, CMS articles)
//! and an owned periodic [`Poller`] for widget refresh cycles.

pub mod candle;
pub mod config;
pub mod error;
pub mod fetch;
pub mod heikin_ashi;
pub mod indicator;
pub mod pipeline;
pub mod poll;
pub mod symbol;

// Re-export the types most consumers need.
pub use candle::{Candle, RawCandle, TimestampUnit, normalize};
pub use config::FeedConfig;
pub use error::FeedError;
pub use heikin_ashi::heikin_ashi;
pub use indicator::{
    BandPoint, DerivedSeries, IndicatorSpec, MacdPoint, Point, Source, compute,
};
pub use pipeline::ChartFeed;
pub use poll::Poller;
pub use symbol::Interval;
