use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chartfeed::fetch::cryptocompare::BinanceKline;
use chartfeed::fetch::news::NewsProvider;
use chartfeed::{FeedError, Interval};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

// ── Query params ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KlineQuery {
    #[serde(default = "default_symbol")]
    symbol: String,
    #[serde(default = "default_interval")]
    interval: String,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_interval() -> String {
    "1h".to_string()
}

fn default_limit() -> u32 {
    500
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    provider: String,
}

// ── Route definitions ────────────────────────────────────────────────────

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/klines", get(api_klines))
        .route("/api/coins", get(api_coins))
        .route("/api/list", get(api_list))
        .route("/api/news", get(api_news))
        .route("/api/posts", get(api_posts))
}

/// Candles through the full pipeline, re-emitted as Binance-shape tuples
/// `[time_ms, open, high, low, close, volume]`.
async fn api_klines(
    State(state): State<Arc<AppState>>,
    Query(query): Query<KlineQuery>,
) -> Result<Json<Vec<BinanceKline>>, ApiError> {
    let interval = Interval::parse_or_default(&query.interval);
    let candles = state
        .feed
        .candles(&query.symbol, interval, query.limit)
        .await?;

    let klines: Vec<BinanceKline> = candles.into_iter().map(BinanceKline::from).collect();
    Ok(Json(klines))
}

/// BTC coin detail from the ranked-coins provider, wrapped in `{data: ...}`.
async fn api_coins(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let data = state.coinranking.coin_detail().await?;
    Ok(Json(json!({ "data": data })))
}

/// Top-10 ranked coin list, wrapped in `{data: ...}`.
async fn api_list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let data = state.coinranking.coins(10).await?;
    Ok(Json(json!({ "data": data })))
}

/// Latest headlines from one of the two news feeds.
async fn api_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Value>, ApiError> {
    let provider = NewsProvider::parse_or_default(&query.provider);
    let data = state.news.latest(provider).await?;
    Ok(Json(json!({ "data": data })))
}

/// Educational articles from the content API.
async fn api_posts(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let cms = state
        .cms
        .as_ref()
        .ok_or(FeedError::Configuration("GRAPHCMS_ENDPOINT"))?;
    let posts = cms.posts().await?;
    Ok(Json(json!({ "data": posts })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kline_query_defaults() {
        let query: KlineQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.symbol, "BTCUSDT");
        assert_eq!(query.interval, "1h");
        assert_eq!(query.limit, 500);

        let query: KlineQuery =
            serde_json::from_value(json!({"symbol": "ETHUSDT", "interval": "4h", "limit": 100}))
                .unwrap();
        assert_eq!(query.symbol, "ETHUSDT");
        assert_eq!(query.interval, "4h");
        assert_eq!(query.limit, 100);
    }
}
