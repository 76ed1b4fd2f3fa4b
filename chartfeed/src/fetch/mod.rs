//! Typed clients for every upstream provider the dashboard consumes.
//!
//! Each client performs a single outbound request per call with no retry
//! logic; one failed attempt surfaces immediately to the caller as a
//! [`FeedError`](crate::error::FeedError). Provider payload shapes are
//! modelled as explicit record types and converted at this boundary, so no
//! loosely-typed JSON flows through the pipeline (the coin-ranking and news
//! passthrough routes are the deliberate exception).

pub mod cms;
pub mod coingecko;
pub mod coinranking;
pub mod cryptocompare;
pub mod news;

use crate::error::FeedError;

/// Normalise a non-2xx response into [`FeedError::UpstreamHttp`], capturing
/// whatever body the provider sent alongside the status.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FeedError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(FeedError::UpstreamHttp {
            status: status.as_u16(),
            body,
        })
    }
}
