use chartfeed::fetch::cms::Cms;
use chartfeed::fetch::coinranking::CoinRanking;
use chartfeed::fetch::news::NewsApi;
use chartfeed::{ChartFeed, FeedConfig};

/// Shared application state: one client per upstream provider.
///
/// The CMS client is optional; without `GRAPHCMS_ENDPOINT`/`GRAPHCMS_TOKEN`
/// only the `/api/posts` route degrades, everything else keeps serving.
pub struct AppState {
    pub feed: ChartFeed,
    pub coinranking: CoinRanking,
    pub news: NewsApi,
    pub cms: Option<Cms>,
}

impl AppState {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            feed: ChartFeed::new(config),
            coinranking: CoinRanking::new(config),
            news: NewsApi::new(config),
            cms: Cms::new(config).ok(),
        }
    }
}
