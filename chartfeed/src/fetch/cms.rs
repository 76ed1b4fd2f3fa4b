//! Headless CMS client serving educational articles over a fixed GraphQL
//! query.

use crate::{config::FeedConfig, error::FeedError, fetch::check_status};
use serde::{Deserialize, Serialize};
use url::Url;

const POSTS_QUERY: &str = "{ posts { id title slug content { html } } }";

/// Educational article from the content API.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: PostContent,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct PostContent {
    pub html: String,
}

#[derive(Debug, Clone)]
pub struct Cms {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl Cms {
    /// Build a CMS client from configuration; both the endpoint and token
    /// are required.
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let endpoint = config
            .cms_endpoint
            .clone()
            .ok_or(FeedError::Configuration("GRAPHCMS_ENDPOINT"))?;
        let token = config
            .cms_token
            .clone()
            .ok_or(FeedError::Configuration("GRAPHCMS_TOKEN"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            token,
        })
    }

    /// Fetch all published posts. GraphQL-level errors on a 2xx response
    /// surface as `UpstreamData`.
    pub async fn posts(&self) -> Result<Vec<Post>, FeedError> {
        let body = serde_json::json!({ "query": POSTS_QUERY });

        let response = check_status(
            self.client
                .post(self.endpoint.clone())
                .bearer_auth(&self.token)
                .json(&body)
                .send()
                .await?,
        )
        .await?;

        let envelope = response
            .json::<GraphQlEnvelope>()
            .await
            .map_err(|error| FeedError::Parse(error.to_string()))?;

        if let Some(error) = envelope.errors.first() {
            return Err(FeedError::UpstreamData(error.message.clone()));
        }

        Ok(envelope.data.map(|data| data.posts).unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<PostsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct PostsData {
    #[serde(default)]
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}
