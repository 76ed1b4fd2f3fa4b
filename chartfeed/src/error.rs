use thiserror::Error;

/// All errors generated in `chartfeed`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
pub enum FeedError {
    /// Upstream answered with a non-2xx transport status.
    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// Upstream answered 2xx but the payload carried a provider error envelope.
    #[error("upstream returned an error payload: {0}")]
    UpstreamData(String),

    /// A required credential or endpoint was not configured.
    #[error("missing required configuration: {0}")]
    Configuration(&'static str),

    /// Upstream succeeded but returned zero rows.
    #[error("upstream returned an empty result")]
    EmptyResult,

    /// The request failed before any status was received.
    #[error("failed to reach upstream: {0}")]
    Transport(String),

    /// A 2xx payload could not be decoded into the expected shape.
    #[error("failed to decode upstream payload: {0}")]
    Parse(String),

    /// An endpoint URL could not be constructed.
    #[error("invalid upstream url: {0}")]
    Url(String),
}

impl FeedError {
    /// Determine if an error is a soft, display-only condition that a widget
    /// should render as "no data available" rather than a failure state.
    pub fn is_soft(&self) -> bool {
        matches!(self, FeedError::EmptyResult)
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

impl From<url::ParseError> for FeedError {
    fn from(value: url::ParseError) -> Self {
        Self::Url(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_is_soft() {
        struct TestCase {
            input: FeedError,
            expected: bool,
        }

        let tests = vec![
            TestCase {
                // TC0: empty result is soft
                input: FeedError::EmptyResult,
                expected: true,
            },
            TestCase {
                // TC1: transport status failure is hard
                input: FeedError::UpstreamHttp {
                    status: 503,
                    body: "service unavailable".to_string(),
                },
                expected: false,
            },
            TestCase {
                // TC2: in-band provider error is hard
                input: FeedError::UpstreamData("limit exceeded".to_string()),
                expected: false,
            },
            TestCase {
                // TC3: missing credential is hard
                input: FeedError::Configuration("RAPIDAPI_KEY"),
                expected: false,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = test.input.is_soft();
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_upstream_http_display_includes_status_and_body() {
        let error = FeedError::UpstreamHttp {
            status: 429,
            body: "rate limited".to_string(),
        };
        let rendered = error.to_string();
        assert!(rendered.contains("429"));
        assert!(rendered.contains("rate limited"));
    }
}
