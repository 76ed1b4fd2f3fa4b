use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chartfeed::FeedError;
use serde_json::json;

/// API error wrapper mapping pipeline failures onto HTTP responses with a
/// `{"error": ...}` JSON body.
#[derive(Debug)]
pub struct ApiError(pub FeedError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FeedError::UpstreamHttp { .. }
            | FeedError::UpstreamData(_)
            | FeedError::Transport(_)
            | FeedError::Parse(_) => StatusCode::BAD_GATEWAY,
            FeedError::EmptyResult => StatusCode::NOT_FOUND,
            FeedError::Configuration(_) | FeedError::Url(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl From<FeedError> for ApiError {
    fn from(error: FeedError) -> Self {
        Self(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        struct TestCase {
            input: FeedError,
            expected: StatusCode,
        }

        let tests = vec![
            TestCase {
                // TC0: upstream transport status -> 502
                input: FeedError::UpstreamHttp {
                    status: 500,
                    body: String::new(),
                },
                expected: StatusCode::BAD_GATEWAY,
            },
            TestCase {
                // TC1: in-band provider error -> 502
                input: FeedError::UpstreamData("rate limited".to_string()),
                expected: StatusCode::BAD_GATEWAY,
            },
            TestCase {
                // TC2: missing credential -> 500
                input: FeedError::Configuration("RAPIDAPI_KEY"),
                expected: StatusCode::INTERNAL_SERVER_ERROR,
            },
            TestCase {
                // TC3: empty result -> 404
                input: FeedError::EmptyResult,
                expected: StatusCode::NOT_FOUND,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let response = ApiError(test.input).into_response();
            assert_eq!(response.status(), test.expected, "TC{} failed", index);
        }
    }
}
