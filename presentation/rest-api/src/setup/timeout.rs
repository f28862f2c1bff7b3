use std::{sync::Arc, time::Duration};

use poem::{Endpoint, IntoResponse, Request, Response, http::StatusCode};
use poem_openapi::payload::Json;
use tracing::warn;

use crate::api::error::{ErrorResponse, TIMEOUT};

/// Runs the request under `limit`. On expiry the in-flight future, including
/// any database or blob I/O it owns, is dropped and a 503 is returned.
pub async fn with_timeout<E: Endpoint>(
    endpoint: Arc<E>,
    request: Request,
    limit: Duration,
) -> poem::Result<Response> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(limit, endpoint.call(request)).await {
        Ok(result) => result.map(IntoResponse::into_response),
        Err(_) => {
            warn!(%method, %uri, timeout_secs = limit.as_secs(), "Request timed out");
            Ok(timeout_response())
        }
    }
}

pub fn timeout_response() -> Response {
    Json(ErrorResponse::new(TIMEOUT, "Request timed out"))
        .with_status(StatusCode::SERVICE_UNAVAILABLE)
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use poem::{EndpointExt, handler};

    #[handler]
    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "done"
    }

    #[handler]
    async fn fast() -> &'static str {
        "done"
    }

    #[tokio::test]
    async fn should_answer_503_when_handler_overruns() {
        let endpoint = slow.around(|ep, req| with_timeout(ep, req, Duration::from_millis(20)));
        let response = endpoint.call(Request::default()).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn should_pass_through_fast_handlers() {
        let endpoint = fast.around(|ep, req| with_timeout(ep, req, Duration::from_secs(1)));
        let response = endpoint.call(Request::default()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
