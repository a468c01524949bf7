//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::Span;

type MakeSpan = fn(&Request<Body>) -> Span;
type OnResponse = fn(&Response<Body>, Duration, &Span);

/// Tracing layer type produced by [`layer`].
pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeSpan,
    tower_http::trace::DefaultOnRequest,
    OnResponse,
    tower_http::trace::DefaultOnBodyChunk,
    tower_http::trace::DefaultOnEos,
    (),
>;

/// Creates a tracing middleware for HTTP requests.
///
/// Every request gets an `http` span carrying the method and path. Responses
/// are logged at `INFO` with status and latency; redirects additionally log
/// their `Location`. Error details for 5xx responses are logged by
/// [`crate::error::AppError`] itself.
///
/// # Example Logs
///
/// ```text
/// INFO http{method=GET path=/abc1234}: response status=302 latency_ms=3 location=https://example.com
/// INFO http{method=POST path=/api/links}: response status=201 latency_ms=12
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpan)
        .on_response(on_response as OnResponse)
        .on_failure(())
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

fn on_response(response: &Response<Body>, latency: Duration, _span: &Span) {
    let status = response.status();
    let latency_ms = latency.as_millis() as u64;

    if status.is_redirection() {
        let location = response
            .headers()
            .get(axum::http::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        tracing::info!(status = status.as_u16(), latency_ms, location, "response");
    } else {
        tracing::info!(status = status.as_u16(), latency_ms, "response");
    }
}

