//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// Creates a tracing middleware for HTTP requests.
///
/// Spans are opened at `INFO` with method, URI, and HTTP version. Responses
/// are logged at `INFO` with status and latency in milliseconds; 5xx
/// responses are additionally reported as failures at `ERROR`.
///
/// Headers are not recorded, so bearer tokens never reach the logs.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/api/v1/bookmarks version=HTTP/1.1}: started processing request
/// INFO request{method=POST uri=/api/v1/bookmarks version=HTTP/1.1}: finished processing request latency=12 ms status=201
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
