//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-client-IP rate limiter layer.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP rate limiter.
///
/// Each client IP gets a bucket of `burst` requests refilled at
/// `per_second` requests per second. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// The client IP is the socket peer address, so the server must be served
/// with `into_make_service_with_connect_info::<SocketAddr>`.
///
/// # Errors
///
/// Returns an error if either value is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{short_url}", get(redirect_handler))
///     .layer(rate_limit::layer(5, 50)?);
/// ```
pub fn layer(per_second: u64, burst: u32) -> anyhow::Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Rate limit values must be greater than zero"))?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
