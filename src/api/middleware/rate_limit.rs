//! Rate limiting middleware using token bucket algorithm.

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Keys requests by client IP.
///
/// Behind a trusted proxy the IP comes from `X-Forwarded-For`, `X-Real-IP`
/// or `Forwarded` (falling back to the peer address); otherwise only the
/// socket peer address is used, so clients cannot spoof their key.
#[derive(Debug, Clone, Copy)]
pub struct ClientIpKeyExtractor {
    behind_proxy: bool,
}

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.behind_proxy {
            SmartIpKeyExtractor.extract(req)
        } else {
            PeerIpKeyExtractor.extract(req)
        }
    }
}

pub type RateLimitLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates the limiter for the credential endpoints under `/api/v1/auth`.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Peer
/// addresses require the server to run with `into_make_service_with_connect_info`.
///
/// Returns `None`, after logging, if the limiter cannot be configured.
pub fn auth_layer(behind_proxy: bool) -> Option<RateLimitLayer> {
    build(ClientIpKeyExtractor { behind_proxy }, 1, 10)
}

fn build(
    key_extractor: ClientIpKeyExtractor,
    per_second: u64,
    burst_size: u32,
) -> Option<RateLimitLayer> {
    let Some(config) = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
    else {
        tracing::error!(per_second, burst_size, "Invalid rate limiter configuration");
        return None;
    };

    Some(GovernorLayer::new(Arc::new(config)))
}
