//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// How client IPs are determined for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimiting {
    /// No rate limiting (tests, or when a proxy already enforces limits).
    Disabled,
    /// Key by the socket peer address.
    PeerIp,
    /// Key by `X-Forwarded-For` / `X-Real-IP` / `Forwarded`, falling back to the peer.
    ProxyHeaders,
}

impl RateLimiting {
    /// Proxy headers are only trusted behind a known reverse proxy.
    pub fn from_behind_proxy(behind_proxy: bool) -> Self {
        if behind_proxy {
            Self::ProxyHeaders
        } else {
            Self::PeerIp
        }
    }
}

/// Token bucket settings.
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    /// Interval after which one request is replenished.
    pub replenish_ms: u64,
    pub burst: u32,
}

/// General limit: 120 requests per minute, burst 120.
pub const GENERAL: Quota = Quota {
    replenish_ms: 500,
    burst: 120,
};

/// Stricter limit for credential endpoints: 10 requests per minute, burst 10.
pub const AUTH: Quota = Quota {
    replenish_ms: 6_000,
    burst: 10,
};

/// Applies a per-client-IP limit to every route of `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let auth = limit(auth_routes(), AUTH, RateLimiting::PeerIp);
/// ```
pub fn limit(router: Router<AppState>, quota: Quota, mode: RateLimiting) -> Router<AppState> {
    match mode {
        RateLimiting::Disabled => router,
        RateLimiting::PeerIp => router.layer(governor_layer(quota, PeerIpKeyExtractor)),
        RateLimiting::ProxyHeaders => router.layer(governor_layer(quota, SmartIpKeyExtractor)),
    }
}

fn governor_layer<K: KeyExtractor>(
    quota: Quota,
    key_extractor: K,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_millisecond(quota.replenish_ms)
            .burst_size(quota.burst)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
