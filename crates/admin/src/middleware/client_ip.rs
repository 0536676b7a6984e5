//! Client IP extraction behind Cloudflare and other proxies.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

/// Best-known client IP for the request, rendered as a string.
///
/// Proxy headers are checked first, then the socket peer. Falls back to
/// `"unknown"` so visit recording never fails on this.
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        let ip = ip_from_headers(&parts.headers)
            .or(peer)
            .map_or_else(|| "unknown".to_string(), |ip| ip.to_string());

        Ok(Self(ip))
    }
}

/// Client IP from proxy headers: `CF-Connecting-IP`, the first
/// `X-Forwarded-For` hop, `X-Real-IP`, then `Fly-Client-IP`.
#[must_use]
pub fn ip_from_headers(headers: &HeaderMap) -> Option<IpAddr> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    header("cf-connecting-ip")
        .and_then(|s| s.trim().parse().ok())
        .or_else(|| {
            header("x-forwarded-for")
                .and_then(|s| s.split(',').next())
                .and_then(|s| s.trim().parse().ok())
        })
        .or_else(|| header("x-real-ip").and_then(|s| s.trim().parse().ok()))
        .or_else(|| header("fly-client-ip").and_then(|s| s.trim().parse().ok()))
}
