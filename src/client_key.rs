use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use std::convert::Infallible;
use std::net::SocketAddr;

// All unidentified callers share this bucket
pub const ANONYMOUS_KEY: &str = "anonymous";

// First x-forwarded-for hop, then x-real-ip, then the peer address, then
// anonymous. The peer is only known when serving with connect info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl ClientKey {
    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let forwarded = header(headers, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let key = forwarded
            .or_else(|| header(headers, "x-real-ip"))
            .map(str::to_string)
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| ANONYMOUS_KEY.to_string());

        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<S: Send + Sync> FromRequestParts<S> for ClientKey {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self::resolve(&parts.headers, peer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn first_forwarded_hop_wins() {
        let h = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1"), ("x-real-ip", "10.0.0.2")]);
        assert_eq!(ClientKey::resolve(&h, None).as_str(), "203.0.113.7");
    }

    #[test]
    fn real_ip_is_next() {
        let h = headers(&[("x-real-ip", "198.51.100.4")]);
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        assert_eq!(ClientKey::resolve(&h, Some(peer)).as_str(), "198.51.100.4");
    }

    #[test]
    fn peer_address_without_port() {
        let peer: SocketAddr = "192.0.2.9:41000".parse().unwrap();
        assert_eq!(ClientKey::resolve(&HeaderMap::new(), Some(peer)).as_str(), "192.0.2.9");
    }

    #[test]
    fn blank_headers_fall_through_to_anonymous() {
        let h = headers(&[("x-forwarded-for", " "), ("x-real-ip", "")]);
        assert_eq!(ClientKey::resolve(&h, None).as_str(), ANONYMOUS_KEY);
    }
}
