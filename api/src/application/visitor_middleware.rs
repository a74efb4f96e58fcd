use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use nutriscan_core::domain::visitor::{ports::VisitorService, value_objects::ResolveVisitorInput};
use tracing::error;
use uuid::Uuid;

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const SESSION_ID_HEADER: &str = "x-session-id";
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// Visitor context stored in request extensions
#[derive(Clone, Debug)]
pub struct VisitorContext {
    pub visitor_id: Uuid,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Session id from `X-Session-Id`, falling back to `X-Device-Id`.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    header_value(headers, SESSION_ID_HEADER).or_else(|| header_value(headers, DEVICE_ID_HEADER))
}

/// First `X-Forwarded-For` hop when present, else the peer address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    header_value(headers, "x-forwarded-for")
        .and_then(|forwarded| {
            forwarded
                .split(',')
                .next()
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
                .map(str::to_string)
        })
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Resolves the calling visitor and stores a [`VisitorContext`] for handlers.
pub async fn visitor_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = req.headers();
    let session_id = session_id(headers).ok_or_else(|| {
        ApiError::BadRequest("Missing X-Session-Id or X-Device-Id header".to_string())
    })?;

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let input = ResolveVisitorInput {
        session_id,
        ip_address: client_ip(headers, peer),
        user_agent: header_value(headers, "user-agent"),
    };

    let visitor = state.service.resolve_visitor(input).await.map_err(|e| {
        error!("Failed to resolve visitor: {}", e);
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(VisitorContext {
        visitor_id: visitor.id,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn session_header_wins_over_device_header() {
        let mut headers = HeaderMap::new();
        headers.insert(DEVICE_ID_HEADER, HeaderValue::from_static("device-1"));
        assert_eq!(session_id(&headers).as_deref(), Some("device-1"));

        headers.insert(SESSION_ID_HEADER, HeaderValue::from_static("session-1"));
        assert_eq!(session_id(&headers).as_deref(), Some("session-1"));
    }

    #[test]
    fn blank_session_header_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(session_id(&headers), None);
    }

    #[test]
    fn client_ip_prefers_first_forwarded_hop() {
        let peer: SocketAddr = "10.0.0.9:5555".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("10.0.0.9"));

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("203.0.113.7"));
    }
}
