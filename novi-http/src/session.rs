use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Per-request client context used to derive a stable session identity.
#[derive(Debug, Clone)]
pub struct ClientFingerprint {
    /// First hop of X-Forwarded-For when a front door is present, otherwise
    /// the socket peer address
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
    /// The gateway's own trace id for this request
    pub request_id: String,
}

impl ClientFingerprint {
    pub fn new(headers: &HeaderMap, peer: Option<SocketAddr>, request_id: Uuid) -> Self {
        let source_ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .or_else(|| peer.map(|p| p.ip().to_string()));

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .filter(|v| !v.is_empty());

        Self {
            source_ip,
            user_agent,
            request_id: request_id.to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for ClientFingerprint
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(Self::new(&parts.headers, peer, Uuid::new_v4()))
    }
}

/// Resolve the conversation-session identity for a request.
///
/// Priority: a caller-supplied id wins verbatim; otherwise a deterministic
/// digest of (source ip, user agent); otherwise the request trace id. Never
/// fails — a request with no usable context still gets a fresh identity.
/// The digest is a convenience key, not a security boundary.
pub fn resolve_session_id(supplied: Option<&str>, fingerprint: &ClientFingerprint) -> String {
    if let Some(id) = supplied {
        if !id.is_empty() {
            return id.to_string();
        }
    }

    if let Some(ip) = &fingerprint.source_ip {
        let ua = fingerprint.user_agent.as_deref().unwrap_or("");
        let digest = Sha256::digest(format!("{ip}-{ua}").as_bytes());
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        return format!("session-{}", &hex[..16]);
    }

    if fingerprint.request_id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        fingerprint.request_id.clone()
    }
}
