use crate::config::SessionConfig;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::fmt;
use std::sync::Arc;

/// Opaque per-browser session key (a UUIDv4 string)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Only well-formed UUIDs are accepted
    pub fn parse(raw: &str) -> Option<Self> {
        uuid::Uuid::parse_str(raw.trim())
            .ok()
            .map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find a cookie value by name in a `Cookie` header
fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

fn set_cookie(config: &SessionConfig, session: &SessionId) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/",
        config.cookie_name, session
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Session middleware
///
/// Resolves the session from the cookie, issuing a fresh one (and a
/// `Set-Cookie` header) when it is missing or invalid. The resolved
/// [`SessionId`] is attached to the request extensions.
pub async fn session_middleware(
    State(config): State<Arc<SessionConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = req
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|h| cookie_value(h, &config.cookie_name))
        .and_then(SessionId::parse);

    let (session, issued) = match existing {
        Some(session) => (session, false),
        None => (SessionId::generate(), true),
    };

    req.extensions_mut().insert(session.clone());
    let mut response = next.run(req).await;

    if issued {
        match HeaderValue::from_str(&set_cookie(&config, &session)) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
                tracing::debug!(session = %session, "Issued new session");
            }
            Err(e) => tracing::warn!(error = %e, "Session cookie is not a valid header value"),
        }
    }

    response
}
