/// Login cookie handling
///
/// The browser only ever holds the random session token. This module reads
/// it from the `Cookie` header, builds the `Set-Cookie` values for login and
/// logout, and resolves a request to its stored [`Session`].

use axum::http::{header, HeaderMap, HeaderValue};
use taskdesk_shared::{auth::session_token::is_well_formed, models::session::Session};

use crate::{
    app::AppState,
    config::SessionConfig,
    error::{PageError, PageResult},
};

/// Extracts the value of cookie `name` from the request headers
///
/// Every `Cookie` header is searched; the first match wins.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
}

/// `Set-Cookie` value that stores a fresh session token
pub fn session_cookie(config: &SessionConfig, token: &str) -> PageResult<HeaderValue> {
    let max_age = config.ttl().num_seconds();
    cookie_header(format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
        config.cookie_name,
        token,
        max_age,
        secure_suffix(config)
    ))
}

/// `Set-Cookie` value that removes the session cookie
pub fn expired_session_cookie(config: &SessionConfig) -> PageResult<HeaderValue> {
    cookie_header(format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax{}",
        config.cookie_name,
        secure_suffix(config)
    ))
}

fn secure_suffix(config: &SessionConfig) -> &'static str {
    if config.secure_cookie {
        "; Secure"
    } else {
        ""
    }
}

fn cookie_header(value: String) -> PageResult<HeaderValue> {
    HeaderValue::from_str(&value)
        .map_err(|e| PageError::Internal(format!("invalid Set-Cookie value: {}", e)))
}

/// The session token carried by the request, if it looks like one
///
/// Malformed values are ignored without touching the database.
pub fn session_token(state: &AppState, headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, &state.config.session.cookie_name).filter(|token| is_well_formed(token))
}

/// Resolves the request's cookie to an unexpired session
pub async fn current_session(state: &AppState, headers: &HeaderMap) -> PageResult<Option<Session>> {
    match session_token(state, headers) {
        Some(token) => Ok(Session::find_active(&state.db, &token).await?),
        None => Ok(None),
    }
}
