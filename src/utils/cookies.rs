//! Session cookie helpers.
//!
//! Browser callers carry their session in a `session` cookie. These helpers
//! read it from a `Cookie` header and build the matching `Set-Cookie` values.

use axum::http::{HeaderMap, header::COOKIE};

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// Extracts a cookie value from the request headers.
///
/// Handles multiple cookies in one header and multiple `Cookie` headers.
/// Empty values are treated as absent.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Builds the `Set-Cookie` value that stores a session token.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age={max_age_secs}; SameSite=Lax"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
