//! Domain extraction from free-form input.
//!
//! Decides whether a submitted string is URL-shaped and, if so, reduces it to
//! a normalized hostname used as the reputation lookup key.

use url::Url;

/// Extracts a normalized domain from free-form input.
///
/// Evaluated in order, first match wins:
///
/// 1. Input starting with `http://` or `https://` (any case) is parsed as a URL.
/// 2. Input without whitespace that contains a `.` is parsed as `https://` + input.
/// 3. Anything else (or any parse failure) is a headline and yields `None`.
///
/// Never fails: parse errors are treated as "no domain".
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_domain("https://www.bbc.com/news"), Some("bbc.com".into()));
/// assert_eq!(extract_domain("bbc.com/news"), Some("bbc.com".into()));
/// assert_eq!(extract_domain("Scientists discover water"), None);
/// ```
pub fn extract_domain(input: &str) -> Option<String> {
    let raw = input.trim();

    if raw.is_empty() {
        return None;
    }

    if has_http_scheme(raw)
        && let Some(domain) = host_of(raw)
    {
        return Some(domain);
    }

    if !raw.chars().any(char::is_whitespace) && raw.contains('.') {
        return host_of(&format!("https://{raw}"));
    }

    None
}

/// Lower-cases a hostname and strips one leading `m.` then one leading `www.`.
pub fn normalize_hostname(host: &str) -> String {
    let host = host.trim().to_lowercase();
    let host = host.strip_prefix("m.").unwrap_or(&host);
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.to_string()
}

fn has_http_scheme(raw: &str) -> bool {
    let starts_with = |prefix: &str| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };

    starts_with("http://") || starts_with("https://")
}

fn host_of(candidate: &str) -> Option<String> {
    let url = Url::parse(candidate).ok()?;
    let host = url.host_str()?;

    if host.is_empty() {
        return None;
    }

    Some(normalize_hostname(host))
}
