//! Target URL validation and normalization.
//!
//! Users may submit URLs with or without a scheme (`example.com/page`). Both
//! functions treat a missing scheme as `https://`; only `http` and `https`
//! targets are ever accepted.

use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;
use url::{Host, Url};

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// A single DNS label: alphanumerics and inner hyphens, at most 63 characters.
static LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").unwrap());

/// Top-level domain: alphabetic, or a punycode `xn--` label.
static TLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z]{2,63}|xn--[a-z0-9-]{2,59})$").unwrap());

/// Returns true if `raw` has an `http://` or `https://` prefix.
fn has_scheme(raw: &str) -> bool {
    raw.starts_with(HTTP_PREFIX) || raw.starts_with(HTTPS_PREFIX)
}

/// Checks whether `raw` is an acceptable target URL.
///
/// # Rules
///
/// 1. Input is trimmed; empty input is rejected
/// 2. No whitespace or control characters inside the URL
/// 3. A missing scheme is assumed to be `https://` for validation only
/// 4. Only `http` and `https` schemes are accepted
/// 5. Host must be an IP literal or a domain with a valid alphabetic TLD
///    (`localhost` and `intranet` are rejected)
/// 6. IPv4 hosts must be written as a full dotted quad (`1.2.3` and
///    `0x7f.1` are rejected)
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("example.com"));
/// assert!(is_valid_url("https://example.com/path?q=1"));
/// assert!(!is_valid_url("localhost:3000"));
/// assert!(!is_valid_url("ftp://example.com"));
/// ```
pub fn is_valid_url(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
    {
        return false;
    }

    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{HTTPS_PREFIX}{trimmed}")
    };

    let Ok(url) = Url::parse(&candidate) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        Some(Host::Ipv4(_)) => raw_host(&candidate).parse::<Ipv4Addr>().is_ok(),
        Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// Host text exactly as submitted, before WHATWG IPv4 shorthand expansion.
fn raw_host(candidate: &str) -> &str {
    let after_scheme = candidate
        .split_once("://")
        .map_or(candidate, |(_, rest)| rest);
    let authority = after_scheme
        .split(['/', '\\', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);

    host_port.split(':').next().unwrap_or_default()
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };

    TLD_REGEX.is_match(tld) && rest.iter().all(|label| LABEL_REGEX.is_match(label))
}

/// Prepends `https://` when `raw` has no scheme.
///
/// Does not validate; call [`is_valid_url`] first.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("  example.com "), "https://example.com");
/// assert_eq!(normalize_url("http://example.com"), "http://example.com");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();

    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{HTTPS_PREFIX}{trimmed}")
    }
}

/// Returns true if a stored target can be used as a `Location` header.
pub fn has_redirectable_scheme(url: &str) -> bool {
    has_scheme(url.trim())
}
