//
//  bitly-cli
//  api/bitlink.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitlink Classification
//!
//! Pure helpers that decide what an input string is and bring it into the
//! shape the Bitly API expects. Nothing here performs I/O, so every rule is
//! testable on its own.
//!
//! ## Detection
//!
//! [`is_bitlink`] is a substring heuristic against a list of short domains
//! (`bit.ly` by default). Branded short domains are only recognized when they
//! are configured, and ownership of the domain is never checked.
//!
//! ```rust
//! use bitly_cli::api::bitlink::{is_bitlink, normalize_bitlink};
//!
//! assert!(is_bitlink("https://bit.ly/3abcd", &["bit.ly"]));
//! assert!(!is_bitlink("https://example.com/page", &["bit.ly"]));
//!
//! assert_eq!(normalize_bitlink("https://bit.ly/3abcd?x=1").unwrap(), "bit.ly/3abcd");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::LinkError;

/// The short domain Bitly issues links on by default.
pub const DEFAULT_SHORT_DOMAIN: &str = "bit.ly";

/// Matches a leading `http://` or `https://`, in any letter case.
static SCHEME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[Hh][Tt]{2}[Pp][Ss]?://").unwrap());

/// Returns `true` when `input` looks like a bitlink on one of `short_domains`.
///
/// The match is a case-insensitive substring test. Empty domains never match.
pub fn is_bitlink<S: AsRef<str>>(input: &str, short_domains: &[S]) -> bool {
    let input = input.to_ascii_lowercase();
    short_domains
        .iter()
        .map(|d| d.as_ref().trim())
        .filter(|d| !d.is_empty())
        .any(|d| input.contains(&d.to_ascii_lowercase()))
}

/// Removes a leading `http(s)://` scheme.
///
/// ```rust
/// use bitly_cli::api::bitlink::remove_http;
///
/// assert_eq!(remove_http("HTTPS://bit.ly/abc"), "bit.ly/abc");
/// assert_eq!(remove_http("bit.ly/abc"), "bit.ly/abc");
/// ```
pub fn remove_http(input: &str) -> &str {
    match SCHEME_PATTERN.find(input) {
        Some(m) => &input[m.end()..],
        None => input,
    }
}

/// Normalizes a bitlink to the `host/path` form used as `bitlink_id`.
///
/// Accepts a bare `bit.ly/abc` or a full URL. The scheme, query string,
/// fragment and trailing slash are dropped and the host is lowercased. The
/// path keeps its case since bitlink hashes are case sensitive.
///
/// # Errors
///
/// Returns [`LinkError::Validation`] for empty input, input that is not a
/// host plus path, input that does not parse as a URL, schemes other than
/// `http(s)`, and hosts carrying a port or user info.
pub fn normalize_bitlink(input: &str) -> Result<String, LinkError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LinkError::Validation("bitlink must not be empty".to_string()));
    }

    let bare = remove_http(trimmed);
    if bare.contains("://") {
        return Err(LinkError::Validation(format!(
            "'{}' is not a valid bitlink: only http and https are supported",
            trimmed
        )));
    }

    let authority = bare.split(&['/', '?', '#'][..]).next().unwrap_or_default();
    if authority.contains('@') {
        return Err(LinkError::Validation(format!(
            "'{}' is not a valid bitlink: user info is not allowed",
            trimmed
        )));
    }
    if authority.contains(':') {
        return Err(LinkError::Validation(format!(
            "'{}' is not a valid bitlink: a port is not allowed",
            trimmed
        )));
    }
    let url = Url::parse(&format!("https://{}", bare))
        .map_err(|e| LinkError::Validation(format!("'{}' is not a valid bitlink: {}", trimmed, e)))?;

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => {
            return Err(LinkError::Validation(format!(
                "'{}' is not a valid bitlink: missing host",
                trimmed
            )))
        }
    };

    let path = url.path().trim_end_matches('/');
    if path.is_empty() {
        return Err(LinkError::Validation(format!(
            "'{}' is not a valid bitlink: missing path",
            trimmed
        )));
    }

    Ok(format!("{}{}", host, path))
}

/// Checks that `input` is an absolute URL with a host.
///
/// # Errors
///
/// Returns [`LinkError::Validation`] for empty input, relative URLs and
/// host-less URLs such as `mailto:` links.
pub fn validate_long_url(input: &str) -> Result<Url, LinkError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LinkError::Validation("long URL must not be empty".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| {
        LinkError::Validation(format!("'{}' is not a valid absolute URL: {}", trimmed, e))
    })?;

    if !url.has_host() {
        return Err(LinkError::Validation(format!(
            "'{}' is not a valid absolute URL: missing host",
            trimmed
        )));
    }

    Ok(url)
}

/// Joins an API endpoint onto `base_url`.
///
/// Full `http(s)://` URLs are returned unchanged. Paths are joined with
/// exactly one slash whether or not they start with one.
///
/// ```rust
/// use bitly_cli::api::bitlink::to_endpoint;
///
/// let base = "https://api-ssl.bitly.com/v4";
/// assert_eq!(to_endpoint(base, "/shorten"), "https://api-ssl.bitly.com/v4/shorten");
/// assert_eq!(to_endpoint(base, "expand"), "https://api-ssl.bitly.com/v4/expand");
/// assert_eq!(to_endpoint(base, "https://example.com/x"), "https://example.com/x");
/// ```
pub fn to_endpoint(base_url: &str, endpoint: &str) -> String {
    if SCHEME_PATTERN.is_match(endpoint) {
        endpoint.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
