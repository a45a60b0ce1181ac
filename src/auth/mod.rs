//
//  bitly-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Bitly authenticates every API call with a bearer token. This module owns
//! the [`AccessToken`] type and the [`TokenResolver`] that finds one.
//!
//! ## Resolution Order
//!
//! 1. An explicit token (constructor argument or `--token`)
//! 2. The `BITLY_ACCESS_TOKEN` environment variable
//! 3. The `~/.bitly` dotfile
//!
//! The first source holding a non-blank token wins. A missing token is not
//! an error at resolution time; the client reports [`LinkError::Auth`]
//! when an operation is attempted without one.
//!
//! [`LinkError::Auth`]: crate::api::LinkError::Auth
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitly_cli::auth::{TokenResolver, TokenSource};
//!
//! let resolver = TokenResolver::new()
//!     .with_source(TokenSource::Environment("MY_BITLY_TOKEN".to_string()))
//!     .with_source(TokenSource::file_with_key("/etc/bitly/app.properties", "bitly.token"));
//!
//! match resolver.resolve() {
//!     Some(token) => println!("Using token {}", token.masked()),
//!     None => eprintln!("No token configured"),
//! }
//! ```

mod token;

pub use token::*;

use std::fmt;

use reqwest::RequestBuilder;

/// An opaque Bitly API access token.
///
/// The token is held for the lifetime of a client and never rotated. Its
/// `Debug` output is masked so it does not leak into logs.
///
/// # Example
///
/// ```rust
/// use bitly_cli::auth::AccessToken;
///
/// let token = AccessToken::new("  0123456789abcdef  ");
/// assert_eq!(token.expose(), "0123456789abcdef");
/// assert_eq!(format!("{:?}", token), "AccessToken(0123...cdef)");
/// assert!(AccessToken::default().is_blank());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a token, trimming surrounding whitespace.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Returns `true` when the token is empty.
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Masks the token for display (shows first and last 4 characters).
    pub fn masked(&self) -> String {
        mask_token(&self.0)
    }

    /// Adds the `Authorization: Bearer <token>` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({})", self.masked())
    }
}

/// Masks a token for display (shows first and last 4 characters).
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token(""), "");
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("abcdefghijkl"), "abcd...ijkl");
    }

    #[test]
    fn test_access_token_trims() {
        let token = AccessToken::new("\ttoken-value\n");
        assert_eq!(token.expose(), "token-value");
        assert!(AccessToken::new("   ").is_blank());
    }
}
