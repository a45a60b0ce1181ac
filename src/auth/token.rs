//
//  bitly-cli
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Resolution
//!
//! An ordered fallback chain of [`TokenSource`]s. Each source can be read on
//! its own, which keeps the precedence rules testable without touching the
//! real environment or home directory.
//!
//! ## Dotfile Format
//!
//! `~/.bitly` is a properties-style file:
//!
//! ```text
//! # Bitly generic access token
//! BITLY_ACCESS_TOKEN=0123456789abcdef
//! ```
//!
//! A file containing only the bare token on its first non-comment line is
//! accepted too. Other files may store the token under a different key, see
//! [`TokenSource::file_with_key`].

use std::path::PathBuf;

use directories::BaseDirs;

use super::AccessToken;

/// The access token environment variable.
pub const ENV_ACCESS_TOKEN: &str = "BITLY_ACCESS_TOKEN";

/// File name of the per-user token dotfile, relative to the home directory.
pub const DOTFILE_NAME: &str = ".bitly";

/// Validates the format of a token string.
///
/// This is a format check only: the token must be non-empty and must not
/// contain whitespace.
///
/// ```rust
/// use bitly_cli::auth::validate_token;
///
/// assert!(validate_token("0123456789abcdef"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Returns the path of the `~/.bitly` dotfile, if a home directory is known.
pub fn default_dotfile_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DOTFILE_NAME))
}

/// Extracts the token stored under `key` from dotfile content.
///
/// Lines starting with `#` or `!` are comments. `key=value` and `key: value`
/// are both accepted. When no line carries `key`, the first non-comment line
/// without a separator is taken as a bare token.
///
/// ```rust
/// use bitly_cli::auth::parse_dotfile;
///
/// assert_eq!(
///     parse_dotfile("# token\nBITLY_ACCESS_TOKEN = abc123\n", "BITLY_ACCESS_TOKEN"),
///     Some("abc123".to_string())
/// );
/// assert_eq!(parse_dotfile("abc123\n", "BITLY_ACCESS_TOKEN"), Some("abc123".to_string()));
/// assert_eq!(parse_dotfile("OTHER=1\n", "BITLY_ACCESS_TOKEN"), None);
/// ```
pub fn parse_dotfile(content: &str, key: &str) -> Option<String> {
    let mut bare = None;

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        match line.find(&['=', ':'][..]) {
            Some(idx) => {
                if line[..idx].trim() == key {
                    let value = line[idx + 1..].trim();
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
            None => {
                if bare.is_none() {
                    bare = Some(line.to_string());
                }
            }
        }
    }

    bare
}

/// One place an access token may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// A token passed directly by the caller.
    Explicit(String),

    /// A token read from the named environment variable.
    Environment(String),

    /// A token stored under `key` in a properties-style file at `path`.
    File {
        /// Path of the file.
        path: PathBuf,
        /// Property holding the token.
        key: String,
    },
}

impl TokenSource {
    /// The `BITLY_ACCESS_TOKEN` environment variable source.
    pub fn environment() -> Self {
        Self::Environment(ENV_ACCESS_TOKEN.to_string())
    }

    /// A file source keyed by `BITLY_ACCESS_TOKEN`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::file_with_key(path, ENV_ACCESS_TOKEN)
    }

    /// A file source keyed by `key`.
    pub fn file_with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Reads the token from this source.
    ///
    /// Returns `None` when the source is absent or holds only whitespace.
    /// An unreadable dotfile is logged and treated as absent.
    pub fn read(&self) -> Option<String> {
        let value = match self {
            Self::Explicit(token) => Some(token.clone()),
            Self::Environment(name) => std::env::var(name).ok(),
            Self::File { path, key } => {
                if !path.exists() {
                    return None;
                }
                match std::fs::read_to_string(path) {
                    Ok(content) => parse_dotfile(&content, key),
                    Err(e) => {
                        tracing::warn!("Could not read {}: {}", path.display(), e);
                        None
                    }
                }
            }
        };

        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Short description used in log messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(_) => "explicit token".to_string(),
            Self::Environment(name) => format!("environment variable {}", name),
            Self::File { path, .. } => format!("file {}", path.display()),
        }
    }
}

/// Ordered chain of token sources; the first usable token wins.
///
/// # Example
///
/// ```rust
/// use bitly_cli::auth::{TokenResolver, TokenSource};
///
/// let resolver = TokenResolver::new()
///     .with_source(TokenSource::Explicit("   ".to_string()))
///     .with_source(TokenSource::Explicit("second".to_string()));
///
/// assert_eq!(resolver.resolve().unwrap().expose(), "second");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    sources: Vec<TokenSource>,
}

impl TokenResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard chain: `explicit`, then `BITLY_ACCESS_TOKEN`,
    /// then `~/.bitly`.
    pub fn standard(explicit: Option<String>) -> Self {
        let mut resolver = Self::new();
        if let Some(token) = explicit {
            resolver = resolver.with_source(TokenSource::Explicit(token));
        }
        resolver = resolver.with_source(TokenSource::environment());
        if let Some(path) = default_dotfile_path() {
            resolver = resolver.with_source(TokenSource::file(path));
        }
        resolver
    }

    /// Appends a source at the lowest precedence.
    pub fn with_source(mut self, source: TokenSource) -> Self {
        self.sources.push(source);
        self
    }

    /// The sources in precedence order.
    pub fn sources(&self) -> &[TokenSource] {
        &self.sources
    }

    /// Returns the first well-formed token, or `None`.
    ///
    /// Values containing whitespace are skipped with a warning.
    pub fn resolve(&self) -> Option<AccessToken> {
        for source in &self.sources {
            let Some(token) = source.read() else {
                continue;
            };

            if !validate_token(&token) {
                tracing::warn!("Ignoring malformed token from {}", source.describe());
                continue;
            }

            tracing::debug!("Using access token from {}", source.describe());
            return Some(AccessToken::new(token));
        }

        tracing::debug!("No access token found in {} source(s)", self.sources.len());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotfile_properties() {
        let content = "! legacy comment\n# comment\n\nBITLY_ACCESS_TOKEN: tok-1\n";
        assert_eq!(parse_dotfile(content, ENV_ACCESS_TOKEN), Some("tok-1".to_string()));
    }

    #[test]
    fn test_parse_dotfile_prefers_key_over_bare() {
        let content = "bare-token\nBITLY_ACCESS_TOKEN=keyed-token\n";
        assert_eq!(parse_dotfile(content, ENV_ACCESS_TOKEN), Some("keyed-token".to_string()));
    }

    #[test]
    fn test_parse_dotfile_empty_value() {
        assert_eq!(parse_dotfile("BITLY_ACCESS_TOKEN=\n", ENV_ACCESS_TOKEN), None);
        assert_eq!(parse_dotfile("", ENV_ACCESS_TOKEN), None);
    }

    #[test]
    fn test_environment_source() {
        let name = "BITLY_CLI_TEST_ENV_SOURCE";
        std::env::set_var(name, " env-token ");
        assert_eq!(
            TokenSource::Environment(name.to_string()).read(),
            Some("env-token".to_string())
        );
        std::env::remove_var(name);
        assert_eq!(TokenSource::Environment(name.to_string()).read(), None);
    }

    #[test]
    fn test_missing_file_source() {
        let source = TokenSource::file("/nonexistent/dir/.bitly");
        assert_eq!(source.read(), None);
    }

    #[test]
    fn test_file_source_keyed_and_bare() {
        let dir = tempfile::tempdir().unwrap();

        let keyed = dir.path().join("keyed");
        std::fs::write(&keyed, "# token\nBITLY_ACCESS_TOKEN = file-token\n").unwrap();
        assert_eq!(TokenSource::file(&keyed).read(), Some("file-token".to_string()));

        let bare = dir.path().join("bare");
        std::fs::write(&bare, "! comment\n  bare-token  \n").unwrap();
        assert_eq!(TokenSource::file(&bare).read(), Some("bare-token".to_string()));
    }

    #[test]
    fn test_file_source_custom_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.properties");
        std::fs::write(
            &path,
            "BITLY_ACCESS_TOKEN=default-token\nbitly.token: custom-token\n",
        )
        .unwrap();

        assert_eq!(
            TokenSource::file_with_key(&path, "bitly.token").read(),
            Some("custom-token".to_string())
        );
        assert_eq!(TokenSource::file(&path).read(), Some("default-token".to_string()));
        assert_eq!(TokenSource::file_with_key(&path, "other.key").read(), None);
    }

    #[test]
    fn test_malformed_file_token_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bitly");
        std::fs::write(&path, "BITLY_ACCESS_TOKEN=has space\n").unwrap();

        let resolver = TokenResolver::new()
            .with_source(TokenSource::file(&path))
            .with_source(TokenSource::Explicit("fallback".to_string()));
        assert_eq!(resolver.resolve(), Some(AccessToken::new("fallback")));
    }

    #[test]
    fn test_environment_beats_file() {
        let name = "BITLY_CLI_TEST_ENV_BEATS_FILE";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bitly");
        std::fs::write(&path, "BITLY_ACCESS_TOKEN=file-token\n").unwrap();

        let resolver = TokenResolver::new()
            .with_source(TokenSource::Environment(name.to_string()))
            .with_source(TokenSource::file(&path));

        std::env::set_var(name, "env-token");
        assert_eq!(resolver.resolve(), Some(AccessToken::new("env-token")));

        std::env::remove_var(name);
        assert_eq!(resolver.resolve(), Some(AccessToken::new("file-token")));
    }

    #[test]
    fn test_resolver_order() {
        let resolver = TokenResolver::new()
            .with_source(TokenSource::Environment("BITLY_CLI_TEST_UNSET_VAR".to_string()))
            .with_source(TokenSource::Explicit("has space".to_string()))
            .with_source(TokenSource::Explicit("winner".to_string()))
            .with_source(TokenSource::Explicit("loser".to_string()));

        assert_eq!(resolver.resolve(), Some(AccessToken::new("winner")));
    }

    #[test]
    fn test_standard_chain_order() {
        let resolver = TokenResolver::standard(Some("explicit".to_string()));
        assert_eq!(resolver.sources()[0], TokenSource::Explicit("explicit".to_string()));
        assert_eq!(resolver.sources()[1], TokenSource::environment());

        let resolver = TokenResolver::standard(None);
        assert_eq!(resolver.sources()[0], TokenSource::environment());
        if let Some(path) = default_dotfile_path() {
            assert_eq!(resolver.sources()[1], TokenSource::file(path));
        }
    }

    #[test]
    fn test_empty_resolver() {
        assert_eq!(TokenResolver::new().resolve(), None);
    }
}
