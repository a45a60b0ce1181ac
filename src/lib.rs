//
//  bitly-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitly CLI Library
//!
//! A thin client for the [Bitly v4 API](https://dev.bitly.com/api-reference)
//! and the library behind the `bitly` command.
//!
//! ## Overview
//!
//! The library turns long URLs into bitlinks and bitlinks back into long
//! URLs. Each operation is a single authenticated HTTP round trip; there are
//! no retries and no shared mutable state, so one [`BitlyClient`] can be
//! used from many tasks at once.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: The Bitly HTTP client, request/response types and bitlink helpers
//! - [`auth`]: Access token type and the token resolution chain
//! - [`config`]: Optional preferences file
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitly_cli::api::BitlyClient;
//! use bitly_cli::auth::TokenResolver;
//!
//! # async fn example() -> Result<(), bitly_cli::api::LinkError> {
//! let token = TokenResolver::standard(None).resolve().unwrap_or_default();
//! let client = BitlyClient::new(token)?;
//!
//! let short = client.shorten("https://example.com/some/long/path").await?;
//! let long = client.expand(&short).await?;
//! println!("{short} <-- {long}");
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the root command, the link shortening/expansion entry point and
/// the `update`, `api`, `config` and `completion` subcommands.
pub mod cli;

/// Bitly API client.
///
/// Provides the [`BitlyClient`] with `shorten`/`expand`, the raw `call`
/// escape hatch, the [`api::LinkError`] taxonomy and the pure bitlink
/// classification helpers.
pub mod api;

/// Access token handling.
///
/// Resolves the token from an explicit value, the `BITLY_ACCESS_TOKEN`
/// environment variable or the `~/.bitly` dotfile, in that order.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's preferences stored in platform-specific locations:
/// - Linux: `~/.config/bitly/config.toml`
/// - macOS: `~/Library/Application Support/bitly/config.toml`
/// - Windows: `%APPDATA%\bitly\config.toml`
pub mod config;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the Bitly API client.
pub use api::BitlyClient;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "bitly";

/// Application version constant.
///
/// ```rust
/// use bitly_cli::VERSION;
///
/// println!("bitly version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Example
///
/// ```rust,no_run
/// use bitly_cli::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// At least one link could not be shortened or expanded, or an API
    /// call failed. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// No URLs were given. Use `--help` to see correct usage.
    pub const USAGE: i32 = 2;

    /// No access token could be resolved.
    ///
    /// Set `BITLY_ACCESS_TOKEN`, pass `--token`, or write the token to `~/.bitly`.
    pub const AUTH_ERROR: i32 = 4;
}
