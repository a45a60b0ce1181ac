//
//  bitly-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the Bitly v4 REST API at
//! `api-ssl.bitly.com/v4`.
//!
//! ## Architecture
//!
//! - [`client`]: HTTP client with authentication, `shorten`, `expand`,
//!   bitlink create/update and raw `call`
//! - [`bitlink`]: Pure classification and normalization helpers
//! - [`common`]: Error taxonomy and request/response types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitly_cli::api::{BitlyClient, ClientOptions};
//! use bitly_cli::auth::TokenResolver;
//!
//! let client = BitlyClient::from_resolver(
//!     &TokenResolver::standard(None),
//!     ClientOptions::default(),
//! )
//! .expect("Failed to create client");
//! ```
//!
//! ## Error Handling
//!
//! Failures are returned as [`LinkError`] variants:
//!
//! - `Auth`: no access token configured (no request sent)
//! - `Validation`: malformed URL or bitlink (no request sent)
//! - `Http`: non-2xx status, with status code and body
//! - `Parse`: body is not JSON or misses the expected field
//! - `Network`: transport failure

/// Core HTTP client for the Bitly API.
pub mod client;

/// Bitlink detection, normalization and URL validation.
pub mod bitlink;

/// Types shared by every operation.
pub mod common;

pub use client::{BitlyClient, ClientOptions, API_BASE_URL, DEFAULT_TIMEOUT};

pub use common::{
    CallResponse, CreateRequest, ExpandRequest, ExpandedLink, LinkError, ShortenRequest,
    ShortenedLink, UpdateRequest,
};
