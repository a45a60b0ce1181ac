//
//  bitly-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Bitly client
//!
//! This module provides the error taxonomy, request payloads and response
//! types shared by every Bitly operation.
//!
//! # Overview
//!
//! - [`LinkError`] - Unified error type for all link operations
//! - [`ShortenRequest`] / [`ExpandRequest`] - Outbound JSON payloads
//! - [`CreateRequest`] / [`UpdateRequest`] - Bitlink create and update payloads
//! - [`ShortenedLink`] / [`ExpandedLink`] - Parsed JSON responses
//! - [`CallResponse`] - Raw result of a generic API call
//!
//! # Example
//!
//! ```rust
//! use bitly_cli::api::common::LinkError;
//!
//! fn handle_result(result: Result<String, LinkError>) {
//!     match result {
//!         Ok(link) => println!("{}", link),
//!         Err(LinkError::Auth) => println!("Please configure an access token first"),
//!         Err(LinkError::Http { status, .. }) => println!("Bitly answered {}", status),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Unified error type for all Bitly link operations.
///
/// | Variant | Raised when | Network call made |
/// |---------|-------------|-------------------|
/// | `Auth` | No access token, or a blank one | No |
/// | `Validation` | Malformed long URL, bitlink or endpoint | No |
/// | `Http` | Bitly answered with a non-2xx status | Yes |
/// | `Parse` | Body is not JSON or lacks the expected field | Yes |
/// | `Network` | Connection, TLS or timeout failure | Yes |
///
/// None of these are retried by the client.
#[derive(Error, Debug)]
pub enum LinkError {
    /// No usable access token was configured for the client.
    #[error(
        "No Bitly access token configured. Set BITLY_ACCESS_TOKEN, pass --token, or add it to ~/.bitly"
    )]
    Auth,

    /// The input was rejected before any request was sent.
    ///
    /// # Parameters
    ///
    /// - `0` - Description of what was wrong with the input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Bitly returned a non-success status code.
    #[error("Bitly API error ({status}): {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// Human readable message extracted from the error body.
        message: String,
        /// The raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body could not be turned into the expected value.
    #[error("Could not parse Bitly response: {0}")]
    Parse(String),

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl LinkError {
    /// Returns the HTTP status carried by an [`LinkError::Http`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for errors raised before any request was sent.
    pub fn is_client_side(&self) -> bool {
        matches!(self, Self::Auth | Self::Validation(_))
    }
}

/// JSON body for `POST /shorten`.
///
/// Optional fields are omitted from the payload when unset so Bitly applies
/// the account defaults.
///
/// # Example
///
/// ```rust
/// use bitly_cli::api::ShortenRequest;
///
/// let request = ShortenRequest::new("https://example.com").domain("bit.ly");
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["domain"], "bit.ly");
/// assert!(body.get("group_guid").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShortenRequest {
    /// The long URL to shorten.
    pub long_url: String,

    /// Group the bitlink is created in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_guid: Option<String>,

    /// Short domain to issue the bitlink on (e.g. `bit.ly` or a branded domain).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl ShortenRequest {
    /// Creates a request for the given long URL with no group or domain.
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Default::default()
        }
    }

    /// Sets the group GUID.
    pub fn group_guid(mut self, group_guid: impl Into<String>) -> Self {
        self.group_guid = Some(group_guid.into());
        self
    }

    /// Sets the short domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// JSON body for `POST /expand`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandRequest {
    /// The normalized bitlink, as `host/path`.
    pub bitlink_id: String,
}

/// JSON body for `POST /bitlinks`.
///
/// Like [`ShortenRequest`] but also carries a title, tags and deeplinks.
/// Unset fields are omitted from the payload.
///
/// # Example
///
/// ```rust
/// use bitly_cli::api::CreateRequest;
///
/// let request = CreateRequest::new("https://example.com")
///     .title("Launch page")
///     .tag("launch");
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["title"], "Launch page");
/// assert_eq!(body["tags"], serde_json::json!(["launch"]));
/// assert!(body.get("deeplinks").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateRequest {
    /// The long URL to shorten.
    pub long_url: String,

    /// Short domain to issue the bitlink on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Title shown in the Bitly dashboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Group the bitlink is created in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_guid: Option<String>,

    /// Tags attached to the bitlink.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Mobile deeplinks, e.g. `{"app_id": "...", "app_uri_path": "..."}`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deeplinks: Vec<Map<String, Value>>,
}

impl CreateRequest {
    /// Creates a request for the given long URL with nothing else set.
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Default::default()
        }
    }

    /// Sets the short domain.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the group GUID.
    pub fn group_guid(mut self, group_guid: impl Into<String>) -> Self {
        self.group_guid = Some(group_guid.into());
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds a deeplink.
    pub fn deeplink(mut self, deeplink: Map<String, Value>) -> Self {
        self.deeplinks.push(deeplink);
        self
    }
}

/// JSON body for `PATCH /bitlinks/{bitlink}`.
///
/// Only the fields that are set are sent, so Bitly leaves the rest
/// untouched. An empty `tags` list clears the tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateRequest {
    /// The bitlink to update; goes into the path, not the body.
    #[serde(skip)]
    pub bitlink: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// New destination URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deeplinks: Option<Vec<Map<String, Value>>>,
}

impl UpdateRequest {
    /// Creates an update for `bitlink` that changes nothing yet.
    pub fn new(bitlink: impl Into<String>) -> Self {
        Self {
            bitlink: bitlink.into(),
            ..Default::default()
        }
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Archives or unarchives the bitlink.
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Replaces the tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Changes the destination URL.
    pub fn long_url(mut self, long_url: impl Into<String>) -> Self {
        self.long_url = Some(long_url.into());
        self
    }

    /// Replaces the deeplinks.
    pub fn deeplinks(mut self, deeplinks: Vec<Map<String, Value>>) -> Self {
        self.deeplinks = Some(deeplinks);
        self
    }

    /// Returns `true` when no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.archived.is_none()
            && self.tags.is_none()
            && self.long_url.is_none()
            && self.deeplinks.is_none()
    }
}

/// Response of `POST /shorten`, also returned by `POST /bitlinks` and
/// `PATCH /bitlinks/{bitlink}`.
///
/// `link` is required; a body without it fails to parse. Fields this type
/// does not name are kept in `extra` so `--json` output stays lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortenedLink {
    /// The short link, e.g. `https://bit.ly/abc`.
    pub link: String,

    /// The bitlink identifier, e.g. `bit.ly/abc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The long URL the bitlink points to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_url: Option<String>,

    /// Creation timestamp as reported by Bitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Any other fields returned by Bitly.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `POST /expand`.
///
/// `long_url` is required; a body without it fails to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedLink {
    /// The original long URL.
    pub long_url: String,

    /// The short link, when Bitly includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// The bitlink identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Creation timestamp as reported by Bitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Any other fields returned by Bitly.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw result of [`BitlyClient::call`](super::BitlyClient::call).
///
/// Unlike `shorten`/`expand`, a generic call does not turn error statuses
/// into errors; callers inspect the status helpers instead.
///
/// # Example
///
/// ```rust
/// use bitly_cli::api::CallResponse;
///
/// let response = CallResponse {
///     body: r#"{"message":"FORBIDDEN"}"#.to_string(),
///     message: "FORBIDDEN".to_string(),
///     description: String::new(),
///     status_code: 403,
/// };
/// assert!(response.is_forbidden());
/// assert!(!response.is_successful());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallResponse {
    /// The response body.
    pub body: String,
    /// Bitly error message, or the reason phrase of an error status. Empty on success.
    pub message: String,
    /// Bitly error description, if any.
    pub description: String,
    /// HTTP status code.
    pub status_code: u16,
}

impl CallResponse {
    /// Returns `true` for any 2xx status.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns `true` for `201 Created`.
    pub fn is_created(&self) -> bool {
        self.status_code == 201
    }

    /// Returns `true` for `400 Bad Request`.
    pub fn is_bad_request(&self) -> bool {
        self.status_code == 400
    }

    /// Returns `true` for `402`, which Bitly sends when the plan does not cover the endpoint.
    pub fn is_upgrade_required(&self) -> bool {
        self.status_code == 402
    }

    /// Returns `true` for `403 Forbidden`.
    pub fn is_forbidden(&self) -> bool {
        self.status_code == 403
    }

    /// Returns `true` for `404 Not Found`.
    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    /// Returns `true` for `410 Gone`.
    pub fn is_gone(&self) -> bool {
        self.status_code == 410
    }

    /// Returns `true` for `417 Expectation Failed`.
    pub fn is_expectation_failed(&self) -> bool {
        self.status_code == 417
    }

    /// Returns `true` for `422 Unprocessable Entity`.
    pub fn is_unprocessable_entity(&self) -> bool {
        self.status_code == 422
    }

    /// Returns `true` for `429 Too Many Requests`.
    pub fn is_too_many_requests(&self) -> bool {
        self.status_code == 429
    }

    /// Returns `true` for `500 Internal Server Error`.
    pub fn is_internal_error(&self) -> bool {
        self.status_code == 500
    }

    /// Returns `true` for `503 Service Unavailable`.
    pub fn is_temporarily_unavailable(&self) -> bool {
        self.status_code == 503
    }
}
