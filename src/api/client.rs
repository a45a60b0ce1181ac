//
//  bitly-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Bitly API
//!
//! This module provides the client used to shorten and expand links. Each
//! operation is one authenticated request against `https://api-ssl.bitly.com/v4`
//! with a JSON body, and one string field pulled out of the JSON response.
//!
//! ## Features
//!
//! - Bearer token authentication
//! - Input validation before any network call
//! - Typed errors for auth, validation, HTTP status and parse failures
//! - Configurable base URL, timeout and User-Agent
//! - Bitlink creation with title, tags and deeplinks, and bitlink updates
//! - A raw [`BitlyClient::call`] for endpoints without a typed wrapper

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::bitlink::{normalize_bitlink, to_endpoint, validate_long_url};
use super::common::{
    CallResponse, CreateRequest, ExpandRequest, ExpandedLink, LinkError, ShortenRequest,
    ShortenedLink, UpdateRequest,
};
use crate::auth::{AccessToken, TokenResolver};

/// The Bitly API base URL.
pub const API_BASE_URL: &str = "https://api-ssl.bitly.com/v4";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts `message` and `description` from a Bitly error body.
///
/// Bitly returns errors in the format:
/// ```json
/// {"message": "FORBIDDEN", "description": "You do not have access to this resource."}
/// ```
///
/// Either value is `None` when the body is not JSON or the key is absent.
pub fn parse_error_body(body: &str) -> (Option<String>, Option<String>) {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return (None, None);
    };

    let field = |key: &str| {
        json.get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    (field("message"), field("description"))
}

/// Builds a [`LinkError::Http`] from a non-success response.
///
/// The message is taken from Bitly's JSON error body when present, then the
/// raw body, then the status reason phrase.
pub fn format_api_error(status: StatusCode, body: &str) -> LinkError {
    let message = match parse_error_body(body) {
        (Some(message), Some(description)) => format!("{} ({})", message, description),
        (Some(message), None) => message,
        (None, Some(description)) => description,
        (None, None) if !body.trim().is_empty() => body.trim().to_string(),
        (None, None) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
    };

    LinkError::Http {
        status: status.as_u16(),
        message,
        body: body.to_string(),
    }
}

/// Transport and default request settings for a [`BitlyClient`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bitly_cli::api::ClientOptions;
///
/// let options = ClientOptions {
///     timeout: Duration::from_secs(5),
///     domain: Some("bit.ly".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(options.base_url, "https://api-ssl.bitly.com/v4");
/// ```
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL; overridden in tests to point at a mock server.
    pub base_url: String,

    /// Per-request timeout. Must not be zero.
    pub timeout: Duration,

    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Group GUID applied to shorten requests that do not set one.
    pub group_guid: Option<String>,

    /// Short domain applied to shorten requests that do not set one.
    pub domain: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("{}/{}", crate::APP_NAME, crate::VERSION),
            group_guid: None,
            domain: None,
        }
    }
}

/// The client for shortening and expanding links.
///
/// Holds an immutable access token and a pooled `reqwest` client, so a single
/// instance can be cloned and shared across tasks.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use bitly_cli::api::BitlyClient;
/// use bitly_cli::auth::AccessToken;
///
/// # async fn example() -> Result<(), bitly_cli::api::LinkError> {
/// let client = BitlyClient::new(AccessToken::new("your-token"))?;
/// let link = client.shorten("https://example.com/a/very/long/path").await?;
/// println!("{}", link);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// A client may be built without a token. Operations then fail with
/// [`LinkError::Auth`] before any request is sent.
#[derive(Debug, Clone)]
pub struct BitlyClient {
    /// The underlying HTTP client
    http: Client,
    /// The access token, possibly blank
    token: AccessToken,
    /// Base URL, timeout and request defaults
    options: ClientOptions,
}

impl BitlyClient {
    /// Creates a client with default options.
    pub fn new(token: AccessToken) -> Result<Self, LinkError> {
        Self::with_options(token, ClientOptions::default())
    }

    /// Creates a client with the given options.
    ///
    /// # Errors
    ///
    /// - [`LinkError::Validation`] if `options.timeout` is zero
    /// - [`LinkError::Network`] if the HTTP client could not be built
    pub fn with_options(token: AccessToken, options: ClientOptions) -> Result<Self, LinkError> {
        if options.timeout.is_zero() {
            return Err(LinkError::Validation(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let http = Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            http,
            token,
            options,
        })
    }

    /// Creates a client with the first token found by `resolver`.
    ///
    /// When no token is found the client is still created and reports
    /// [`LinkError::Auth`] on use.
    pub fn from_resolver(resolver: &TokenResolver, options: ClientOptions) -> Result<Self, LinkError> {
        Self::with_options(resolver.resolve().unwrap_or_default(), options)
    }

    /// Returns the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.options.base_url
    }

    /// Returns the options this client was built with.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Returns `true` if a non-blank token is configured.
    pub fn has_token(&self) -> bool {
        !self.token.is_blank()
    }

    fn require_token(&self) -> Result<&AccessToken, LinkError> {
        if self.token.is_blank() {
            Err(LinkError::Auth)
        } else {
            Ok(&self.token)
        }
    }

    /// Shortens a long URL and returns the bitlink.
    ///
    /// # Errors
    ///
    /// - [`LinkError::Validation`] if `long_url` is empty or not an absolute URL
    /// - [`LinkError::Auth`] if no token is configured
    /// - [`LinkError::Http`] if Bitly answers with a non-2xx status
    /// - [`LinkError::Parse`] if the body is not JSON or has no `link`
    pub async fn shorten(&self, long_url: &str) -> Result<String, LinkError> {
        let shortened = self.shorten_link(&ShortenRequest::new(long_url)).await?;
        Ok(shortened.link)
    }

    /// Shortens a long URL and returns the full response.
    ///
    /// Group and domain fall back to the client defaults when the request
    /// leaves them unset.
    pub async fn shorten_link(&self, request: &ShortenRequest) -> Result<ShortenedLink, LinkError> {
        validate_long_url(&request.long_url)?;
        let token = self.require_token()?;

        let payload = ShortenRequest {
            long_url: request.long_url.trim().to_string(),
            group_guid: request
                .group_guid
                .clone()
                .or_else(|| self.options.group_guid.clone()),
            domain: request.domain.clone().or_else(|| self.options.domain.clone()),
        };

        self.send(token, Method::POST, "/shorten", &payload).await
    }

    /// Creates a bitlink with a title, tags and deeplinks.
    ///
    /// Group and domain fall back to the client defaults like
    /// [`shorten_link`](Self::shorten_link).
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`shorten`](Self::shorten).
    pub async fn create_link(&self, request: &CreateRequest) -> Result<ShortenedLink, LinkError> {
        validate_long_url(&request.long_url)?;
        let token = self.require_token()?;

        let mut payload = request.clone();
        payload.long_url = request.long_url.trim().to_string();
        if payload.group_guid.is_none() {
            payload.group_guid = self.options.group_guid.clone();
        }
        if payload.domain.is_none() {
            payload.domain = self.options.domain.clone();
        }

        self.send(token, Method::POST, "/bitlinks", &payload).await
    }

    /// Updates the title, tags, archive flag, deeplinks or destination of a
    /// bitlink and returns the updated bitlink.
    ///
    /// # Errors
    ///
    /// [`LinkError::Validation`] if the bitlink does not normalize, the new
    /// long URL is invalid, or nothing would change. Otherwise the same
    /// taxonomy as [`shorten`](Self::shorten).
    pub async fn update_link(&self, request: &UpdateRequest) -> Result<ShortenedLink, LinkError> {
        let bitlink_id = normalize_bitlink(&request.bitlink)?;
        if let Some(long_url) = &request.long_url {
            validate_long_url(long_url)?;
        }
        if request.is_empty() {
            return Err(LinkError::Validation(format!(
                "nothing to update for '{}'",
                bitlink_id
            )));
        }
        let token = self.require_token()?;

        let path = format!("/bitlinks/{}", bitlink_id);
        self.send(token, Method::PATCH, &path, request).await
    }

    /// Expands a bitlink and returns the long URL.
    ///
    /// `bitlink` may be bare (`bit.ly/abc`) or a full URL; it is normalized to
    /// `host/path` before sending.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`shorten`](Self::shorten), with [`LinkError::Parse`]
    /// raised when the body has no `long_url`.
    pub async fn expand(&self, bitlink: &str) -> Result<String, LinkError> {
        let expanded = self.expand_link(bitlink).await?;
        Ok(expanded.long_url)
    }

    /// Expands a bitlink and returns the full response.
    pub async fn expand_link(&self, bitlink: &str) -> Result<ExpandedLink, LinkError> {
        let bitlink_id = normalize_bitlink(bitlink)?;
        let token = self.require_token()?;

        self.send(token, Method::POST, "/expand", &ExpandRequest { bitlink_id })
            .await
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        token: &AccessToken,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, LinkError> {
        let url = to_endpoint(&self.options.base_url, path);
        tracing::debug!("{} {}", method, url);

        let request = self.http.request(method.clone(), &url).json(body);
        let response = token.apply_to_request(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!("{} {} returned {}", method, url, status);

        if !status.is_success() {
            return Err(format_api_error(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| LinkError::Parse(e.to_string()))
    }

    /// Executes an arbitrary API call.
    ///
    /// `endpoint` is either a full URL or a path relative to the base URL.
    /// GET and HEAD send `params` as the query string, DELETE sends no body,
    /// every other method sends `params` as a JSON object.
    ///
    /// Error statuses are returned inside the [`CallResponse`] rather than as
    /// errors. `message` and `description` stay empty on success.
    ///
    /// # Errors
    ///
    /// - [`LinkError::Validation`] if `endpoint` is blank
    /// - [`LinkError::Auth`] if no token is configured
    /// - [`LinkError::Network`] if the request could not be sent
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bitly_cli::api::BitlyClient;
    /// use bitly_cli::auth::AccessToken;
    /// use reqwest::Method;
    ///
    /// # async fn example() -> Result<(), bitly_cli::api::LinkError> {
    /// let client = BitlyClient::new(AccessToken::new("your-token"))?;
    /// let response = client.call(Method::GET, "/user", &Default::default()).await?;
    /// if response.is_successful() {
    ///     println!("{}", response.body);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        params: &Map<String, Value>,
    ) -> Result<CallResponse, LinkError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(LinkError::Validation(
                "a valid API endpoint must be specified".to_string(),
            ));
        }
        let token = self.require_token()?;

        let url = to_endpoint(&self.options.base_url, endpoint);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), &url);
        if method == Method::GET || method == Method::HEAD {
            if !params.is_empty() {
                let query: Vec<(&str, String)> = params
                    .iter()
                    .map(|(k, v)| match v {
                        Value::String(s) => (k.as_str(), s.clone()),
                        other => (k.as_str(), other.to_string()),
                    })
                    .collect();
                request = request.query(&query);
            }
        } else if method != Method::DELETE {
            request = request.json(params);
        }

        let response = token.apply_to_request(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("{} {} returned {}", method, url, status);

        if status.is_success() {
            return Ok(CallResponse {
                body,
                message: String::new(),
                description: String::new(),
                status_code: status.as_u16(),
            });
        }

        let (message, description) = parse_error_body(&body);
        Ok(CallResponse {
            body,
            message: message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string()),
            description: description.unwrap_or_default(),
            status_code: status.as_u16(),
        })
    }
}
