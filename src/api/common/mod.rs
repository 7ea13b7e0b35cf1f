//
//  teamcity-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the TeamCity REST API
//!
//! This module provides the types shared by every layer of the client: the
//! error taxonomy, content-type negotiation, request bodies and the raw
//! response returned by write operations.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ContentType`] - Media types used for `Accept` and `Content-Type`
//! - [`RequestBody`] - An encoded request payload
//! - [`ApiResponse`] - Status, content type and body of a completed call
//!
//! # Example
//!
//! ```rust
//! use teamcity_cli::api::common::ApiError;
//!
//! fn describe(result: Result<(), ApiError>) -> &'static str {
//!     match result {
//!         Ok(()) => "ok",
//!         Err(ApiError::NotAuthenticated) => "connect first",
//!         Err(ApiError::NotFound { .. }) => "missing, create it",
//!         Err(ApiError::Authorization { .. }) => "check your permissions",
//!         Err(_) => "failed",
//!     }
//! }
//!
//! assert_eq!(describe(Err(ApiError::NotFound { status: 404 })), "missing, create it");
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Unified error type for all TeamCity API operations.
///
/// | Variant | Raised when | HTTP Status |
/// |---------|-------------|-------------|
/// | `InvalidLocator` | A locator lacks a required discriminating dimension | N/A |
/// | `NotAuthenticated` | A call is made before any credential was set | N/A |
/// | `Connectivity` | DNS, connect or timeout failure before a response | N/A |
/// | `Authorization` | Bad credentials or forbidden operation | 401, 403 |
/// | `NotFound` | The resource does not exist | 404 |
/// | `Transport` | Any other non-success status | other |
/// | `Deserialization` | The body did not decode into the requested shape | N/A |
/// | `Serialization` | A request body could not be encoded | N/A |
/// | `InvalidConfiguration` | Host or URL settings are unusable | N/A |
///
/// # Notes
///
/// - Nothing in the client retries; every failure reaches the caller.
/// - `NotFound` and `Authorization` stay distinct so callers can implement
///   "create if missing" logic.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The locator did not contain a dimension the server requires.
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    /// No credential was configured on the client.
    ///
    /// Raised on the client side before any request is sent.
    #[error("Not authenticated: connect with credentials, an access token or as guest first")]
    NotAuthenticated,

    /// The request never produced a response.
    #[error("Could not reach the TeamCity server: {source}")]
    Connectivity {
        /// The underlying transport failure.
        #[source]
        source: crate::api::transport::BoxError,
    },

    /// The server rejected the credentials (401) or the operation (403).
    #[error("Authorization failed (HTTP {status})")]
    Authorization {
        /// Either 401 or 403.
        status: u16,
    },

    /// The server answered 404.
    #[error("Resource not found (HTTP {status})")]
    NotFound {
        /// Always 404.
        status: u16,
    },

    /// Any other non-success status, with the raw body for diagnostics.
    #[error("HTTP {status}: {}", summarize_error_body(.body))]
    Transport {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Could not decode response: {0}")]
    Deserialization(String),

    /// The request body could not be encoded.
    #[error("Could not encode request: {0}")]
    Serialization(String),

    /// Client settings such as the host are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ApiError {
    /// Maps a non-success HTTP status to its error variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Authorization { status },
            404 => Self::NotFound { status },
            _ => Self::Transport { status, body },
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authorization { status }
            | Self::NotFound { status }
            | Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the failure came from an HTTP status rather than the client
    /// or the network.
    pub fn is_http_status(&self) -> bool {
        self.status().is_some()
    }
}

/// Result alias used throughout the API layer.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Extracts a readable message from a TeamCity error body.
///
/// TeamCity answers failures with a plain-text body such as:
///
/// ```text
/// Error has occurred during request processing (Not Found).
/// Error: jetbrains.buildServer.server.rest.errors.NotFoundException: No build type found by id 'X'.
/// ```
///
/// The `Error:` line is preferred, with the exception class stripped. JSON
/// bodies of the form `{"message": "..."}` are also understood. Anything else
/// falls back to the first non-empty line.
pub fn summarize_error_body(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    if let Some(line) = body
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("Error: "))
    {
        let detail = &line["Error: ".len()..];
        // "some.package.SomeException: message" -> "message"
        return match detail.split_once(": ") {
            Some((class, message)) if !class.contains(' ') => message.to_string(),
            _ => detail.to_string(),
        };
    }

    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("(empty body)")
        .to_string()
}

/// Media types exchanged with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    /// `application/json`
    #[default]
    Json,
    /// `application/xml`
    Xml,
    /// `text/plain`
    Text,
}

impl ContentType {
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::Text => "text/plain",
        }
    }

    /// Detects the media type from a `Content-Type` header value such as
    /// `application/json;charset=UTF-8`.
    pub fn from_header(value: &str) -> Option<Self> {
        let essence = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence.ends_with("json") {
            Some(Self::Json)
        } else if essence.ends_with("xml") {
            Some(Self::Xml)
        } else if essence.starts_with("text/") {
            Some(Self::Text)
        } else {
            None
        }
    }
}

/// Decodes a response body into `T`.
///
/// The response's own `Content-Type` decides the decoder; when it is missing
/// or not structured, the format that was requested via `Accept` is used.
pub fn decode_body<T: DeserializeOwned>(
    body: &[u8],
    content_type: Option<&str>,
    requested: ContentType,
) -> ApiResult<T> {
    let format = match content_type.and_then(ContentType::from_header) {
        Some(ContentType::Text) | None => requested,
        Some(format) => format,
    };

    match format {
        ContentType::Json | ContentType::Text => serde_json::from_slice(body)
            .map_err(|e| ApiError::Deserialization(format!("invalid JSON body: {e}"))),
        ContentType::Xml => {
            let text = std::str::from_utf8(body)
                .map_err(|e| ApiError::Deserialization(format!("XML body is not UTF-8: {e}")))?;
            quick_xml::de::from_str(text)
                .map_err(|e| ApiError::Deserialization(format!("invalid XML body: {e}")))
        }
    }
}

/// An encoded request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    content_type: ContentType,
    bytes: Vec<u8>,
}

impl RequestBody {
    /// An `application/xml` body, e.g. `<user username="alice"/>`.
    pub fn xml(document: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Xml,
            bytes: document.into().into_bytes(),
        }
    }

    /// A `text/plain` body, as used for single-value settings.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Text,
            bytes: value.into().into_bytes(),
        }
    }

    /// An `application/json` body serialized from `value`.
    pub fn json<T: Serialize>(value: &T) -> ApiResult<Self> {
        let bytes = serde_json::to_vec(value).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(Self {
            content_type: ContentType::Json,
            bytes,
        })
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// The outcome of a successful call, as returned by write operations.
///
/// Some TeamCity writes report success only through the status code and an
/// empty or unstructured body, so nothing is decoded eagerly.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The HTTP status code (always 2xx).
    pub status: u16,
    /// The response `Content-Type`, if the server sent one.
    pub content_type: Option<String>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// The body as UTF-8 text, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body, falling back to `requested` when the server sent no
    /// usable content type.
    pub fn decode<T: DeserializeOwned>(&self, requested: ContentType) -> ApiResult<T> {
        decode_body(&self.body, self.content_type.as_deref(), requested)
    }
}
