//
//  teamcity-cli
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The client never talks to `reqwest` directly. It hands a fully composed
//! [`TransportRequest`] to an [`HttpTransport`] and gets back the raw status,
//! content type and body. Status handling, caching and decoding all happen in
//! the client, so any transport only has to move bytes.
//!
//! [`ReqwestTransport`] is the default, built on `reqwest::blocking`. Tests
//! and embedders can supply their own implementation, e.g. a stub that counts
//! calls or a `reqwest` client configured to trust a private CA.
//!
//! ## Example
//!
//! ```rust
//! use teamcity_cli::api::transport::{
//!     BoxError, HttpTransport, TransportRequest, TransportResponse,
//! };
//!
//! struct Canned;
//!
//! impl HttpTransport for Canned {
//!     fn execute(&self, _request: TransportRequest) -> Result<TransportResponse, BoxError> {
//!         Ok(TransportResponse {
//!             status: 200,
//!             content_type: Some("application/json".to_string()),
//!             body: br#"{"version":"2024.12"}"#.to_vec(),
//!         })
//!     }
//! }
//! ```

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// Boxed error produced by a transport.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// HTTP verbs used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully composed request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: Url,
    /// Header name/value pairs (`Accept`, `Authorization`, `User-Agent`, ...).
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// The value of the first header called `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response as received, before any status handling.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Executes HTTP requests synchronously.
///
/// Implementations must return `Err` only when no response was obtained
/// (DNS, connect, TLS, timeout). Every received response, whatever its
/// status, is returned as `Ok`.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BoxError>;
}

/// The default transport over `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport, optionally bounding every request by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend could not be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self, BoxError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wraps a caller-configured client (custom roots, proxies, ...).
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes()?.to_vec();

        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = TransportRequest {
            method: HttpMethod::Get,
            url: Url::parse("http://localhost/app/rest/").unwrap(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_reqwest_transport_builds() {
        assert!(ReqwestTransport::new(Some(Duration::from_secs(5))).is_ok());
    }
}
