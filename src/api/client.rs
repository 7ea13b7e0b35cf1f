//
//  teamcity-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the TeamCity REST API
//!
//! [`TeamCityClient`] is the request caller every accessor goes through. It
//! composes URLs, attaches credentials, consults the response cache on GET,
//! runs the request on its [`HttpTransport`] and maps failures to
//! [`ApiError`].
//!
//! ## URL Layout
//!
//! ```text
//! scheme://host[:port][/context]/[guestAuth/]app/rest/[version/]path[?locator=...][&fields=...]
//! ```
//!
//! - `guestAuth/` is present only for guest connections.
//! - The version segment is present only after [`TeamCityClient::use_version`].
//! - `fields` is omitted when the selection is empty.
//!
//! ## Features
//!
//! - Basic, bearer-token and guest authentication
//! - JSON and XML responses, chosen by `Accept` and decoded by `Content-Type`
//! - Opt-in caching of GET bodies, cleared by every write
//! - Injectable transport for tests and custom TLS setups

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::cache::{CacheEntry, CacheKey, ResponseCache};
use super::common::{ApiError, ApiResponse, ApiResult, ContentType, RequestBody};
use super::path::ResourcePath;
use super::transport::{HttpMethod, HttpTransport, ReqwestTransport, TransportRequest};
use crate::auth::Credential;
use crate::config::ServerConfig;
use crate::fields::Fields;

/// The main client for a TeamCity server.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use teamcity_cli::api::TeamCityClient;
///
/// let mut client = TeamCityClient::new("teamcity.example.com", true)?;
/// client.connect_with_access_token("eyJ0eXAiOiAiVENWMiJ9...");
///
/// let server = client.server().info()?;
/// println!("TeamCity {}", server.version.unwrap_or_default());
/// # Ok::<(), teamcity_cli::api::ApiError>(())
/// ```
///
/// # Notes
///
/// - Setup calls (`connect*`, `use_version`, `use_user_agent`) take
///   `&mut self` and are meant to run before requests are issued.
/// - The client is `Send + Sync`; the cache is guarded by a mutex.
pub struct TeamCityClient {
    /// Server root, e.g. `https://ci.example.com/`
    base: Url,
    credential: Credential,
    api_version: Option<String>,
    user_agent: String,
    transport: Arc<dyn HttpTransport>,
    cache: Arc<ResponseCache>,
}

impl TeamCityClient {
    /// Creates a client for `host` with the default `reqwest` transport.
    ///
    /// `host` may be a bare host (`ci.example.com`), a host with port
    /// (`ci.example.com:8111`), or a full URL. A scheme in `host` takes
    /// precedence over `use_ssl`. A path after the host is kept as the
    /// server's context path.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidConfiguration`] for an empty or unparsable host.
    pub fn new(host: &str, use_ssl: bool) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(None).map_err(|e| {
            ApiError::InvalidConfiguration(format!("could not create HTTP client: {e}"))
        })?;
        Self::with_transport(host, use_ssl, Arc::new(transport))
    }

    /// Creates a client that sends every request through `transport`.
    pub fn with_transport(
        host: &str,
        use_ssl: bool,
        transport: Arc<dyn HttpTransport>,
    ) -> ApiResult<Self> {
        Ok(Self {
            base: server_root(host, use_ssl)?,
            credential: Credential::None,
            api_version: None,
            user_agent: format!("{}/{}", crate::APP_NAME, crate::VERSION),
            transport,
            cache: Arc::new(ResponseCache::new()),
        })
    }

    /// Creates a client from configuration, including its credential.
    ///
    /// Credentials are picked in order: token, username and password, guest.
    /// With none of them the client stays unauthenticated.
    pub fn from_config(config: &ServerConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(config.timeout_secs.map(Duration::from_secs))
            .map_err(|e| {
                ApiError::InvalidConfiguration(format!("could not create HTTP client: {e}"))
            })?;

        let mut client = Self::with_transport(&config.host, config.use_ssl, Arc::new(transport))?;
        if let Some(port) = config.port {
            client = client.with_port(port)?;
        }
        if let Some(version) = &config.api_version {
            client.use_version(version);
        }
        if let Some(agent) = &config.user_agent {
            client.use_user_agent(agent);
        }
        client.credential = config.auth.credential();
        if config.cache {
            client.enable_cache();
        }
        Ok(client)
    }

    /// Overrides the port of the server URL.
    pub fn with_port(mut self, port: u16) -> ApiResult<Self> {
        self.base.set_port(Some(port)).map_err(|()| {
            ApiError::InvalidConfiguration(format!("cannot set a port on {}", self.base))
        })?;
        Ok(self)
    }

    /// Uses `cache` instead of a private store, e.g. to share it between
    /// clients.
    pub fn with_cache(mut self, cache: Arc<ResponseCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Connects with a username and password (HTTP basic authentication).
    pub fn connect(&mut self, username: &str, password: &str) {
        self.credential = Credential::basic(username, password);
    }

    /// Connects with an access token (bearer authentication).
    pub fn connect_with_access_token(&mut self, token: &str) {
        self.credential = Credential::bearer(token);
    }

    /// Connects anonymously through the server's guest account.
    pub fn connect_as_guest(&mut self) {
        self.credential = Credential::Guest;
    }

    /// Replaces the credential outright.
    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
    }

    /// Pins the REST API version, e.g. `2018.1` or `latest`. An empty
    /// string removes the pin.
    pub fn use_version(&mut self, version: &str) {
        let version = version.trim().trim_matches('/');
        self.api_version = if version.is_empty() {
            None
        } else {
            Some(version.to_string())
        };
    }

    pub fn use_user_agent(&mut self, user_agent: &str) {
        self.user_agent = user_agent.to_string();
    }

    pub fn enable_cache(&self) {
        self.cache.enable();
    }

    /// Disables the cache and drops its entries.
    pub fn disable_cache(&self) {
        self.cache.disable();
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The server root URL.
    pub fn server_url(&self) -> &Url {
        &self.base
    }

    /// Composes the absolute URL for a REST path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use teamcity_cli::api::TeamCityClient;
    /// use teamcity_cli::fields;
    ///
    /// let mut client = TeamCityClient::new("ci.example.com", true)?;
    /// client.connect_as_guest();
    /// client.use_version("2018.1");
    ///
    /// let url = client.url_for(&"server".into(), &fields![version])?;
    /// assert_eq!(
    ///     url.as_str(),
    ///     "https://ci.example.com/guestAuth/app/rest/2018.1/server?fields=version"
    /// );
    /// # Ok::<(), teamcity_cli::api::ApiError>(())
    /// ```
    pub fn url_for(&self, path: &ResourcePath, fields: &Fields) -> ApiResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ApiError::InvalidConfiguration(format!("{} cannot be used as a base URL", self.base))
            })?;
            segments.pop_if_empty();
            if self.credential.is_guest() {
                segments.push("guestAuth");
            }
            segments.extend(["app", "rest"]);
            if let Some(version) = &self.api_version {
                segments.push(version);
            }
            if path.is_root() {
                segments.push("");
            } else {
                segments.extend(path.segments());
            }
        }

        let fields = fields.query_value();
        if !path.query_pairs().is_empty() || fields.is_some() {
            let mut query = url.query_pairs_mut();
            for (name, value) in path.query_pairs() {
                query.append_pair(name, value);
            }
            if let Some(fields) = &fields {
                query.append_pair("fields", fields);
            }
        }
        Ok(url)
    }

    /// Fetches and decodes a resource.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotAuthenticated`] if no credential was set, before any
    ///   request is made
    /// - [`ApiError::Connectivity`] if the server could not be reached
    /// - [`ApiError::Authorization`], [`ApiError::NotFound`] or
    ///   [`ApiError::Transport`] for non-success statuses
    /// - [`ApiError::Deserialization`] if the body does not fit `T`
    pub fn get<T: DeserializeOwned>(
        &self,
        path: impl Into<ResourcePath>,
        fields: &Fields,
        format: ContentType,
    ) -> ApiResult<T> {
        let url = self.url_for(&path.into(), fields)?;
        let entry = self.get_cached(url, format)?;
        super::common::decode_body(&entry.body, entry.content_type.as_deref(), format)
    }

    /// Fetches a plain-text resource such as a single setting.
    pub fn get_text(&self, path: impl Into<ResourcePath>) -> ApiResult<String> {
        let url = self.url_for(&path.into(), &Fields::new())?;
        let entry = self.get_cached(url, ContentType::Text)?;
        Ok(String::from_utf8_lossy(&entry.body).trim().to_string())
    }

    /// Fetches a `true`/`false` resource.
    ///
    /// # Errors
    ///
    /// Every failure of [`get_text`](Self::get_text), including 404, plus
    /// [`ApiError::Deserialization`] for any other body.
    pub fn get_bool(&self, path: impl Into<ResourcePath>) -> ApiResult<bool> {
        let text = self.get_text(path)?;
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ApiError::Deserialization(format!(
                "expected 'true' or 'false', got '{text}'"
            )))
        }
    }

    /// Downloads raw bytes, e.g. an artifact. Never cached.
    pub fn get_bytes(&self, path: impl Into<ResourcePath>) -> ApiResult<Vec<u8>> {
        let url = self.url_for(&path.into(), &Fields::new())?;
        let response = self.send(HttpMethod::Get, url, None, None)?;
        Ok(response.body)
    }

    /// Sends a POST with `body` and returns the raw response.
    pub fn post(
        &self,
        path: impl Into<ResourcePath>,
        body: RequestBody,
        accept: ContentType,
    ) -> ApiResult<ApiResponse> {
        self.write(HttpMethod::Post, path.into(), Some(body), accept)
    }

    /// Sends a PUT with `body` and returns the raw response.
    pub fn put(
        &self,
        path: impl Into<ResourcePath>,
        body: RequestBody,
        accept: ContentType,
    ) -> ApiResult<ApiResponse> {
        self.write(HttpMethod::Put, path.into(), Some(body), accept)
    }

    pub fn delete(&self, path: impl Into<ResourcePath>) -> ApiResult<ApiResponse> {
        self.write(HttpMethod::Delete, path.into(), None, ContentType::Text)
    }

    /// Checks the current credential against the server root.
    ///
    /// # Returns
    ///
    /// `Ok(true)` when the server accepts the credential. When the server
    /// answers with an error status, that error is returned if
    /// `throw_on_http_error` is set and `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Missing credentials and connectivity failures are always returned.
    pub fn authenticate(&self, throw_on_http_error: bool) -> ApiResult<bool> {
        let url = self.url_for(&ResourcePath::root(), &Fields::new())?;
        match self.send(HttpMethod::Get, url, Some(ContentType::Text), None) {
            Ok(_) => Ok(true),
            Err(e) if e.is_http_status() && !throw_on_http_error => {
                debug!(status = ?e.status(), "authentication check rejected");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn get_cached(&self, url: Url, accept: ContentType) -> ApiResult<CacheEntry> {
        // Fail before touching the cache or the network.
        self.credential.authorization_header()?;

        let key = CacheKey::new(url.as_str(), accept);
        if let Some(entry) = self.cache.try_get(&key) {
            debug!(%url, "cache hit");
            return Ok(entry);
        }

        let response = self.send(HttpMethod::Get, url, Some(accept), None)?;
        let entry = CacheEntry::new(response.body, response.content_type);
        self.cache.put(key, entry.clone());
        Ok(entry)
    }

    fn write(
        &self,
        method: HttpMethod,
        path: ResourcePath,
        body: Option<RequestBody>,
        accept: ContentType,
    ) -> ApiResult<ApiResponse> {
        let url = self.url_for(&path, &Fields::new())?;
        let result = self.send(method, url, Some(accept), body);
        // Anything previously read may now be stale.
        if !matches!(result, Err(ApiError::NotAuthenticated)) {
            self.cache.invalidate();
        }
        result
    }

    fn send(
        &self,
        method: HttpMethod,
        url: Url,
        accept: Option<ContentType>,
        body: Option<RequestBody>,
    ) -> ApiResult<ApiResponse> {
        let authorization = self.credential.authorization_header()?;

        let mut headers = vec![("User-Agent".to_string(), self.user_agent.clone())];
        if let Some(accept) = accept {
            headers.push(("Accept".to_string(), accept.mime().to_string()));
        }
        if let Some(value) = authorization {
            headers.push(("Authorization".to_string(), value));
        }
        if let Some(body) = &body {
            headers.push((
                "Content-Type".to_string(),
                body.content_type().mime().to_string(),
            ));
        }

        debug!(%method, %url, "sending request");
        let request = TransportRequest {
            method,
            url: url.clone(),
            headers,
            body: body.map(RequestBody::into_bytes),
        };

        let response = self.transport.execute(request).map_err(|source| {
            warn!(%method, %url, error = %source, "request failed");
            ApiError::Connectivity { source }
        })?;

        let status = response.status;
        if !(200..300).contains(&status) {
            warn!(%method, %url, status, "server returned an error status");
            let body = String::from_utf8_lossy(&response.body).into_owned();
            return Err(ApiError::from_status(status, body));
        }
        debug!(status, bytes = response.body.len(), "received response");

        Ok(ApiResponse {
            status,
            content_type: response.content_type,
            body: response.body,
        })
    }
}

impl fmt::Debug for TeamCityClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeamCityClient")
            .field("base", &self.base.as_str())
            .field("credential", &self.credential)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("cache_enabled", &self.cache.is_enabled())
            .finish_non_exhaustive()
    }
}

/// Normalizes a configured host into the server root URL.
fn server_root(host: &str, use_ssl: bool) -> ApiResult<Url> {
    let host = host.trim();
    if host.is_empty() {
        return Err(ApiError::InvalidConfiguration(
            "no TeamCity host configured".to_string(),
        ));
    }

    let address = if host.contains("://") {
        host.to_string()
    } else {
        let scheme = if use_ssl { "https" } else { "http" };
        format!("{scheme}://{host}")
    };

    let url = Url::parse(&address)
        .map_err(|e| ApiError::InvalidConfiguration(format!("invalid host '{host}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ApiError::InvalidConfiguration(format!(
            "invalid host '{host}': expected an http or https server address"
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    fn client(host: &str, use_ssl: bool) -> TeamCityClient {
        TeamCityClient::new(host, use_ssl).unwrap()
    }

    #[test]
    fn test_root_url_has_trailing_slash() {
        let mut client = client("ci.example.com", true);
        client.connect("u", "p");
        let url = client.url_for(&ResourcePath::root(), &Fields::new()).unwrap();
        assert_eq!(url.as_str(), "https://ci.example.com/app/rest/");
    }

    #[test]
    fn test_plain_http_with_port() {
        let client = client("ci.example.com:8111", false);
        let url = client.url_for(&"server".into(), &Fields::new()).unwrap();
        assert_eq!(url.as_str(), "http://ci.example.com:8111/app/rest/server");
    }

    #[test]
    fn test_scheme_in_host_wins() {
        let client = client("http://ci.example.com", true);
        assert_eq!(client.server_url().scheme(), "http");
    }

    #[test]
    fn test_context_path_is_kept() {
        let client = client("https://example.com/teamcity/", true);
        let url = client.url_for(&"projects".into(), &Fields::new()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/teamcity/app/rest/projects");
    }

    #[test]
    fn test_guest_and_version_segments() {
        let mut client = client("ci", true);
        client.connect_as_guest();
        client.use_version("latest");
        let url = client.url_for(&"builds".into(), &Fields::new()).unwrap();
        assert_eq!(url.as_str(), "https://ci/guestAuth/app/rest/latest/builds");

        client.use_version("");
        client.connect("u", "p");
        let url = client.url_for(&"builds".into(), &Fields::new()).unwrap();
        assert_eq!(url.as_str(), "https://ci/app/rest/builds");
    }

    #[test]
    fn test_fields_query_is_omitted_when_empty() {
        let client = client("ci", true);
        let url = client.url_for(&"server".into(), &Fields::new()).unwrap();
        assert_eq!(url.query(), None);

        let url = client
            .url_for(&"buildTypes/id:X".into(), &fields![id, builds(count)])
            .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("fields".to_string(), "id,builds(count)".to_string())]);
    }

    #[test]
    fn test_locator_segment_keeps_reserved_characters() {
        let client = client("ci", true);
        let url = client
            .url_for(&"buildTypes/id:Bt1".into(), &Fields::new())
            .unwrap();
        assert!(url.path().ends_with("/buildTypes/id:Bt1"));
    }

    #[test]
    fn test_segment_slashes_are_escaped() {
        let client = client("ci", true);
        let path = ResourcePath::parse("builds/id:1/artifacts/files").join("a b/c.txt");
        let url = client.url_for(&path, &Fields::new()).unwrap();
        assert!(url.path().ends_with("/files/a%20b%2Fc.txt"));
    }

    #[test]
    fn test_invalid_hosts() {
        assert!(matches!(
            TeamCityClient::new("", true),
            Err(ApiError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            TeamCityClient::new("ftp://ci", true),
            Err(ApiError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_connect_replaces_credential() {
        let mut client = client("ci", true);
        assert!(!client.credential().is_set());
        client.connect("u", "p");
        client.connect_with_access_token("t");
        assert_eq!(client.credential(), &Credential::bearer("t"));
        client.connect_as_guest();
        assert!(client.credential().is_guest());
    }

    #[test]
    fn test_default_user_agent() {
        let client = client("ci", true);
        assert!(client.user_agent().starts_with("tc/"));
    }
}
