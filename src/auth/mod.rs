//
//  teamcity-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! A client holds exactly one [`Credential`] at a time. Every `connect*` call
//! on the client replaces it outright.
//!
//! ## Supported Authentication Modes
//!
//! - **Basic**: username and password, sent as `Authorization: Basic ...`.
//! - **Bearer token**: a TeamCity access token, sent as
//!   `Authorization: Bearer ...`.
//! - **Guest**: no header at all. Requests are routed through the
//!   `guestAuth/` path prefix instead, which the server must have enabled.
//!
//! A client that was never connected holds [`Credential::None`]; asking it
//! for a header fails with [`ApiError::NotAuthenticated`] before anything is
//! sent over the network.
//!
//! ## Example
//!
//! ```rust
//! use teamcity_cli::auth::Credential;
//!
//! let basic = Credential::basic("admin", "secret");
//! assert_eq!(
//!     basic.authorization_header().unwrap().as_deref(),
//!     Some("Basic YWRtaW46c2VjcmV0")
//! );
//!
//! assert_eq!(Credential::Guest.authorization_header().unwrap(), None);
//! assert!(Credential::None.authorization_header().is_err());
//! ```

mod token;

pub use token::*;

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::api::common::ApiError;

/// The active credential of a client.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Credential {
    /// Not connected yet.
    #[default]
    None,
    /// Username and password.
    Basic { username: String, password: String },
    /// Access token.
    BearerToken { token: String },
    /// Anonymous access through `guestAuth/`.
    Guest,
}

impl Credential {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken {
            token: token.into(),
        }
    }

    /// The `Authorization` header value for this credential.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` for basic and token credentials
    /// - `Ok(None)` for guest access
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] when no credential was set.
    pub fn authorization_header(&self) -> Result<Option<String>, ApiError> {
        match self {
            Self::None => Err(ApiError::NotAuthenticated),
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                Ok(Some(format!("Basic {encoded}")))
            }
            Self::BearerToken { token } => Ok(Some(format!("Bearer {token}"))),
            Self::Guest => Ok(None),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Short human-readable name of the mode, for status output.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic { .. } => "basic",
            Self::BearerToken { .. } => "token",
            Self::Guest => "guest",
        }
    }
}

// Secrets never reach logs through `{:?}`.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::BearerToken { token } => f
                .debug_struct("BearerToken")
                .field("token", &mask_token(token))
                .finish(),
            Self::Guest => f.write_str("Guest"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header() {
        let credential = Credential::basic("user", "pass");
        assert_eq!(
            credential.authorization_header().unwrap(),
            Some(format!("Basic {}", STANDARD.encode("user:pass")))
        );
    }

    #[test]
    fn test_bearer_header() {
        let credential = Credential::bearer("eyJ0eXAi");
        assert_eq!(
            credential.authorization_header().unwrap().as_deref(),
            Some("Bearer eyJ0eXAi")
        );
    }

    #[test]
    fn test_guest_has_no_header() {
        assert_eq!(Credential::Guest.authorization_header().unwrap(), None);
        assert!(Credential::Guest.is_guest());
    }

    #[test]
    fn test_unauthenticated_header_fails() {
        assert!(matches!(
            Credential::None.authorization_header(),
            Err(ApiError::NotAuthenticated)
        ));
        assert!(!Credential::default().is_set());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let basic = format!("{:?}", Credential::basic("alice", "hunter2"));
        assert!(basic.contains("alice"));
        assert!(!basic.contains("hunter2"));

        let token = format!("{:?}", Credential::bearer("abcdefghijklmnop"));
        assert!(!token.contains("abcdefghijklmnop"));
    }
}
