//
//  teamcity-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TeamCity CLI Library
//!
//! A client library for the TeamCity REST API, and the `tc` command-line
//! tool built on top of it.
//!
//! ## Overview
//!
//! The library composes REST requests from three small languages:
//!
//! - **Field selections** ([`fields`]): the `fields=` partial-response
//!   parameter, e.g. `id,builds(count)`
//! - **Locators** ([`locators`]): `dimension:value` filters placed in the
//!   URL path, e.g. `buildType:(id:Bt1),status:FAILURE,count:5`
//! - **Resource paths** ([`api::ResourcePath`]): paths below `app/rest`
//!
//! The [`api::TeamCityClient`] turns them into URLs, authenticates, caches
//! GET responses on request and maps failures onto [`api::ApiError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use teamcity_cli::api::TeamCityClient;
//! use teamcity_cli::locators::{BuildLocator, BuildStatus, BuildTypeLocator};
//!
//! let mut client = TeamCityClient::new("ci.example.com", true)?;
//! client.connect_with_access_token("my-token");
//! client.use_version("2018.1");
//!
//! let failed = client.builds().by_locator(
//!     &BuildLocator::new()
//!         .build_type(BuildTypeLocator::with_id("MyProject_Build"))
//!         .status(BuildStatus::Failure)
//!         .count(5),
//! )?;
//! for build in failed {
//!     println!("{:?} {:?}", build.number, build.status_text);
//! }
//! # Ok::<(), teamcity_cli::api::ApiError>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`fields`] | Partial-response field selections |
//! | [`locators`] | Locator builders |
//! | [`api`] | Request caller, transport, cache and resources |
//! | [`auth`] | Credentials |
//! | [`config`] | Configuration file |
//! | [`output`] | Table and JSON output |
//! | [`cli`] | `tc` command definitions |
//!
//! ## Debugging
//!
//! Set `TC_DEBUG` to a tracing filter to see requests:
//!
//! ```bash
//! TC_DEBUG=debug tc build list --running
//! ```

/// Command-line interface definitions.
///
/// Contains the `tc` commands, arguments, and subcommands defined using the
/// clap derive API.
pub mod cli;

/// The TeamCity REST client.
///
/// URL composition, authentication, the response cache, the pluggable
/// transport and typed accessors for each resource family.
pub mod api;

/// Credentials: Basic, bearer token and guest access.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/tc/config.toml`
/// - macOS: `~/Library/Application Support/tc/config.toml`
/// - Windows: `%APPDATA%\tc\config\config.toml`
pub mod config;

/// Partial-response field selections.
pub mod fields;

/// Locator builders for selecting resources.
pub mod locators;

/// Output formatting for table and JSON modes.
pub mod output;

/// Re-export of the main CLI struct for convenient access.
///
/// ```rust,no_run
/// use clap::Parser;
/// use teamcity_cli::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

pub use api::{ApiError, ApiResult, TeamCityClient};
pub use fields::Fields;
pub use locators::{Locator, ResourceLocator};

/// The name of the CLI binary, used for the user agent and configuration
/// paths.
pub const APP_NAME: &str = "tc";

/// Application version, taken from Cargo.toml at compile time.
///
/// ```rust
/// use teamcity_cli::VERSION;
///
/// println!("tc version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: Network issues
pub mod exit_codes {
    use crate::api::ApiError;

    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// An unspecified error occurred during execution.
    pub const ERROR: i32 = 1;

    /// Invalid arguments, locator or configuration.
    pub const USAGE: i32 = 2;

    /// Missing credentials, or the server rejected them (401/403).
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist (404).
    pub const NOT_FOUND: i32 = 8;

    /// The server could not be reached.
    pub const NETWORK: i32 = 32;

    /// Picks the exit code for a failed command from the first
    /// [`ApiError`] in its cause chain.
    pub fn from_error(error: &anyhow::Error) -> i32 {
        let api_error = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<ApiError>());
        match api_error {
            Some(ApiError::NotAuthenticated | ApiError::Authorization { .. }) => AUTH_ERROR,
            Some(ApiError::NotFound { .. }) => NOT_FOUND,
            Some(ApiError::Connectivity { .. }) => NETWORK,
            Some(ApiError::InvalidLocator(_) | ApiError::InvalidConfiguration(_)) => USAGE,
            _ => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use anyhow::Context;

        #[test]
        fn test_codes_follow_api_errors() {
            let not_found = anyhow::Error::from(ApiError::NotFound { status: 404 });
            assert_eq!(from_error(&not_found), NOT_FOUND);

            let forbidden = anyhow::Error::from(ApiError::Authorization { status: 403 });
            assert_eq!(from_error(&forbidden), AUTH_ERROR);

            let plain = anyhow::anyhow!("something else");
            assert_eq!(from_error(&plain), ERROR);
        }

        #[test]
        fn test_context_keeps_the_cause() {
            let result: Result<(), ApiError> = Err(ApiError::NotAuthenticated);
            let error = result.context("Failed to list builds").unwrap_err();
            assert_eq!(from_error(&error), AUTH_ERROR);
        }
    }
}
