//
//  teamcity-cli
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Server Address Handling
//!
//! The configuration stores the host without a scheme; the scheme is kept in
//! `use_ssl`. These helpers convert between what a user types
//! (`https://ci.example.com/`) and the stored form.

use super::ServerConfig;

/// Port TeamCity listens on out of the box.
pub const DEFAULT_TEAMCITY_PORT: u16 = 8111;

/// Strips the scheme and trailing slashes from a host and lowercases it.
///
/// ```rust
/// use teamcity_cli::config::normalize_host;
///
/// assert_eq!(normalize_host("https://CI.Example.com/"), "ci.example.com");
/// assert_eq!(normalize_host("ci.example.com:8111"), "ci.example.com:8111");
/// ```
pub fn normalize_host(host: &str) -> String {
    let (_, host) = split_scheme(host.trim());
    host.trim_end_matches('/').to_lowercase()
}

/// Splits an `http://` or `https://` prefix off `input`.
///
/// Returns `Some(true)` for https, `Some(false)` for http and `None` when no
/// scheme is present.
pub fn split_scheme(input: &str) -> (Option<bool>, &str) {
    if let Some(rest) = input.strip_prefix("https://") {
        (Some(true), rest)
    } else if let Some(rest) = input.strip_prefix("http://") {
        (Some(false), rest)
    } else {
        (None, input)
    }
}

/// Stores `input` as the server host, taking `use_ssl` from its scheme when
/// one is given.
pub fn apply_host(server: &mut ServerConfig, input: &str) {
    let (ssl, _) = split_scheme(input.trim());
    if let Some(ssl) = ssl {
        server.use_ssl = ssl;
    }
    server.host = normalize_host(input);
}

/// The server address for display, e.g. `https://ci.example.com:8111`.
pub fn display_address(server: &ServerConfig) -> String {
    let scheme = if server.use_ssl { "https" } else { "http" };
    match server.port {
        Some(port) => format!("{scheme}://{}:{port}", server.host),
        None => format!("{scheme}://{}", server.host),
    }
}
