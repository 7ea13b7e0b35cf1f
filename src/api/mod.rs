//
//  teamcity-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the client for TeamCity's REST API (`/app/rest`).
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: The request caller: URL composition, authentication,
//!   caching, decoding and error mapping
//! - [`transport`]: The pluggable HTTP executor and its `reqwest` default
//! - [`cache`]: The opt-in GET response cache
//! - [`resource`]: The generic resource accessor
//! - [`resources`]: Entities and per-resource accessors
//! - [`common`]: Shared types (errors, content types, request bodies)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use teamcity_cli::api::TeamCityClient;
//!
//! let mut client = TeamCityClient::new("teamcity.example.com", true)?;
//! client.connect_with_access_token("your-token");
//! client.enable_cache();
//!
//! for project in client.projects().all()? {
//!     println!("{} ({})", project.name, project.id);
//! }
//! # Ok::<(), teamcity_cli::api::ApiError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`] on failure:
//!
//! - `Authorization`: 401 Unauthorized, 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `Transport`: any other non-success status
//! - `Connectivity`: the server could not be reached
//! - `NotAuthenticated`: no credential was set on the client

pub mod cache;
pub mod client;
pub mod common;
mod path;
pub mod resource;
pub mod resources;
pub mod transport;

/// Re-export of the main TeamCity API client.
pub use client::TeamCityClient;

/// Re-export of common API types.
pub use common::{ApiError, ApiResponse, ApiResult, ContentType, RequestBody};

pub use path::ResourcePath;
pub use resource::{Collection, Resource};
