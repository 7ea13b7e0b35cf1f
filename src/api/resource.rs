//
//  teamcity-cli
//  api/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Generic Resource Accessor
//!
//! Every resource family (builds, projects, users, ...) is reached through a
//! [`Resource`]: a borrowed client, a base path, a field selection and a
//! response format. Accessors are immutable; [`Resource::with_fields`] and
//! [`Resource::at`] return new accessors and leave the original untouched, so
//! a configured accessor can be reused freely.
//!
//! Collection endpoints answer with a wrapper such as
//! `{"count": 2, "build": [...]}`. The [`Collection`] trait unwraps those into
//! a plain `Vec`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use teamcity_cli::api::{Resource, TeamCityClient};
//! use teamcity_cli::api::resources::{Build, Builds};
//! use teamcity_cli::fields;
//!
//! let mut client = TeamCityClient::new("ci.example.com", true)?;
//! client.connect_as_guest();
//!
//! let builds = Resource::new(&client, "builds").with_fields(fields![count, build(id, number)]);
//! let all: Vec<Build> = builds.list::<Builds>("")?;
//! # Ok::<(), teamcity_cli::api::ApiError>(())
//! ```

use serde::de::DeserializeOwned;

use super::client::TeamCityClient;
use super::common::{ApiResponse, ApiResult, ContentType, RequestBody};
use super::path::ResourcePath;
use crate::fields::Fields;
use crate::locators::ResourceLocator;

/// A collection wrapper returned by list endpoints.
pub trait Collection: DeserializeOwned {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Accessor for one resource family.
#[derive(Debug, Clone)]
pub struct Resource<'a> {
    client: &'a TeamCityClient,
    base: ResourcePath,
    fields: Fields,
    format: ContentType,
}

impl<'a> Resource<'a> {
    pub fn new(client: &'a TeamCityClient, base: impl Into<ResourcePath>) -> Self {
        Self {
            client,
            base: base.into(),
            fields: Fields::new(),
            format: ContentType::Json,
        }
    }

    /// A copy of this accessor that requests `fields`.
    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            fields: fields.into(),
            ..self.clone()
        }
    }

    /// A copy of this accessor that requests `format` (JSON by default).
    pub fn with_format(&self, format: ContentType) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    /// An accessor for a sub-path, keeping fields and format.
    pub fn at(&self, suffix: impl Into<ResourcePath>) -> Self {
        Self {
            base: self.base.clone().append(suffix),
            ..self.clone()
        }
    }

    /// An accessor for the entity selected by `locator`, e.g. `builds/id:42`.
    pub fn at_locator(&self, locator: &dyn ResourceLocator) -> ApiResult<Self> {
        Ok(Self {
            base: self.base.clone().join_locator(locator)?,
            ..self.clone()
        })
    }

    pub fn client(&self) -> &'a TeamCityClient {
        self.client
    }

    pub fn path(&self) -> &ResourcePath {
        &self.base
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn format(&self) -> ContentType {
        self.format
    }

    fn resolve(&self, suffix: impl Into<ResourcePath>) -> ResourcePath {
        self.base.clone().append(suffix)
    }

    /// Fetches `base/suffix` and decodes it as `T`.
    pub fn fetch<T: DeserializeOwned>(&self, suffix: impl Into<ResourcePath>) -> ApiResult<T> {
        self.client
            .get(self.resolve(suffix), &self.fields, self.format)
    }

    /// Fetches a collection at `base/suffix` and unwraps its items.
    pub fn list<C: Collection>(&self, suffix: impl Into<ResourcePath>) -> ApiResult<Vec<C::Item>> {
        Ok(self.fetch::<C>(suffix)?.into_items())
    }

    /// Fetches the collection at `base?locator=...`.
    pub fn list_matching<C: Collection>(
        &self,
        locator: &dyn ResourceLocator,
    ) -> ApiResult<Vec<C::Item>> {
        let path = self.base.clone().with_locator(locator)?;
        let collection: C = self.client.get(path, &self.fields, self.format)?;
        Ok(collection.into_items())
    }

    pub fn text(&self, suffix: impl Into<ResourcePath>) -> ApiResult<String> {
        self.client.get_text(self.resolve(suffix))
    }

    pub fn flag(&self, suffix: impl Into<ResourcePath>) -> ApiResult<bool> {
        self.client.get_bool(self.resolve(suffix))
    }

    pub fn bytes(&self, suffix: impl Into<ResourcePath>) -> ApiResult<Vec<u8>> {
        self.client.get_bytes(self.resolve(suffix))
    }

    pub fn post(
        &self,
        suffix: impl Into<ResourcePath>,
        body: RequestBody,
    ) -> ApiResult<ApiResponse> {
        self.client.post(self.resolve(suffix), body, self.format)
    }

    pub fn put(&self, suffix: impl Into<ResourcePath>, body: RequestBody) -> ApiResult<ApiResponse> {
        self.client.put(self.resolve(suffix), body, self.format)
    }

    pub fn delete(&self, suffix: impl Into<ResourcePath>) -> ApiResult<ApiResponse> {
        self.client.delete(self.resolve(suffix))
    }
}
