//
//  teamcity-cli
//  api/resources/artifacts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build artifacts.
//!
//! Artifacts hang off a build: `builds/<locator>/artifacts/children/<dir>`
//! lists a directory and `builds/<locator>/artifacts/files/<path>` streams a
//! file. Each `/` in an artifact path becomes its own URL segment.
//!
//! [`ArtifactsApi::by_build_config`] resolves the build from a configuration
//! instead: its latest finished build, the latest successful one, a build
//! number or a branch.

use serde::{Deserialize, Serialize};

use super::common::Link;
use crate::api::client::TeamCityClient;
use crate::api::common::ApiResult;
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::{BuildLocator, BuildStatus, BuildTypeLocator};

/// A file or directory in a build's artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtifactFile {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@fullName")]
    pub full_name: Option<String>,
    /// Bytes; absent for directories.
    #[serde(alias = "@size")]
    pub size: Option<u64>,
    #[serde(alias = "@modificationTime")]
    pub modification_time: Option<String>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub content: Option<Link>,
    pub children: Option<Link>,
}

impl ArtifactFile {
    pub fn is_directory(&self) -> bool {
        self.children.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtifactFiles {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    pub file: Vec<ArtifactFile>,
}

impl Collection for ArtifactFiles {
    type Item = ArtifactFile;

    fn into_items(self) -> Vec<ArtifactFile> {
        self.file
    }
}

/// Accessor for build artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> ArtifactsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "builds"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    /// Lists the artifact directory `path` of a build (`""` for the root).
    pub fn list(&self, build: &BuildLocator, path: &str) -> ApiResult<Vec<ArtifactFile>> {
        self.resource
            .at_locator(build)?
            .at("artifacts/children")
            .list::<ArtifactFiles>(path)
    }

    /// Downloads the artifact at `path`.
    pub fn download(&self, build: &BuildLocator, path: &str) -> ApiResult<Vec<u8>> {
        self.resource
            .at_locator(build)?
            .at("artifacts/files")
            .bytes(path)
    }

    /// Artifacts of a build picked from the configuration `build_type_id`.
    pub fn by_build_config(&self, build_type_id: &str) -> BuildConfigArtifacts<'a> {
        BuildConfigArtifacts {
            api: self.clone(),
            build: BuildLocator::new().build_type(BuildTypeLocator::with_id(build_type_id)),
        }
    }
}

/// Artifacts of the build a configuration-scoped locator resolves to.
///
/// Without a refinement the server picks the latest finished build.
#[derive(Debug, Clone)]
pub struct BuildConfigArtifacts<'a> {
    api: ArtifactsApi<'a>,
    build: BuildLocator,
}

impl<'a> BuildConfigArtifacts<'a> {
    pub fn last_successful(mut self) -> Self {
        self.build = self.build.status(BuildStatus::Success);
        self
    }

    /// The build with this build number.
    pub fn specification(mut self, number: impl Into<String>) -> Self {
        self.build = self.build.number(number);
        self
    }

    pub fn branch(mut self, name: impl Into<String>) -> Self {
        self.build = self.build.branch_name(name);
        self
    }

    pub fn locator(&self) -> &BuildLocator {
        &self.build
    }

    pub fn list(&self, path: &str) -> ApiResult<Vec<ArtifactFile>> {
        self.api.list(&self.build, path)
    }

    pub fn download(&self, path: &str) -> ApiResult<Vec<u8>> {
        self.api.download(&self.build, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_listing_from_json() {
        let json = r#"{"count":2,"file":[
            {"name":"app.zip","size":1024,"content":{"href":"/app/rest/builds/id:1/artifacts/content/app.zip"}},
            {"name":"logs","children":{"href":"/app/rest/builds/id:1/artifacts/children/logs"}}
        ]}"#;
        let files: ArtifactFiles = serde_json::from_str(json).unwrap();
        let items = files.into_items();
        assert!(!items[0].is_directory());
        assert_eq!(items[0].size, Some(1024));
        assert!(items[1].is_directory());
    }
}
