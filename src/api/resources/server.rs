//
//  teamcity-cli
//  api/resources/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server information and installed plugins.

use serde::{Deserialize, Serialize};

use crate::api::client::TeamCityClient;
use crate::api::common::ApiResult;
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Server {
    #[serde(alias = "@version")]
    pub version: Option<String>,
    #[serde(alias = "@versionMajor")]
    pub version_major: Option<u32>,
    #[serde(alias = "@versionMinor")]
    pub version_minor: Option<u32>,
    #[serde(alias = "@buildNumber")]
    pub build_number: Option<String>,
    #[serde(alias = "@buildDate")]
    pub build_date: Option<String>,
    #[serde(alias = "@startTime")]
    pub start_time: Option<String>,
    #[serde(alias = "@currentTime")]
    pub current_time: Option<String>,
    #[serde(alias = "@webUrl")]
    pub web_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Plugin {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@displayName")]
    pub display_name: Option<String>,
    #[serde(alias = "@version")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Plugins {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    pub plugin: Vec<Plugin>,
}

impl Collection for Plugins {
    type Item = Plugin;

    fn into_items(self) -> Vec<Plugin> {
        self.plugin
    }
}

/// Accessor for `server`.
#[derive(Debug, Clone)]
pub struct ServerApi<'a> {
    resource: Resource<'a>,
}

impl<'a> ServerApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "server"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    /// Version and uptime details of the server.
    pub fn info(&self) -> ApiResult<Server> {
        self.resource.fetch("")
    }

    pub fn plugins(&self) -> ApiResult<Vec<Plugin>> {
        self.resource.list::<Plugins>("plugins")
    }
}
