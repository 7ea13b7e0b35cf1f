//
//  teamcity-cli
//  api/resources/changes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! VCS changes.

use serde::{Deserialize, Serialize};

use super::users::User;
use crate::api::client::TeamCityClient;
use crate::api::common::ApiResult;
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::{BuildTypeLocator, ChangeLocator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Change {
    #[serde(alias = "@id")]
    pub id: Option<u64>,
    #[serde(alias = "@version")]
    pub version: Option<String>,
    #[serde(alias = "@username")]
    pub username: Option<String>,
    #[serde(alias = "@date")]
    pub date: Option<String>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    #[serde(alias = "@webUrl")]
    pub web_url: Option<String>,
    pub comment: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Changes {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub change: Vec<Change>,
}

impl Collection for Changes {
    type Item = Change;

    fn into_items(self) -> Vec<Change> {
        self.change
    }
}

/// Accessor for `changes`.
#[derive(Debug, Clone)]
pub struct ChangesApi<'a> {
    resource: Resource<'a>,
}

impl<'a> ChangesApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "changes"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    pub fn all(&self) -> ApiResult<Vec<Change>> {
        self.resource.list::<Changes>("")
    }

    pub fn by_locator(&self, locator: &ChangeLocator) -> ApiResult<Vec<Change>> {
        self.resource.list_matching::<Changes>(locator)
    }

    pub fn by_id(&self, id: &str) -> ApiResult<Change> {
        self.resource.at_locator(&ChangeLocator::with_id(id))?.fetch("")
    }

    /// The most recent change seen by a build configuration.
    pub fn last_for_build_config(&self, build_config_id: &str) -> ApiResult<Option<Change>> {
        let locator = ChangeLocator::new()
            .build_type(BuildTypeLocator::with_id(build_config_id))
            .count(1);
        Ok(self.by_locator(&locator)?.into_iter().next())
    }
}
