//
//  teamcity-cli
//  api/resources/investigations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Investigations: a user taking responsibility for a failing configuration
//! or test.

use serde::{Deserialize, Serialize};

use super::users::User;
use crate::api::client::TeamCityClient;
use crate::api::common::ApiResult;
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::{BuildTypeLocator, InvestigationLocator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Investigation {
    #[serde(alias = "@id")]
    pub id: Option<String>,
    /// `TAKEN`, `FIXED` or `GIVEN_UP`.
    #[serde(alias = "@state")]
    pub state: Option<String>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub assignee: Option<User>,
    pub assignment: Option<Assignment>,
    pub resolution: Option<Resolution>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assignment {
    #[serde(alias = "@timestamp")]
    pub timestamp: Option<String>,
    pub text: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resolution {
    #[serde(rename = "type", alias = "@type")]
    pub kind: Option<String>,
    #[serde(alias = "@time")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Investigations {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub investigation: Vec<Investigation>,
}

impl Collection for Investigations {
    type Item = Investigation;

    fn into_items(self) -> Vec<Investigation> {
        self.investigation
    }
}

/// Accessor for `investigations`.
#[derive(Debug, Clone)]
pub struct InvestigationsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> InvestigationsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "investigations"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    pub fn all(&self) -> ApiResult<Vec<Investigation>> {
        self.resource.list::<Investigations>("")
    }

    pub fn by_locator(&self, locator: &InvestigationLocator) -> ApiResult<Vec<Investigation>> {
        self.resource.list_matching::<Investigations>(locator)
    }

    /// Investigations of one build configuration.
    pub fn by_build_type(&self, id: &str) -> ApiResult<Vec<Investigation>> {
        self.by_locator(&InvestigationLocator::new().build_type(BuildTypeLocator::with_id(id)))
    }
}
