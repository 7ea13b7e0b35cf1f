//
//  teamcity-cli
//  api/resources/agents.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build agents.

use serde::{Deserialize, Serialize};

use super::common::Properties;
use crate::api::client::TeamCityClient;
use crate::api::common::{ApiResult, RequestBody};
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::AgentLocator;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Agent {
    #[serde(alias = "@id")]
    pub id: Option<u64>,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@typeId")]
    pub type_id: Option<u64>,
    #[serde(alias = "@connected")]
    pub connected: Option<bool>,
    #[serde(alias = "@enabled")]
    pub enabled: Option<bool>,
    #[serde(alias = "@authorized")]
    pub authorized: Option<bool>,
    #[serde(alias = "@uptodate")]
    pub uptodate: Option<bool>,
    #[serde(alias = "@ip")]
    pub ip: Option<String>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    #[serde(alias = "@webUrl")]
    pub web_url: Option<String>,
    pub properties: Option<Properties>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Agents {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    #[serde(alias = "@nextHref")]
    pub next_href: Option<String>,
    pub agent: Vec<Agent>,
}

impl Collection for Agents {
    type Item = Agent;

    fn into_items(self) -> Vec<Agent> {
        self.agent
    }
}

/// Accessor for `agents`.
#[derive(Debug, Clone)]
pub struct AgentsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> AgentsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "agents"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    /// Every agent, including disconnected and unauthorized ones.
    pub fn all(&self) -> ApiResult<Vec<Agent>> {
        self.by_locator(&AgentLocator::new())
    }

    pub fn by_locator(&self, locator: &AgentLocator) -> ApiResult<Vec<Agent>> {
        self.resource.list_matching::<Agents>(locator)
    }

    pub fn set_enabled(&self, locator: &AgentLocator, enabled: bool) -> ApiResult<()> {
        self.resource
            .at_locator(locator)?
            .put("enabled", RequestBody::text(enabled.to_string()))?;
        Ok(())
    }

    pub fn set_authorized(&self, locator: &AgentLocator, authorized: bool) -> ApiResult<()> {
        self.resource
            .at_locator(locator)?
            .put("authorized", RequestBody::text(authorized.to_string()))?;
        Ok(())
    }
}
