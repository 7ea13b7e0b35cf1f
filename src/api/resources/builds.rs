//
//  teamcity-cli
//  api/resources/builds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Builds
//!
//! Finished and running builds, looked up through [`BuildLocator`]s.
//!
//! ## Example
//!
//! ```rust,no_run
//! use teamcity_cli::api::TeamCityClient;
//! use teamcity_cli::fields::{BuildField, BuildsField};
//!
//! let mut client = TeamCityClient::new("ci.example.com", true)?;
//! client.connect("admin", "secret");
//!
//! let last = client.builds().last_successful_by_build_config("MyProject_Build")?;
//! let running = client
//!     .builds()
//!     .with_fields(BuildsField::with_fields().build(BuildField::with_fields().id().number()))
//!     .running()?;
//! # Ok::<(), teamcity_cli::api::ApiError>(())
//! ```

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::agents::Agent;
use super::build_configs::BuildType;
use super::changes::Changes;
use super::common::{xml_escape, Link, Properties};
use crate::api::client::TeamCityClient;
use crate::api::common::{ApiResult, RequestBody};
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::{parse_date, BuildLocator, BuildStatus, BuildTypeLocator, UserLocator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Build {
    #[serde(alias = "@id")]
    pub id: Option<u64>,
    #[serde(alias = "@number")]
    pub number: Option<String>,
    #[serde(alias = "@status")]
    pub status: Option<String>,
    #[serde(alias = "@state")]
    pub state: Option<String>,
    #[serde(alias = "@branchName")]
    pub branch_name: Option<String>,
    #[serde(alias = "@defaultBranch")]
    pub default_branch: Option<bool>,
    #[serde(alias = "@buildTypeId")]
    pub build_type_id: Option<String>,
    #[serde(alias = "@pinned")]
    pub pinned: Option<bool>,
    #[serde(alias = "@personal")]
    pub personal: Option<bool>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    #[serde(alias = "@webUrl")]
    pub web_url: Option<String>,
    pub status_text: Option<String>,
    pub queued_date: Option<String>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub build_type: Option<BuildType>,
    pub agent: Option<Agent>,
    pub properties: Option<Properties>,
    pub statistics: Option<Properties>,
    pub artifacts: Option<Link>,
    pub changes: Option<Changes>,
    pub tags: Option<Tags>,
}

impl Build {
    pub fn started_at(&self) -> Option<DateTime<FixedOffset>> {
        self.start_date.as_deref().and_then(parse_date)
    }

    pub fn finished_at(&self) -> Option<DateTime<FixedOffset>> {
        self.finish_date.as_deref().and_then(parse_date)
    }

    pub fn is_successful(&self) -> bool {
        self.status.as_deref() == Some(BuildStatus::Success.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Builds {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    #[serde(alias = "@nextHref")]
    pub next_href: Option<String>,
    pub build: Vec<Build>,
}

impl Collection for Builds {
    type Item = Build;

    fn into_items(self) -> Vec<Build> {
        self.build
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    #[serde(alias = "@name")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tags {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    pub tag: Vec<Tag>,
}

/// Accessor for `builds`.
#[derive(Debug, Clone)]
pub struct BuildsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> BuildsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "builds"),
        }
    }

    /// Requests `fields` on every call. List operations expect a
    /// collection selection (`count,build(...)`), single-build operations a
    /// build selection.
    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    pub fn by_locator(&self, locator: &BuildLocator) -> ApiResult<Vec<Build>> {
        self.resource.list_matching::<Builds>(locator)
    }

    pub fn by_id(&self, id: &str) -> ApiResult<Build> {
        self.resource.at_locator(&BuildLocator::with_id(id))?.fetch("")
    }

    pub fn by_build_config(&self, build_config_id: &str) -> ApiResult<Vec<Build>> {
        self.by_locator(&BuildLocator::new().build_type(BuildTypeLocator::with_id(build_config_id)))
    }

    pub fn last_by_build_config(&self, build_config_id: &str) -> ApiResult<Option<Build>> {
        self.first(BuildLocator::new().build_type(BuildTypeLocator::with_id(build_config_id)))
    }

    pub fn last_successful_by_build_config(&self, build_config_id: &str) -> ApiResult<Option<Build>> {
        self.first(
            BuildLocator::new()
                .build_type(BuildTypeLocator::with_id(build_config_id))
                .status(BuildStatus::Success),
        )
    }

    pub fn last_failed_by_build_config(&self, build_config_id: &str) -> ApiResult<Option<Build>> {
        self.first(
            BuildLocator::new()
                .build_type(BuildTypeLocator::with_id(build_config_id))
                .status(BuildStatus::Failure),
        )
    }

    /// Builds triggered by a user.
    pub fn by_user(&self, username: &str) -> ApiResult<Vec<Build>> {
        self.by_locator(&BuildLocator::new().user(UserLocator::with_username(username)))
    }

    /// Builds since `date`, optionally only those with `status`.
    pub fn since_date(
        &self,
        date: DateTime<Utc>,
        status: Option<BuildStatus>,
    ) -> ApiResult<Vec<Build>> {
        let mut locator = BuildLocator::new().since_date(date);
        if let Some(status) = status {
            locator = locator.status(status);
        }
        self.by_locator(&locator)
    }

    pub fn running(&self) -> ApiResult<Vec<Build>> {
        self.by_locator(&BuildLocator::running_builds())
    }

    /// Builds that started after the build with `build_id`.
    pub fn next_builds(&self, build_id: &str, count: u32) -> ApiResult<Vec<Build>> {
        self.by_locator(
            &BuildLocator::new()
                .since_build(BuildLocator::with_id(build_id))
                .count(count),
        )
    }

    pub fn pin(&self, locator: &BuildLocator, comment: &str) -> ApiResult<()> {
        self.resource
            .at_locator(locator)?
            .put("pin", RequestBody::text(comment))?;
        Ok(())
    }

    pub fn unpin(&self, locator: &BuildLocator) -> ApiResult<()> {
        self.resource.at_locator(locator)?.delete("pin")?;
        Ok(())
    }

    pub fn add_tags<I, S>(&self, locator: &BuildLocator, tags: I) -> ApiResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let body: String = tags
            .into_iter()
            .map(|tag| format!(r#"<tag name="{}"/>"#, xml_escape(tag.as_ref())))
            .collect();
        self.resource
            .at_locator(locator)?
            .post("tags", RequestBody::xml(format!("<tags>{body}</tags>")))?;
        Ok(())
    }

    fn first(&self, locator: BuildLocator) -> ApiResult<Option<Build>> {
        Ok(self.by_locator(&locator.count(1))?.into_iter().next())
    }
}
