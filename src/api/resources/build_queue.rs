//
//  teamcity-cli
//  api/resources/build_queue.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The build queue.

use super::builds::{Build, Builds};
use super::common::xml_escape;
use crate::api::client::TeamCityClient;
use crate::api::common::{ApiResult, RequestBody};
use crate::api::resource::Resource;
use crate::fields::Fields;
use crate::locators::{BuildLocator, BuildTypeLocator, Locator, ProjectLocator, ResourceLocator};

/// Accessor for `buildQueue`.
#[derive(Debug, Clone)]
pub struct BuildQueueApi<'a> {
    resource: Resource<'a>,
}

impl<'a> BuildQueueApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "buildQueue"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    /// Every queued build.
    pub fn all(&self) -> ApiResult<Vec<Build>> {
        self.resource.list::<Builds>("")
    }

    pub fn by_build_type(&self, build_type: &BuildTypeLocator) -> ApiResult<Vec<Build>> {
        let locator = Locator::new().dimension("buildType", build_type.to_locator()?);
        self.resource.list_matching::<Builds>(&locator)
    }

    pub fn by_project(&self, project: &ProjectLocator) -> ApiResult<Vec<Build>> {
        let locator = Locator::new().dimension("project", project.to_locator()?);
        self.resource.list_matching::<Builds>(&locator)
    }

    /// Queues a build of `build_config_id`, on `branch` if given.
    pub fn trigger(&self, build_config_id: &str, branch: Option<&str>) -> ApiResult<Build> {
        let branch = branch
            .map(|name| format!(r#" branchName="{}""#, xml_escape(name)))
            .unwrap_or_default();
        let body = format!(
            r#"<build{branch}><buildType id="{}"/></build>"#,
            xml_escape(build_config_id)
        );
        let response = self.resource.post("", RequestBody::xml(body))?;
        response.decode(self.resource.format())
    }

    /// Removes a queued build from the queue.
    pub fn cancel(&self, build: &BuildLocator, comment: &str) -> ApiResult<()> {
        let body = format!(
            r#"<buildCancelRequest comment="{}" readdIntoQueue="false"/>"#,
            xml_escape(comment)
        );
        self.resource
            .at_locator(build)?
            .post("", RequestBody::xml(body))?;
        Ok(())
    }
}
