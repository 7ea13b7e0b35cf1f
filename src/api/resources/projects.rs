//
//  teamcity-cli
//  api/resources/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Projects.

use serde::{Deserialize, Serialize};

use super::build_configs::BuildTypes;
use super::common::{xml_escape, Branch, Branches, Properties};
use super::features::{ProjectFeature, ProjectFeatures};
use crate::api::client::TeamCityClient;
use crate::api::common::{ApiResult, RequestBody};
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::{BranchLocator, ProjectLocator};

/// The id of the root project every other project descends from.
pub const ROOT_PROJECT_ID: &str = "_Root";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "@id")]
    pub id: String,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@description")]
    pub description: Option<String>,
    #[serde(alias = "@parentProjectId")]
    pub parent_project_id: Option<String>,
    #[serde(alias = "@archived")]
    pub archived: Option<bool>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    #[serde(alias = "@webUrl")]
    pub web_url: Option<String>,
    pub parent_project: Option<Box<Project>>,
    pub projects: Option<Projects>,
    pub build_types: Option<BuildTypes>,
    pub parameters: Option<Properties>,
    pub project_features: Option<ProjectFeatures>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Projects {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    pub project: Vec<Project>,
}

impl Collection for Projects {
    type Item = Project;

    fn into_items(self) -> Vec<Project> {
        self.project
    }
}

/// Accessor for `projects`.
#[derive(Debug, Clone)]
pub struct ProjectsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> ProjectsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "projects"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    pub fn all(&self) -> ApiResult<Vec<Project>> {
        self.resource.list::<Projects>("")
    }

    pub fn by_locator(&self, locator: &ProjectLocator) -> ApiResult<Project> {
        self.resource.at_locator(locator)?.fetch("")
    }

    pub fn by_id(&self, id: &str) -> ApiResult<Project> {
        self.by_locator(&ProjectLocator::with_id(id))
    }

    pub fn by_name(&self, name: &str) -> ApiResult<Project> {
        self.by_locator(&ProjectLocator::with_name(name))
    }

    /// Creates a project under `parent_id`, or under the root project.
    pub fn create(&self, name: &str, parent_id: Option<&str>) -> ApiResult<Project> {
        let parent = parent_id.unwrap_or(ROOT_PROJECT_ID);
        let body = format!(
            r#"<newProjectDescription name="{}"><parentProject locator="id:{}"/></newProjectDescription>"#,
            xml_escape(name),
            xml_escape(parent)
        );
        let response = self.resource.post("", RequestBody::xml(body))?;
        response.decode(self.resource.format())
    }

    pub fn delete(&self, locator: &ProjectLocator) -> ApiResult<()> {
        self.resource.at_locator(locator)?.delete("")?;
        Ok(())
    }

    /// Branches across the project's build configurations.
    pub fn branches(&self, project: &ProjectLocator, branches: &BranchLocator) -> ApiResult<Vec<Branch>> {
        self.resource
            .at_locator(project)?
            .at("branches")
            .list_matching::<Branches>(branches)
    }

    pub fn features(&self, project: &ProjectLocator) -> ApiResult<Vec<ProjectFeature>> {
        self.resource
            .at_locator(project)?
            .list::<ProjectFeatures>("projectFeatures")
    }

    pub fn feature(&self, project: &ProjectLocator, feature_id: &str) -> ApiResult<ProjectFeature> {
        self.resource
            .at_locator(project)?
            .at("projectFeatures")
            .fetch(format!("id:{feature_id}"))
    }

    /// Adds a feature such as a connection or issue tracker to a project.
    pub fn create_feature(&self, project: &ProjectLocator, feature: &ProjectFeature) -> ApiResult<ProjectFeature> {
        let response = self
            .resource
            .at_locator(project)?
            .post("projectFeatures", RequestBody::xml(feature.to_xml("projectFeature")))?;
        response.decode(self.resource.format())
    }

    pub fn delete_feature(&self, project: &ProjectLocator, feature_id: &str) -> ApiResult<()> {
        self.resource
            .at_locator(project)?
            .at("projectFeatures")
            .delete(format!("id:{feature_id}"))?;
        Ok(())
    }
}
