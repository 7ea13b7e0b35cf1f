//
//  teamcity-cli
//  api/resources/build_configs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build configurations (`buildTypes`).

use serde::{Deserialize, Serialize};

use super::builds::Builds;
use super::common::{xml_escape, Branch, Branches, Properties, Property};
use super::features::{
    ArtifactDependencies, ArtifactDependency, Feature, SnapshotDependencies, SnapshotDependency,
    Step, Steps, Trigger, Triggers,
};
use super::investigations::Investigations;
use super::projects::Project;
use crate::api::client::TeamCityClient;
use crate::api::common::{ApiResult, RequestBody};
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::{BranchLocator, BuildTypeLocator, ProjectLocator};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildType {
    #[serde(alias = "@id")]
    pub id: String,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@description")]
    pub description: Option<String>,
    #[serde(alias = "@projectId")]
    pub project_id: Option<String>,
    #[serde(alias = "@projectName")]
    pub project_name: Option<String>,
    #[serde(alias = "@paused")]
    pub paused: Option<bool>,
    #[serde(alias = "@templateFlag")]
    pub template_flag: Option<bool>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    #[serde(alias = "@webUrl")]
    pub web_url: Option<String>,
    pub project: Option<Project>,
    pub builds: Option<Builds>,
    pub investigations: Option<Investigations>,
    pub parameters: Option<Properties>,
    pub settings: Option<Properties>,
    pub branches: Option<Branches>,
    pub templates: Option<BuildTypes>,
    pub steps: Option<Steps>,
    pub triggers: Option<Triggers>,
    #[serde(rename = "artifact-dependencies")]
    pub artifact_dependencies: Option<ArtifactDependencies>,
    #[serde(rename = "snapshot-dependencies")]
    pub snapshot_dependencies: Option<SnapshotDependencies>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildTypes {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    pub build_type: Vec<BuildType>,
}

impl Collection for BuildTypes {
    type Item = BuildType;

    fn into_items(self) -> Vec<BuildType> {
        self.build_type
    }
}

/// Accessor for `buildTypes`.
#[derive(Debug, Clone)]
pub struct BuildConfigsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> BuildConfigsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "buildTypes"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    pub fn all(&self) -> ApiResult<Vec<BuildType>> {
        self.resource.list::<BuildTypes>("")
    }

    pub fn by_locator(&self, locator: &BuildTypeLocator) -> ApiResult<BuildType> {
        self.resource.at_locator(locator)?.fetch("")
    }

    /// Configurations directly in a project.
    pub fn by_project(&self, project: &ProjectLocator) -> ApiResult<Vec<BuildType>> {
        let projects = Resource::new(self.resource.client(), "projects")
            .with_fields(self.resource.fields().clone());
        projects
            .at_locator(project)?
            .list::<BuildTypes>("buildTypes")
    }

    /// Creates a configuration named `name` in a project.
    pub fn create(&self, project: &ProjectLocator, name: &str) -> ApiResult<BuildType> {
        let projects = Resource::new(self.resource.client(), "projects");
        let response = projects
            .at_locator(project)?
            .post("buildTypes", RequestBody::text(name))?;
        response.decode(self.resource.format())
    }

    pub fn set_pause_status(&self, locator: &BuildTypeLocator, paused: bool) -> ApiResult<()> {
        self.resource
            .at_locator(locator)?
            .put("paused", RequestBody::text(paused.to_string()))?;
        Ok(())
    }

    pub fn pause_status(&self, locator: &BuildTypeLocator) -> ApiResult<bool> {
        self.resource.at_locator(locator)?.flag("paused")
    }

    pub fn delete(&self, locator: &BuildTypeLocator) -> ApiResult<()> {
        self.resource.at_locator(locator)?.delete("")?;
        Ok(())
    }

    pub fn branches(
        &self,
        locator: &BuildTypeLocator,
        branches: &BranchLocator,
    ) -> ApiResult<Vec<Branch>> {
        self.resource
            .at_locator(locator)?
            .at("branches")
            .list_matching::<Branches>(branches)
    }

    pub fn parameters(&self, locator: &BuildTypeLocator) -> ApiResult<Vec<Property>> {
        self.resource
            .at_locator(locator)?
            .list::<Properties>("parameters")
    }

    /// Sets a configuration parameter, creating it if needed.
    pub fn set_parameter(&self, locator: &BuildTypeLocator, name: &str, value: &str) -> ApiResult<()> {
        let path = self
            .resource
            .path()
            .clone()
            .join_locator(locator)?
            .join("parameters")
            .join(name);
        self.resource
            .client()
            .put(path, RequestBody::text(value), self.resource.format())?;
        Ok(())
    }

    /// Templates the configuration is based on.
    pub fn templates(&self, locator: &BuildTypeLocator) -> ApiResult<Vec<BuildType>> {
        self.resource
            .at_locator(locator)?
            .list::<BuildTypes>("templates")
    }

    /// Replaces the configuration's templates with `template_ids`, in order.
    pub fn attach_templates(&self, locator: &BuildTypeLocator, template_ids: &[&str]) -> ApiResult<Vec<BuildType>> {
        let mut body = String::from("<buildTypes>");
        for id in template_ids {
            body.push_str(&format!(r#"<buildType id="{}"/>"#, xml_escape(id)));
        }
        body.push_str("</buildTypes>");
        let response = self
            .resource
            .at_locator(locator)?
            .put("templates", RequestBody::xml(body))?;
        Ok(response.decode::<BuildTypes>(self.resource.format())?.into_items())
    }

    /// Detaches every template.
    pub fn detach_templates(&self, locator: &BuildTypeLocator) -> ApiResult<()> {
        self.resource.at_locator(locator)?.delete("templates")?;
        Ok(())
    }

    pub fn steps(&self, locator: &BuildTypeLocator) -> ApiResult<Vec<Step>> {
        self.resource.at_locator(locator)?.list::<Steps>("steps")
    }

    /// Adds one step from a caller-built `<step>` XML document.
    pub fn post_raw_step(&self, locator: &BuildTypeLocator, xml: &str) -> ApiResult<Step> {
        let response = self
            .resource
            .at_locator(locator)?
            .post("steps", RequestBody::xml(xml))?;
        response.decode(self.resource.format())
    }

    /// Replaces all steps from a caller-built `<steps>` XML document.
    pub fn put_raw_steps(&self, locator: &BuildTypeLocator, xml: &str) -> ApiResult<Vec<Step>> {
        let response = self
            .resource
            .at_locator(locator)?
            .put("steps", RequestBody::xml(xml))?;
        Ok(response.decode::<Steps>(self.resource.format())?.into_items())
    }

    pub fn triggers(&self, locator: &BuildTypeLocator) -> ApiResult<Vec<Trigger>> {
        self.resource.at_locator(locator)?.list::<Triggers>("triggers")
    }

    /// Adds a trigger and returns it as stored, with its server-assigned id.
    pub fn set_trigger(&self, locator: &BuildTypeLocator, trigger: &Trigger) -> ApiResult<Trigger> {
        self.add_feature(locator, "triggers", trigger.to_xml("trigger"))
    }

    pub fn artifact_dependencies(&self, locator: &BuildTypeLocator) -> ApiResult<Vec<ArtifactDependency>> {
        self.resource
            .at_locator(locator)?
            .list::<ArtifactDependencies>("artifact-dependencies")
    }

    pub fn set_artifact_dependency(
        &self,
        locator: &BuildTypeLocator,
        dependency: &ArtifactDependency,
    ) -> ApiResult<ArtifactDependency> {
        self.add_feature(
            locator,
            "artifact-dependencies",
            dependency.to_xml("artifact-dependency"),
        )
    }

    pub fn snapshot_dependencies(&self, locator: &BuildTypeLocator) -> ApiResult<Vec<SnapshotDependency>> {
        self.resource
            .at_locator(locator)?
            .list::<SnapshotDependencies>("snapshot-dependencies")
    }

    pub fn set_snapshot_dependency(
        &self,
        locator: &BuildTypeLocator,
        dependency: &SnapshotDependency,
    ) -> ApiResult<SnapshotDependency> {
        self.add_feature(
            locator,
            "snapshot-dependencies",
            dependency.to_xml("snapshot-dependency"),
        )
    }

    fn add_feature(&self, locator: &BuildTypeLocator, collection: &str, xml: String) -> ApiResult<Feature> {
        let response = self
            .resource
            .at_locator(locator)?
            .post(collection, RequestBody::xml(xml))?;
        response.decode(self.resource.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_type_with_nested_builds_count() {
        let json = r#"{"id":"X","builds":{"count":3}}"#;
        let build_type: BuildType = serde_json::from_str(json).unwrap();
        assert_eq!(build_type.id, "X");
        assert_eq!(build_type.builds.as_ref().and_then(|b| b.count), Some(3));
        assert!(build_type.investigations.is_none());
    }

    #[test]
    fn test_build_types_from_xml() {
        let xml = r#"<buildTypes count="2">
            <buildType id="Bt1" name="Build" projectId="P1" paused="true"/>
            <buildType id="Bt2" name="Test" projectId="P1"/>
        </buildTypes>"#;
        let build_types: BuildTypes = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(build_types.count, Some(2));
        let items = build_types.into_items();
        assert_eq!(items[0].paused, Some(true));
        assert_eq!(items[1].paused, None);
    }

    #[test]
    fn test_build_type_settings_from_json() {
        let json = r#"{"id":"Bt1","templates":{"count":1,"buildType":[{"id":"Tpl"}]},
            "steps":{"count":1,"step":[{"id":"RUNNER_1","type":"simpleRunner"}]},
            "snapshot-dependencies":{"count":0}}"#;
        let build_type: BuildType = serde_json::from_str(json).unwrap();
        let templates = build_type.templates.unwrap().into_items();
        assert_eq!(templates[0].id, "Tpl");
        assert_eq!(build_type.steps.unwrap().step[0].id.as_deref(), Some("RUNNER_1"));
        assert_eq!(build_type.snapshot_dependencies.and_then(|d| d.count), Some(0));
        assert!(build_type.triggers.is_none());
    }
}
