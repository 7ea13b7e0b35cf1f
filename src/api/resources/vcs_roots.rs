//
//  teamcity-cli
//  api/resources/vcs_roots.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! VCS roots.

use serde::{Deserialize, Serialize};

use super::common::{xml_escape, Properties};
use super::projects::Project;
use crate::api::client::TeamCityClient;
use crate::api::common::{ApiResult, RequestBody};
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::VcsRootLocator;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VcsRoot {
    #[serde(alias = "@id")]
    pub id: String,
    #[serde(alias = "@name")]
    pub name: Option<String>,
    #[serde(alias = "@vcsName")]
    pub vcs_name: Option<String>,
    #[serde(alias = "@status")]
    pub status: Option<String>,
    #[serde(alias = "@lastChecked")]
    pub last_checked: Option<String>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub project: Option<Project>,
    pub properties: Option<Properties>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VcsRoots {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    #[serde(alias = "@nextHref")]
    pub next_href: Option<String>,
    #[serde(rename = "vcs-root")]
    pub vcs_root: Vec<VcsRoot>,
}

impl Collection for VcsRoots {
    type Item = VcsRoot;

    fn into_items(self) -> Vec<VcsRoot> {
        self.vcs_root
    }
}

/// A VCS root to create.
#[derive(Debug, Clone, Default)]
pub struct NewVcsRoot {
    pub id: String,
    pub name: String,
    /// VCS plugin, e.g. `jetbrains.git`.
    pub vcs_name: String,
    pub project_id: String,
    pub properties: Vec<(String, String)>,
}

impl NewVcsRoot {
    fn to_xml(&self) -> String {
        let properties: String = self
            .properties
            .iter()
            .map(|(name, value)| {
                format!(
                    r#"<property name="{}" value="{}"/>"#,
                    xml_escape(name),
                    xml_escape(value)
                )
            })
            .collect();
        format!(
            r#"<vcs-root id="{}" name="{}" vcsName="{}"><project id="{}"/><properties>{}</properties></vcs-root>"#,
            xml_escape(&self.id),
            xml_escape(&self.name),
            xml_escape(&self.vcs_name),
            xml_escape(&self.project_id),
            properties
        )
    }
}

/// Accessor for `vcs-roots`.
#[derive(Debug, Clone)]
pub struct VcsRootsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> VcsRootsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "vcs-roots"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    pub fn all(&self) -> ApiResult<Vec<VcsRoot>> {
        self.resource.list::<VcsRoots>("")
    }

    pub fn by_id(&self, id: &str) -> ApiResult<VcsRoot> {
        self.resource.at_locator(&VcsRootLocator::with_id(id))?.fetch("")
    }

    pub fn create(&self, root: &NewVcsRoot) -> ApiResult<VcsRoot> {
        let response = self.resource.post("", RequestBody::xml(root.to_xml()))?;
        response.decode(self.resource.format())
    }

    pub fn delete(&self, locator: &VcsRootLocator) -> ApiResult<()> {
        self.resource.at_locator(locator)?.delete("")?;
        Ok(())
    }

    pub fn set_property(&self, locator: &VcsRootLocator, name: &str, value: &str) -> ApiResult<()> {
        let path = self
            .resource
            .path()
            .clone()
            .join_locator(locator)?
            .join("properties")
            .join(name);
        self.resource
            .client()
            .put(path, RequestBody::text(value), self.resource.format())?;
        Ok(())
    }

    pub fn delete_property(&self, locator: &VcsRootLocator, name: &str) -> ApiResult<()> {
        let path = self
            .resource
            .path()
            .clone()
            .join_locator(locator)?
            .join("properties")
            .join(name);
        self.resource.client().delete(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vcs_roots_hyphenated_collection() {
        let json = r#"{"count":1,"vcs-root":[{"id":"Root_Git","name":"git","vcsName":"jetbrains.git"}]}"#;
        let roots: VcsRoots = serde_json::from_str(json).unwrap();
        assert_eq!(roots.into_items()[0].vcs_name.as_deref(), Some("jetbrains.git"));

        let xml = r#"<vcs-roots count="1"><vcs-root id="Root_Git" name="git"/></vcs-roots>"#;
        let roots: VcsRoots = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(roots.into_items()[0].id, "Root_Git");
    }

    #[test]
    fn test_new_vcs_root_xml() {
        let root = NewVcsRoot {
            id: "P1_Git".to_string(),
            name: "Git & more".to_string(),
            vcs_name: "jetbrains.git".to_string(),
            project_id: "P1".to_string(),
            properties: vec![("url".to_string(), "https://git/repo.git".to_string())],
        };
        assert_eq!(
            root.to_xml(),
            r#"<vcs-root id="P1_Git" name="Git &amp; more" vcsName="jetbrains.git"><project id="P1"/><properties><property name="url" value="https://git/repo.git"/></properties></vcs-root>"#
        );
    }
}
