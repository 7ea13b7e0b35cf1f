//
//  teamcity-cli
//  api/resources/features.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed settings attached to a project or build configuration.
//!
//! Build steps, triggers, artifact and snapshot dependencies and project
//! features all share one shape on the wire: an element with `id`, `name`,
//! `type` and `disabled` attributes, a `properties` block and, for
//! dependencies, a `source-buildType` reference. They are modelled by one
//! [`Feature`] type and differ only by the collection that wraps them.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::build_configs::BuildType;
use super::common::{xml_escape, Properties, Property};
use crate::api::resource::Collection;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Feature {
    #[serde(alias = "@id")]
    pub id: Option<String>,
    #[serde(alias = "@name")]
    pub name: Option<String>,
    #[serde(rename = "type", alias = "@type")]
    pub kind: Option<String>,
    #[serde(alias = "@disabled")]
    pub disabled: Option<bool>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub properties: Option<Properties>,
    #[serde(rename = "source-buildType")]
    pub source_build_type: Option<BuildType>,
}

pub type Step = Feature;
pub type Trigger = Feature;
pub type ArtifactDependency = Feature;
pub type SnapshotDependency = Feature;
pub type ProjectFeature = Feature;

impl Feature {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Adds a property; repeated names are sent as given.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .get_or_insert_with(Properties::default)
            .property
            .push(Property {
                name: name.into(),
                value: Some(value.into()),
                inherited: None,
            });
        self
    }

    /// The configuration a dependency points at.
    pub fn source_build_type(mut self, id: impl Into<String>) -> Self {
        self.source_build_type = Some(BuildType {
            id: id.into(),
            ..BuildType::default()
        });
        self
    }

    /// The value of the property called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    /// Renders the feature as the XML element `element`.
    pub(crate) fn to_xml(&self, element: &str) -> String {
        let mut xml = format!("<{element}");
        let attributes = [
            ("id", self.id.as_deref()),
            ("name", self.name.as_deref()),
            ("type", self.kind.as_deref()),
        ];
        for (key, value) in attributes {
            if let Some(value) = value {
                let _ = write!(xml, r#" {key}="{}""#, xml_escape(value));
            }
        }
        if let Some(disabled) = self.disabled {
            let _ = write!(xml, r#" disabled="{disabled}""#);
        }
        xml.push('>');

        let properties = self.properties.as_ref().map(|p| p.property.as_slice()).unwrap_or_default();
        if !properties.is_empty() {
            xml.push_str("<properties>");
            for property in properties {
                let _ = write!(
                    xml,
                    r#"<property name="{}" value="{}"/>"#,
                    xml_escape(&property.name),
                    xml_escape(property.value.as_deref().unwrap_or_default())
                );
            }
            xml.push_str("</properties>");
        }
        if let Some(source) = &self.source_build_type {
            let _ = write!(xml, r#"<source-buildType id="{}"/>"#, xml_escape(&source.id));
        }
        let _ = write!(xml, "</{element}>");
        xml
    }
}

macro_rules! feature_collection {
    ($(#[$meta:meta])* $name:ident, $field:ident, $wire:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $name {
            #[serde(alias = "@count")]
            pub count: Option<u32>,
            #[serde(alias = "@href")]
            pub href: Option<String>,
            #[serde(rename = $wire)]
            pub $field: Vec<Feature>,
        }

        impl Collection for $name {
            type Item = Feature;

            fn into_items(self) -> Vec<Feature> {
                self.$field
            }
        }
    };
}

feature_collection!(
    /// Build steps of a configuration.
    Steps, step, "step"
);
feature_collection!(Triggers, trigger, "trigger");
feature_collection!(ArtifactDependencies, artifact_dependency, "artifact-dependency");
feature_collection!(SnapshotDependencies, snapshot_dependency, "snapshot-dependency");
feature_collection!(ProjectFeatures, project_feature, "projectFeature");
