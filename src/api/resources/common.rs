//
//  teamcity-cli
//  api/resources/common.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Entities shared by several resources.
//!
//! Every entity deserializes from both representations the server offers:
//! JSON keys (`"count": 2`) and XML attributes (`count="2"`), the latter
//! through `@`-prefixed aliases.

use serde::{Deserialize, Serialize};

use crate::api::resource::Collection;

/// A reference to another resource that was not expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Link {
    #[serde(alias = "@href")]
    pub href: Option<String>,
    #[serde(alias = "@count")]
    pub count: Option<u32>,
}

/// A name/value pair: parameter, statistic value, setting or VCS property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Property {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@value")]
    pub value: Option<String>,
    #[serde(alias = "@inherited")]
    pub inherited: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Properties {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub property: Vec<Property>,
}

impl Properties {
    /// The value of the property called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.property
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.value.as_deref())
    }
}

impl Collection for Properties {
    type Item = Property;

    fn into_items(self) -> Vec<Property> {
        self.property
    }
}

/// A VCS branch known to a build configuration or project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Branch {
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@internalName")]
    pub internal_name: Option<String>,
    #[serde(rename = "default", alias = "@default")]
    pub is_default: Option<bool>,
    #[serde(alias = "@active")]
    pub active: Option<bool>,
    #[serde(alias = "@lastActivity")]
    pub last_activity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Branches {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
    pub branch: Vec<Branch>,
}

impl Collection for Branches {
    type Item = Branch;

    fn into_items(self) -> Vec<Branch> {
        self.branch
    }
}

/// Escapes a value for use inside an XML attribute.
pub(crate) fn xml_escape(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_from_json_and_xml() {
        let json = r#"{"count":2,"property":[{"name":"a","value":"1"},{"name":"b","value":"2","inherited":true}]}"#;
        let xml = r#"<properties count="2"><property name="a" value="1"/><property name="b" value="2" inherited="true"/></properties>"#;

        let from_json: Properties = serde_json::from_str(json).unwrap();
        let from_xml: Properties = quick_xml::de::from_str(xml).unwrap();

        assert_eq!(from_json, from_xml);
        assert_eq!(from_json.get("b"), Some("2"));
        assert_eq!(from_json.property[1].inherited, Some(true));
    }

    #[test]
    fn test_branch_default_flag() {
        let xml = r#"<branches count="1"><branch name="main" default="true"/></branches>"#;
        let branches: Branches = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(branches.branch[0].is_default, Some(true));

        let json = r#"{"branch":[{"name":"main","default":true}]}"#;
        let branches: Branches = serde_json::from_str(json).unwrap();
        assert_eq!(branches.into_items()[0].name, "main");
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape(r#"a<b>&"c""#), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
