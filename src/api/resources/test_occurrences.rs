//
//  teamcity-cli
//  api/resources/test_occurrences.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test occurrences.

use serde::{Deserialize, Serialize};

use crate::api::client::TeamCityClient;
use crate::api::common::ApiResult;
use crate::api::resource::{Collection, Resource};
use crate::fields::Fields;
use crate::locators::TestScope;

/// One run of a test inside a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestOccurrence {
    #[serde(alias = "@id")]
    pub id: String,
    #[serde(alias = "@name")]
    pub name: String,
    #[serde(alias = "@status")]
    pub status: Option<String>,
    /// Milliseconds.
    #[serde(alias = "@duration")]
    pub duration: Option<u64>,
    #[serde(alias = "@ignored")]
    pub ignored: Option<bool>,
    #[serde(alias = "@muted")]
    pub muted: Option<bool>,
    #[serde(alias = "@currentlyInvestigated")]
    pub currently_investigated: Option<bool>,
    #[serde(alias = "@href")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestOccurrences {
    #[serde(alias = "@count")]
    pub count: Option<u32>,
    #[serde(alias = "@passed")]
    pub passed: Option<u32>,
    #[serde(alias = "@failed")]
    pub failed: Option<u32>,
    #[serde(alias = "@ignored")]
    pub ignored: Option<u32>,
    #[serde(alias = "@muted")]
    pub muted: Option<u32>,
    pub test_occurrence: Vec<TestOccurrence>,
}

impl Collection for TestOccurrences {
    type Item = TestOccurrence;

    fn into_items(self) -> Vec<TestOccurrence> {
        self.test_occurrence
    }
}

/// Accessor for `testOccurrences`.
#[derive(Debug, Clone)]
pub struct TestsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> TestsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "testOccurrences"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    /// Occurrences in a build, a project, or of a single test.
    pub fn occurrences(&self, scope: &TestScope) -> ApiResult<Vec<TestOccurrence>> {
        self.resource.list_matching::<TestOccurrences>(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrences_from_json() {
        let json = r#"{"count":2,"passed":1,"failed":1,"testOccurrence":[
            {"id":"build:(id:1),id:1","name":"a.Test.ok","status":"SUCCESS","duration":12},
            {"id":"build:(id:1),id:2","name":"a.Test.broken","status":"FAILURE"}
        ]}"#;
        let occurrences: TestOccurrences = serde_json::from_str(json).unwrap();
        assert_eq!(occurrences.failed, Some(1));
        let items = occurrences.into_items();
        assert_eq!(items[0].duration, Some(12));
        assert_eq!(items[1].status.as_deref(), Some("FAILURE"));
    }
}
