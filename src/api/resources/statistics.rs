//
//  teamcity-cli
//  api/resources/statistics.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build statistics (`builds/<locator>/statistics`).
//!
//! Values such as `BuildDuration` or `SuccessRate` arrive as a property
//! collection; every value is a string.

use super::common::Properties;
use crate::api::client::TeamCityClient;
use crate::api::common::ApiResult;
use crate::api::resource::Resource;
use crate::fields::Fields;
use crate::locators::BuildLocator;

/// Accessor for build statistics.
#[derive(Debug, Clone)]
pub struct StatisticsApi<'a> {
    resource: Resource<'a>,
}

impl<'a> StatisticsApi<'a> {
    pub(crate) fn new(client: &'a TeamCityClient) -> Self {
        Self {
            resource: Resource::new(client, "builds"),
        }
    }

    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        Self {
            resource: self.resource.with_fields(fields),
        }
    }

    pub fn by_build(&self, build: &BuildLocator) -> ApiResult<Properties> {
        self.resource.at_locator(build)?.fetch("statistics")
    }

    pub fn by_build_id(&self, id: &str) -> ApiResult<Properties> {
        self.by_build(&BuildLocator::with_id(id))
    }
}
