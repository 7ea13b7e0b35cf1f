//
//  teamcity-cli
//  locators/build.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build locator.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{format_date, BranchLocator, BuildTypeLocator, DimensionSet, Locator, LocatorValue};
use super::{ProjectLocator, ResourceLocator, UserLocator};
use crate::api::common::ApiError;

/// Final status of a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    Success,
    Failure,
    Error,
    Unknown,
}

impl BuildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Error => "ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(Self::Success),
            "FAILURE" => Ok(Self::Failure),
            "ERROR" => Ok(Self::Error),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(ApiError::InvalidLocator(format!(
                "unknown build status '{other}' (expected SUCCESS, FAILURE, ERROR or UNKNOWN)"
            ))),
        }
    }
}

/// Selects builds.
///
/// With no dimensions the locator renders as `defaultFilter:false`, which
/// asks the server for every build instead of its default subset.
///
/// # Example
///
/// ```rust
/// use teamcity_cli::locators::{BuildLocator, ResourceLocator};
///
/// assert_eq!(BuildLocator::new().render().unwrap(), "defaultFilter:false");
/// assert_eq!(BuildLocator::with_id("42").render().unwrap(), "id:42");
/// assert_eq!(BuildLocator::running_builds().render().unwrap(), "running:true");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildLocator {
    dims: DimensionSet,
}

impl BuildLocator {
    /// An empty locator matching all builds.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    pub fn with_number(number: impl Into<String>) -> Self {
        Self::new().number(number)
    }

    pub fn running_builds() -> Self {
        Self::new().running(true)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dims.key("id", id.into());
        self
    }

    pub fn build_type(mut self, build_type: BuildTypeLocator) -> Self {
        self.dims.nested("buildType", &build_type);
        self
    }

    /// Builds of every configuration in a project and its subprojects.
    pub fn affected_project(mut self, project: ProjectLocator) -> Self {
        self.dims.nested("affectedProject", &project);
        self
    }

    /// Builds triggered by a user.
    pub fn user(mut self, user: UserLocator) -> Self {
        self.dims.nested("user", &user);
        self
    }

    pub fn agent_name(mut self, name: impl Into<String>) -> Self {
        self.dims.key("agentName", name.into());
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.dims.key("number", number.into());
        self
    }

    pub fn status(mut self, status: BuildStatus) -> Self {
        self.dims.key("status", status.as_str());
        self
    }

    pub fn branch(mut self, branch: BranchLocator) -> Self {
        self.dims.nested("branch", &branch);
        self
    }

    /// Shorthand for a branch selected by name.
    pub fn branch_name(self, name: impl Into<String>) -> Self {
        self.branch(BranchLocator::with_name(name))
    }

    pub fn personal(mut self, personal: bool) -> Self {
        self.dims.key("personal", personal);
        self
    }

    pub fn canceled(mut self, canceled: bool) -> Self {
        self.dims.key("canceled", canceled);
        self
    }

    pub fn running(mut self, running: bool) -> Self {
        self.dims.key("running", running);
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.dims.key("pinned", pinned);
        self
    }

    /// Builds carrying all of the given tags, rendered as `tags:(a,b)`.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        if !tags.is_empty() {
            self.dims.key("tags", LocatorValue::List(tags));
        }
        self
    }

    /// Builds started after the build selected by `since`.
    pub fn since_build(mut self, since: BuildLocator) -> Self {
        self.dims.nested("sinceBuild", &since);
        self
    }

    pub fn since_date(mut self, date: DateTime<Utc>) -> Self {
        self.dims.key("sinceDate", format_date(&date));
        self
    }

    pub fn until_date(mut self, date: DateTime<Utc>) -> Self {
        self.dims.key("untilDate", format_date(&date));
        self
    }

    /// Whether the server applies its default filter (no personal, canceled
    /// or failed-to-start builds, default branch only).
    pub fn default_filter(mut self, enabled: bool) -> Self {
        self.dims.option("defaultFilter", enabled);
        self
    }

    /// Maximum number of builds to return.
    pub fn count(mut self, count: u32) -> Self {
        self.dims.option("count", count);
        self
    }

    /// Number of matching builds to skip.
    pub fn start(mut self, start: u32) -> Self {
        self.dims.option("start", start);
        self
    }

    /// Maximum number of builds the server scans while matching.
    pub fn lookup_limit(mut self, limit: u32) -> Self {
        self.dims.option("lookupLimit", limit);
        self
    }
}

impl ResourceLocator for BuildLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("build", Some(("defaultFilter", "false")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_build_locator_matches_all() {
        assert_eq!(BuildLocator::new().render().unwrap(), "defaultFilter:false");
    }

    #[test]
    fn test_build_type_status_count_order() {
        let locator = BuildLocator::new()
            .build_type(BuildTypeLocator::with_id("Bt1"))
            .status(BuildStatus::Failure)
            .count(5);
        assert_eq!(
            locator.render().unwrap(),
            "buildType:(id:Bt1),status:FAILURE,count:5"
        );
    }

    #[test]
    fn test_since_date_and_status() {
        let date = Utc.with_ymd_and_hms(2024, 12, 30, 17, 25, 39).unwrap();
        let locator = BuildLocator::new()
            .since_date(date)
            .status(BuildStatus::Failure);
        assert_eq!(
            locator.render().unwrap(),
            "sinceDate:20241230T172539+0000,status:FAILURE"
        );
    }

    #[test]
    fn test_tags_render_as_list() {
        let locator = BuildLocator::new()
            .build_type(BuildTypeLocator::with_id("Bt1"))
            .tags(["release", "nightly"]);
        assert_eq!(
            locator.render().unwrap(),
            "buildType:(id:Bt1),tags:(release,nightly)"
        );
    }

    #[test]
    fn test_paging_only_keeps_paging() {
        let locator = BuildLocator::new().count(1);
        assert_eq!(locator.render().unwrap(), "count:1");
    }

    #[test]
    fn test_explicit_default_filter_is_not_duplicated() {
        let locator = BuildLocator::new().default_filter(false).count(10);
        assert_eq!(locator.render().unwrap(), "defaultFilter:false,count:10");
    }

    #[test]
    fn test_invalid_nested_build_type_fails() {
        let locator = BuildLocator::new().build_type(BuildTypeLocator::new());
        assert!(matches!(
            locator.to_locator(),
            Err(ApiError::InvalidLocator(_))
        ));
    }

    #[test]
    fn test_branch_name_with_slashes() {
        let locator = BuildLocator::new()
            .branch_name("refs/heads/main")
            .pinned(true);
        assert_eq!(
            locator.render().unwrap(),
            "branch:(name:refs/heads/main),pinned:true"
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("failure".parse::<BuildStatus>().unwrap(), BuildStatus::Failure);
        assert!("broken".parse::<BuildStatus>().is_err());
    }
}
