//
//  teamcity-cli
//  locators/resources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Locators for build configurations, projects, branches, VCS roots, tests,
//! users, agents, changes and investigations.
//!
//! # Notes
//!
//! - [`BranchLocator`] and [`AgentLocator`] fall back to a match-all dimension
//!   when empty.
//! - All other locators here fail with `InvalidLocator` unless at least one
//!   identifying dimension (id, name, parent, ...) was set. Paging
//!   dimensions such as `count` do not count as identifying.

use std::fmt;

use super::{BuildLocator, DimensionSet, Locator, ResourceLocator};
use crate::api::common::ApiError;

/// Selects build configurations (build types).
///
/// ```rust
/// use teamcity_cli::locators::{BuildTypeLocator, ProjectLocator, ResourceLocator};
///
/// let locator = BuildTypeLocator::new()
///     .project(ProjectLocator::with_id("Root"))
///     .name("Nightly");
/// assert_eq!(locator.render().unwrap(), "project:(id:Root),name:Nightly");
///
/// assert!(BuildTypeLocator::new().render().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildTypeLocator {
    dims: DimensionSet,
}

impl BuildTypeLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dims.key("id", id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.dims.key("name", name.into());
        self
    }

    /// Configurations directly in a project.
    pub fn project(mut self, project: ProjectLocator) -> Self {
        self.dims.nested("project", &project);
        self
    }

    /// Configurations in a project or any of its subprojects.
    pub fn affected_project(mut self, project: ProjectLocator) -> Self {
        self.dims.nested("affectedProject", &project);
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.dims.option("paused", paused);
        self
    }

    /// Select templates instead of regular configurations.
    pub fn template_flag(mut self, template: bool) -> Self {
        self.dims.option("templateFlag", template);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.dims.option("count", count);
        self
    }
}

impl ResourceLocator for BuildTypeLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("build type", None)
    }
}

/// Selects projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectLocator {
    dims: DimensionSet,
}

impl ProjectLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dims.key("id", id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.dims.key("name", name.into());
        self
    }

    /// Direct children of a project.
    pub fn parent_project(mut self, parent: ProjectLocator) -> Self {
        self.dims.nested("parentProject", &parent);
        self
    }

    /// All descendants of a project.
    pub fn affected_project(mut self, ancestor: ProjectLocator) -> Self {
        self.dims.nested("affectedProject", &ancestor);
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.dims.option("archived", archived);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.dims.option("count", count);
        self
    }
}

impl ResourceLocator for ProjectLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("project", None)
    }
}

/// Which branches the server reports for a build configuration or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchPolicy {
    /// Branches matching the VCS root branch specification.
    VcsBranches,
    /// Active branches matching the VCS root branch specification.
    ActiveVcsBranches,
    /// Branches that have builds.
    HistoryBranches,
    /// Active branches that have builds.
    ActiveHistoryBranches,
    ActiveHistoryAndActiveVcsBranches,
    AllBranches,
}

impl BranchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VcsBranches => "VCS_BRANCHES",
            Self::ActiveVcsBranches => "ACTIVE_VCS_BRANCHES",
            Self::HistoryBranches => "HISTORY_BRANCHES",
            Self::ActiveHistoryBranches => "ACTIVE_HISTORY_BRANCHES",
            Self::ActiveHistoryAndActiveVcsBranches => "ACTIVE_HISTORY_AND_ACTIVE_VCS_BRANCHES",
            Self::AllBranches => "ALL_BRANCHES",
        }
    }
}

impl fmt::Display for BranchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects VCS branches.
///
/// An empty branch locator renders as `default:any`, which matches the
/// default and every non-default branch.
///
/// ```rust
/// use teamcity_cli::locators::{BranchLocator, BranchPolicy, ResourceLocator};
///
/// assert_eq!(BranchLocator::new().render().unwrap(), "default:any");
/// assert_eq!(
///     BranchLocator::with_policy(BranchPolicy::AllBranches).render().unwrap(),
///     "policy:ALL_BRANCHES"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct BranchLocator {
    dims: DimensionSet,
}

impl BranchLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    pub fn with_policy(policy: BranchPolicy) -> Self {
        Self::new().policy(policy)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.dims.key("name", name.into());
        self
    }

    /// Only the default branch (`true`) or only non-default branches (`false`).
    pub fn default_branch(mut self, is_default: bool) -> Self {
        self.dims.key("default", is_default);
        self
    }

    pub fn unspecified(mut self, unspecified: bool) -> Self {
        self.dims.key("unspecified", unspecified);
        self
    }

    pub fn policy(mut self, policy: BranchPolicy) -> Self {
        self.dims.key("policy", policy.as_str());
        self
    }
}

impl ResourceLocator for BranchLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("branch", Some(("default", "any")))
    }
}

/// Selects VCS roots.
#[derive(Debug, Clone, Default)]
pub struct VcsRootLocator {
    dims: DimensionSet,
}

impl VcsRootLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dims.key("id", id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.dims.key("name", name.into());
        self
    }

    pub fn project(mut self, project: ProjectLocator) -> Self {
        self.dims.nested("project", &project);
        self
    }

    /// VCS plugin name such as `jetbrains.git`.
    pub fn vcs_type(mut self, vcs_type: impl Into<String>) -> Self {
        self.dims.key("type", vcs_type.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.dims.option("count", count);
        self
    }
}

impl ResourceLocator for VcsRootLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("VCS root", None)
    }
}

/// Selects tests.
#[derive(Debug, Clone, Default)]
pub struct TestLocator {
    dims: DimensionSet,
}

impl TestLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dims.key("id", id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.dims.key("name", name.into());
        self
    }

    pub fn affected_project(mut self, project: ProjectLocator) -> Self {
        self.dims.nested("affectedProject", &project);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.dims.option("count", count);
        self
    }
}

impl ResourceLocator for TestLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("test", None)
    }
}

/// What a test occurrence query is scoped to.
///
/// ```rust
/// use teamcity_cli::locators::{BuildLocator, ResourceLocator, TestScope};
///
/// let scope = TestScope::Build(BuildLocator::with_id("42"));
/// assert_eq!(scope.render().unwrap(), "build:(id:42)");
/// ```
#[derive(Debug, Clone)]
pub enum TestScope {
    /// Occurrences in a build.
    Build(BuildLocator),
    /// Occurrences in any build of a project's configurations.
    Project(ProjectLocator),
    /// Occurrences of a particular test.
    Test(TestLocator),
}

impl ResourceLocator for TestScope {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        let (dimension, inner) = match self {
            Self::Build(build) => ("build", build.to_locator()?),
            Self::Project(project) => ("affectedProject", project.to_locator()?),
            Self::Test(test) => ("test", test.to_locator()?),
        };
        Ok(Locator::new().dimension(dimension, inner))
    }
}

/// Selects users.
///
/// ```rust
/// use teamcity_cli::locators::{ResourceLocator, UserLocator};
///
/// assert_eq!(UserLocator::with_username("alice").render().unwrap(), "username:alice");
/// ```
#[derive(Debug, Clone, Default)]
pub struct UserLocator {
    dims: DimensionSet,
}

impl UserLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(username: impl Into<String>) -> Self {
        Self::new().username(username)
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dims.key("id", id.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.dims.key("username", username.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.dims.key("email", email.into());
        self
    }

    /// Members of a user group, by group key.
    pub fn group(mut self, group_key: impl Into<String>) -> Self {
        self.dims
            .key("group", Locator::new().dimension("key", group_key.into()));
        self
    }
}

impl ResourceLocator for UserLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("user", None)
    }
}

/// Selects build agents.
///
/// An empty agent locator renders as `defaultFilter:false`, which includes
/// disconnected and unauthorized agents.
#[derive(Debug, Clone, Default)]
pub struct AgentLocator {
    dims: DimensionSet,
}

impl AgentLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dims.key("id", id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.dims.key("name", name.into());
        self
    }

    pub fn connected(mut self, connected: bool) -> Self {
        self.dims.key("connected", connected);
        self
    }

    pub fn authorized(mut self, authorized: bool) -> Self {
        self.dims.key("authorized", authorized);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.dims.key("enabled", enabled);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.dims.option("count", count);
        self
    }
}

impl ResourceLocator for AgentLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("agent", Some(("defaultFilter", "false")))
    }
}

/// Selects VCS changes.
#[derive(Debug, Clone, Default)]
pub struct ChangeLocator {
    dims: DimensionSet,
}

impl ChangeLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self::new().id(id)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dims.key("id", id.into());
        self
    }

    pub fn build_type(mut self, build_type: BuildTypeLocator) -> Self {
        self.dims.nested("buildType", &build_type);
        self
    }

    /// Changes included in a build.
    pub fn build(mut self, build: BuildLocator) -> Self {
        self.dims.nested("build", &build);
        self
    }

    pub fn project(mut self, project: ProjectLocator) -> Self {
        self.dims.nested("project", &project);
        self
    }

    /// Changes committed under a VCS username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.dims.key("username", username.into());
        self
    }

    /// A VCS revision.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.dims.key("version", version.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.dims.option("count", count);
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.dims.option("start", start);
        self
    }
}

impl ResourceLocator for ChangeLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("change", None)
    }
}

/// Selects investigations.
///
/// ```rust
/// use teamcity_cli::locators::{BuildTypeLocator, InvestigationLocator, ResourceLocator};
///
/// let locator = InvestigationLocator::new().build_type(BuildTypeLocator::with_id("Bt1"));
/// assert_eq!(locator.render().unwrap(), "buildType:(id:Bt1)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvestigationLocator {
    dims: DimensionSet,
}

impl InvestigationLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_type(mut self, build_type: BuildTypeLocator) -> Self {
        self.dims.nested("buildType", &build_type);
        self
    }

    pub fn assignee(mut self, user: UserLocator) -> Self {
        self.dims.nested("assignee", &user);
        self
    }

    pub fn affected_project(mut self, project: ProjectLocator) -> Self {
        self.dims.nested("affectedProject", &project);
        self
    }

    /// `TAKEN`, `FIXED` or `GIVEN_UP`.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.dims.key("state", state.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.dims.option("count", count);
        self
    }
}

impl ResourceLocator for InvestigationLocator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        self.dims.finish("investigation", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_invalid(result: Result<String, ApiError>) -> bool {
        matches!(result, Err(ApiError::InvalidLocator(_)))
    }

    #[test]
    fn test_identifying_locators_reject_empty() {
        assert!(is_invalid(BuildTypeLocator::new().render()));
        assert!(is_invalid(ProjectLocator::new().render()));
        assert!(is_invalid(UserLocator::new().render()));
        assert!(is_invalid(VcsRootLocator::new().render()));
        assert!(is_invalid(TestLocator::new().render()));
        assert!(is_invalid(ChangeLocator::new().render()));
        assert!(is_invalid(InvestigationLocator::new().count(10).render()));
    }

    #[test]
    fn test_investigation_locator_nests_user() {
        let locator = InvestigationLocator::new()
            .assignee(UserLocator::with_username("alice"))
            .state("TAKEN");
        assert_eq!(
            locator.render().unwrap(),
            "assignee:(username:alice),state:TAKEN"
        );
    }

    #[test]
    fn test_paging_is_not_identifying() {
        assert!(is_invalid(BuildTypeLocator::new().count(5).render()));
        assert!(is_invalid(ProjectLocator::new().archived(false).render()));
    }

    #[test]
    fn test_match_all_tokens() {
        assert_eq!(BranchLocator::new().render().unwrap(), "default:any");
        assert_eq!(AgentLocator::new().render().unwrap(), "defaultFilter:false");
    }

    #[test]
    fn test_factories() {
        assert_eq!(BuildTypeLocator::with_id("Bt1").render().unwrap(), "id:Bt1");
        assert_eq!(
            BuildTypeLocator::with_name("Unit tests").render().unwrap(),
            "name:Unit tests"
        );
        assert_eq!(ProjectLocator::with_name("Root").render().unwrap(), "name:Root");
        assert_eq!(UserLocator::with_id("7").render().unwrap(), "id:7");
        assert_eq!(VcsRootLocator::with_id("Vcs1").render().unwrap(), "id:Vcs1");
        assert_eq!(AgentLocator::with_name("agent-1").render().unwrap(), "name:agent-1");
    }

    #[test]
    fn test_project_children() {
        let locator = ProjectLocator::new().parent_project(ProjectLocator::with_id("_Root"));
        assert_eq!(locator.render().unwrap(), "parentProject:(id:_Root)");
    }

    #[test]
    fn test_branch_policy() {
        let locator = BranchLocator::with_policy(BranchPolicy::ActiveVcsBranches);
        assert_eq!(locator.render().unwrap(), "policy:ACTIVE_VCS_BRANCHES");
    }

    #[test]
    fn test_branch_name_with_colon_is_wrapped() {
        let locator = BranchLocator::with_name("feature:x");
        assert_eq!(locator.render().unwrap(), "name:(feature:x)");
    }

    #[test]
    fn test_user_group_membership() {
        let locator = UserLocator::new().group("ALL_USERS_GROUP");
        assert_eq!(locator.render().unwrap(), "group:(key:ALL_USERS_GROUP)");
    }

    #[test]
    fn test_change_for_build_type() {
        let locator = ChangeLocator::new()
            .build_type(BuildTypeLocator::with_id("Bt1"))
            .count(1);
        assert_eq!(locator.render().unwrap(), "buildType:(id:Bt1),count:1");
    }

    #[test]
    fn test_test_scopes() {
        let project = TestScope::Project(ProjectLocator::with_id("P1"));
        let test = TestScope::Test(TestLocator::with_id("-123"));
        assert_eq!(project.render().unwrap(), "affectedProject:(id:P1)");
        assert_eq!(test.render().unwrap(), "test:(id:-123)");
        assert!(is_invalid(TestScope::Test(TestLocator::new()).render()));
    }

    #[test]
    fn test_agent_filters() {
        let locator = AgentLocator::new().connected(true).authorized(true);
        assert_eq!(locator.render().unwrap(), "connected:true,authorized:true");
    }
}
