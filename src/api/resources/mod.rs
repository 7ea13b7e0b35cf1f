//
//  teamcity-cli
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TeamCity Resources
//!
//! Entities and accessors for each resource family. Accessors are obtained
//! from the client and borrow it:
//!
//! | Accessor | Base path |
//! |----------|-----------|
//! | [`TeamCityClient::server`] | `server` |
//! | [`TeamCityClient::projects`] | `projects` |
//! | [`TeamCityClient::build_configs`] | `buildTypes` |
//! | [`TeamCityClient::builds`] | `builds` |
//! | [`TeamCityClient::build_queue`] | `buildQueue` |
//! | [`TeamCityClient::users`] | `users`, `userGroups` |
//! | [`TeamCityClient::agents`] | `agents` |
//! | [`TeamCityClient::vcs_roots`] | `vcs-roots` |
//! | [`TeamCityClient::changes`] | `changes` |
//! | [`TeamCityClient::tests`] | `testOccurrences` |
//! | [`TeamCityClient::artifacts`] | `builds/<locator>/artifacts` |
//! | [`TeamCityClient::statistics`] | `builds/<locator>/statistics` |
//! | [`TeamCityClient::investigations`] | `investigations` |
//!
//! Steps, triggers, dependencies and templates are reached through
//! [`BuildConfigsApi`]; project features through [`ProjectsApi`]. All of
//! them except templates share the [`Feature`] entity.
//!
//! ## Example
//!
//! ```rust,no_run
//! use teamcity_cli::api::TeamCityClient;
//! use teamcity_cli::fields::{BuildTypeField, BuildsField};
//! use teamcity_cli::locators::BuildTypeLocator;
//!
//! let mut client = TeamCityClient::new("ci.example.com", true)?;
//! client.connect("admin", "secret");
//!
//! let config = client
//!     .build_configs()
//!     .with_fields(BuildTypeField::with_fields().id().builds(BuildsField::with_fields().count()))
//!     .by_locator(&BuildTypeLocator::with_id("MyProject_Build"))?;
//! # Ok::<(), teamcity_cli::api::ApiError>(())
//! ```

mod agents;
mod artifacts;
mod build_configs;
mod build_queue;
mod builds;
mod changes;
mod common;
mod features;
mod investigations;
mod projects;
mod server;
mod statistics;
mod test_occurrences;
mod users;
mod vcs_roots;

pub use agents::{Agent, Agents, AgentsApi};
pub use artifacts::{ArtifactFile, ArtifactFiles, ArtifactsApi, BuildConfigArtifacts};
pub use build_configs::{BuildConfigsApi, BuildType, BuildTypes};
pub use build_queue::BuildQueueApi;
pub use builds::{Build, Builds, BuildsApi, Tag, Tags};
pub use changes::{Change, Changes, ChangesApi};
pub use common::{Branch, Branches, Link, Properties, Property};
pub use features::{
    ArtifactDependencies, ArtifactDependency, Feature, ProjectFeature, ProjectFeatures,
    SnapshotDependencies, SnapshotDependency, Step, Steps, Trigger, Triggers,
};
pub use investigations::{Assignment, Investigation, Investigations, InvestigationsApi, Resolution};
pub use projects::{Project, Projects, ProjectsApi, ROOT_PROJECT_ID};
pub use server::{Plugin, Plugins, Server, ServerApi};
pub use statistics::StatisticsApi;
pub use test_occurrences::{TestOccurrence, TestOccurrences, TestsApi};
pub use users::{Group, Groups, NewUser, Role, Roles, User, Users, UsersApi};
pub use vcs_roots::{NewVcsRoot, VcsRoot, VcsRoots, VcsRootsApi};

use super::client::TeamCityClient;

impl TeamCityClient {
    pub fn server(&self) -> ServerApi<'_> {
        ServerApi::new(self)
    }

    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    pub fn build_configs(&self) -> BuildConfigsApi<'_> {
        BuildConfigsApi::new(self)
    }

    pub fn builds(&self) -> BuildsApi<'_> {
        BuildsApi::new(self)
    }

    pub fn build_queue(&self) -> BuildQueueApi<'_> {
        BuildQueueApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn agents(&self) -> AgentsApi<'_> {
        AgentsApi::new(self)
    }

    pub fn vcs_roots(&self) -> VcsRootsApi<'_> {
        VcsRootsApi::new(self)
    }

    pub fn changes(&self) -> ChangesApi<'_> {
        ChangesApi::new(self)
    }

    pub fn tests(&self) -> TestsApi<'_> {
        TestsApi::new(self)
    }

    pub fn artifacts(&self) -> ArtifactsApi<'_> {
        ArtifactsApi::new(self)
    }

    pub fn statistics(&self) -> StatisticsApi<'_> {
        StatisticsApi::new(self)
    }

    pub fn investigations(&self) -> InvestigationsApi<'_> {
        InvestigationsApi::new(self)
    }
}
