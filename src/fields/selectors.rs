//
//  teamcity-cli
//  fields/selectors.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed field selectors for TeamCity entities.
//!
//! Each selector is a small immutable builder over [`Fields`]: every method
//! consumes the selector and returns a new one with the attribute added, in
//! call order. Nested objects take the selector of the nested entity.
//!
//! ```rust
//! use teamcity_cli::fields::{BuildTypeField, BuildsField};
//!
//! let selection = BuildTypeField::with_fields()
//!     .id()
//!     .builds(BuildsField::with_fields().count());
//! assert_eq!(selection.to_string(), "id,builds(count)");
//! ```

use std::fmt;

use super::Fields;

macro_rules! field_selector {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $flag:ident => $wire:literal ),* $(,)?
        }
        $( nested {
            $( $child:ident : $child_ty:ident => $child_wire:literal ),* $(,)?
        } )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name(Fields);

        impl $name {
            /// Starts an empty selection.
            pub fn with_fields() -> Self {
                Self::default()
            }

            $(
                #[doc = concat!("Includes the `", $wire, "` attribute.")]
                pub fn $flag(self) -> Self {
                    Self(self.0.with($wire))
                }
            )*

            $($(
                #[doc = concat!("Includes `", $child_wire, "` with a nested selection.")]
                pub fn $child(self, sub: $child_ty) -> Self {
                    Self(self.0.with_nested($child_wire, sub))
                }
            )*)?

            /// Includes an attribute this selector has no method for.
            pub fn extra(self, name: &str) -> Self {
                Self(self.0.with(name))
            }

            pub fn into_fields(self) -> Fields {
                self.0
            }
        }

        impl From<$name> for Fields {
            fn from(selector: $name) -> Self {
                selector.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

field_selector! {
    /// Attributes of a single build.
    BuildField {
        id => "id",
        task_id => "taskId",
        number => "number",
        status => "status",
        state => "state",
        branch_name => "branchName",
        default_branch => "defaultBranch",
        build_type_id => "buildTypeId",
        status_text => "statusText",
        queued_date => "queuedDate",
        start_date => "startDate",
        finish_date => "finishDate",
        pinned => "pinned",
        personal => "personal",
        composite => "composite",
        href => "href",
        web_url => "webUrl",
    }
    nested {
        build_type: BuildTypeField => "buildType",
        agent: AgentField => "agent",
        changes: ChangesField => "changes",
        properties: PropertiesField => "properties",
        resulting_properties: PropertiesField => "resultingProperties",
        statistics: PropertiesField => "statistics",
        snapshot_dependencies: BuildsField => "snapshot-dependencies",
        artifact_dependencies: BuildsField => "artifact-dependencies",
        compatible_agents: CompatibleAgentsField => "compatibleAgents",
    }
}

field_selector! {
    /// A collection of builds.
    BuildsField {
        count => "count",
        href => "href",
        next_href => "nextHref",
        prev_href => "prevHref",
    }
    nested {
        build: BuildField => "build",
    }
}

field_selector! {
    /// Attributes of a build configuration.
    BuildTypeField {
        id => "id",
        internal_id => "internalId",
        name => "name",
        description => "description",
        project_id => "projectId",
        project_name => "projectName",
        paused => "paused",
        template_flag => "templateFlag",
        href => "href",
        web_url => "webUrl",
    }
    nested {
        project: ProjectField => "project",
        builds: BuildsField => "builds",
        investigations: InvestigationsField => "investigations",
        compatible_agents: CompatibleAgentsField => "compatibleAgents",
        parameters: PropertiesField => "parameters",
        settings: PropertiesField => "settings",
        branches: BranchesField => "branches",
        templates: BuildTypesField => "templates",
        steps: FeaturesField => "steps",
        triggers: FeaturesField => "triggers",
        artifact_dependencies: FeaturesField => "artifact-dependencies",
        snapshot_dependencies: FeaturesField => "snapshot-dependencies",
    }
}

field_selector! {
    /// A collection of build configurations.
    BuildTypesField {
        count => "count",
        href => "href",
    }
    nested {
        build_type: BuildTypeField => "buildType",
    }
}

field_selector! {
    /// Attributes of a project.
    ProjectField {
        id => "id",
        internal_id => "internalId",
        name => "name",
        description => "description",
        parent_project_id => "parentProjectId",
        archived => "archived",
        href => "href",
        web_url => "webUrl",
    }
    nested {
        parent_project: ProjectField => "parentProject",
        projects: ProjectsField => "projects",
        build_types: BuildTypesField => "buildTypes",
        templates: BuildTypesField => "templates",
        parameters: PropertiesField => "parameters",
        project_features: FeaturesField => "projectFeatures",
    }
}

field_selector! {
    /// A collection of projects.
    ProjectsField {
        count => "count",
        href => "href",
    }
    nested {
        project: ProjectField => "project",
    }
}

field_selector! {
    /// Attributes of a user.
    UserField {
        id => "id",
        username => "username",
        name => "name",
        email => "email",
        last_login => "lastLogin",
        href => "href",
    }
    nested {
        properties: PropertiesField => "properties",
    }
}

field_selector! {
    /// A collection of users.
    UsersField {
        count => "count",
    }
    nested {
        user: UserField => "user",
    }
}

field_selector! {
    /// Attributes of a build agent.
    AgentField {
        id => "id",
        name => "name",
        type_id => "typeId",
        connected => "connected",
        enabled => "enabled",
        authorized => "authorized",
        uptodate => "uptodate",
        ip => "ip",
        href => "href",
        web_url => "webUrl",
    }
    nested {
        properties: PropertiesField => "properties",
    }
}

field_selector! {
    /// A collection of build agents.
    AgentsField {
        count => "count",
        href => "href",
        next_href => "nextHref",
    }
    nested {
        agent: AgentField => "agent",
    }
}

field_selector! {
    /// Agents compatible with a build or build configuration.
    CompatibleAgentsField {
        count => "count",
        href => "href",
    }
    nested {
        agent: AgentField => "agent",
    }
}

field_selector! {
    /// Attributes of a VCS root.
    VcsRootField {
        id => "id",
        name => "name",
        vcs_name => "vcsName",
        status => "status",
        last_checked => "lastChecked",
        href => "href",
    }
    nested {
        project: ProjectField => "project",
        properties: PropertiesField => "properties",
    }
}

field_selector! {
    /// A collection of VCS roots.
    VcsRootsField {
        count => "count",
        href => "href",
        next_href => "nextHref",
    }
    nested {
        vcs_root: VcsRootField => "vcs-root",
    }
}

field_selector! {
    /// Attributes of a VCS change.
    ChangeField {
        id => "id",
        version => "version",
        username => "username",
        date => "date",
        comment => "comment",
        href => "href",
        web_url => "webUrl",
    }
    nested {
        user: UserField => "user",
    }
}

field_selector! {
    /// A collection of VCS changes.
    ChangesField {
        count => "count",
        href => "href",
        next_href => "nextHref",
    }
    nested {
        change: ChangeField => "change",
    }
}

field_selector! {
    /// A name/value property.
    PropertyField {
        name => "name",
        value => "value",
        inherited => "inherited",
    }
}

field_selector! {
    /// A property collection (parameters, statistics, settings).
    PropertiesField {
        count => "count",
        href => "href",
    }
    nested {
        property: PropertyField => "property",
    }
}

field_selector! {
    /// A collection of investigations.
    InvestigationsField {
        count => "count",
        href => "href",
    }
    nested {
        investigation: InvestigationField => "investigation",
    }
}

field_selector! {
    /// Attributes of an investigation.
    InvestigationField {
        id => "id",
        state => "state",
        href => "href",
        assignment => "assignment",
        resolution => "resolution",
        scope => "scope",
        target => "target",
    }
    nested {
        assignee: UserField => "assignee",
    }
}

field_selector! {
    /// Attributes of a step, trigger, dependency or project feature.
    FeatureField {
        id => "id",
        name => "name",
        kind => "type",
        disabled => "disabled",
        href => "href",
    }
    nested {
        properties: PropertiesField => "properties",
        source_build_type: BuildTypeField => "source-buildType",
    }
}

field_selector! {
    /// A collection of steps, triggers, dependencies or project features.
    FeaturesField {
        count => "count",
        href => "href",
    }
    nested {
        step: FeatureField => "step",
        trigger: FeatureField => "trigger",
        artifact_dependency: FeatureField => "artifact-dependency",
        snapshot_dependency: FeatureField => "snapshot-dependency",
        project_feature: FeatureField => "projectFeature",
    }
}

field_selector! {
    /// Attributes of a VCS branch.
    BranchField {
        name => "name",
        internal_name => "internalName",
        is_default => "default",
        active => "active",
        last_activity => "lastActivity",
    }
}

field_selector! {
    /// A collection of branches.
    BranchesField {
        count => "count",
        href => "href",
    }
    nested {
        branch: BranchField => "branch",
    }
}
