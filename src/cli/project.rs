//
//  teamcity-cli
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Project Commands
//!
//! ```bash
//! # List all projects, or the children of one
//! tc project list
//! tc project list --parent MyProject
//!
//! # Show a project with its build configurations
//! tc project view MyProject
//!
//! # Active branches across a project
//! tc project branches MyProject
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::resources::{Branch, BuildType, Project};
use crate::fields::{BranchField, BranchesField, BuildTypeField, BuildTypesField, ProjectField, ProjectsField};
use crate::locators::{BranchLocator, BranchPolicy, ProjectLocator};
use crate::output::{
    format_bool, print_field, print_header, print_optional_field, truncate, TableBuilder, TableOutput, TableRow,
};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    #[command(visible_alias = "ls")]
    List(ListArgs),

    View(ViewArgs),

    Branches(BranchesArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only direct children of this project
    #[arg(long, short = 'p')]
    pub parent: Option<String>,

    /// Include archived projects
    #[arg(long)]
    pub archived: bool,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project ID
    pub project: String,
}

#[derive(Args, Debug)]
pub struct BranchesArgs {
    /// Project ID
    pub project: String,

    /// Include inactive branches
    #[arg(long)]
    pub all: bool,
}

impl TableRow for Project {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "PARENT", "DESCRIPTION"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let id = if color {
            style(&self.id).cyan().to_string()
        } else {
            self.id.clone()
        };
        vec![
            id,
            self.name.clone(),
            self.parent_project_id.clone().unwrap_or_default(),
            truncate(self.description.as_deref().unwrap_or("-"), 40),
        ]
    }
}

impl TableRow for Branch {
    fn headers() -> &'static [&'static str] {
        &["NAME", "DEFAULT", "ACTIVE", "LAST ACTIVITY"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            format_bool(self.is_default.unwrap_or(false), color),
            format_bool(self.active.unwrap_or(false), color),
            self.last_activity.clone().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Serialize)]
struct ProjectDetail {
    #[serde(flatten)]
    project: Project,
}

impl TableOutput for ProjectDetail {
    fn print_table(&self, color: bool) {
        let project = &self.project;
        print_header(&project.name);
        print_field("ID", &project.id, color);
        print_optional_field("Parent", project.parent_project_id.as_deref(), color);
        print_optional_field("Description", project.description.as_deref(), color);
        print_field(
            "Archived",
            &format_bool(project.archived.unwrap_or(false), color),
            color,
        );
        print_optional_field("URL", project.web_url.as_deref(), color);

        let children: Vec<&Project> = project
            .projects
            .as_ref()
            .map(|p| p.project.iter().collect())
            .unwrap_or_default();
        if !children.is_empty() {
            println!();
            println!("Subprojects:");
            TableBuilder::new()
                .color(color)
                .headers(Project::headers().iter().copied())
                .rows(children.iter().map(|p| p.row(color)))
                .print();
        }

        let configs: Vec<&BuildType> = project
            .build_types
            .as_ref()
            .map(|b| b.build_type.iter().collect())
            .unwrap_or_default();
        if !configs.is_empty() {
            println!();
            println!("Build configurations:");
            TableBuilder::new()
                .color(color)
                .headers(BuildType::headers().iter().copied())
                .rows(configs.iter().map(|b| b.row(color)))
                .print();
        }
    }
}

impl ProjectCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List(args) => self.list(args, global),
            ProjectSubcommand::View(args) => self.view(args, global),
            ProjectSubcommand::Branches(args) => self.branches(args, global),
        }
    }

    fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let fields = ProjectsField::with_fields().count().project(
            ProjectField::with_fields()
                .id()
                .name()
                .description()
                .parent_project_id()
                .archived(),
        );

        let projects: Vec<Project> = client
            .projects()
            .with_fields(fields)
            .all()?
            .into_iter()
            .filter(|p| args.archived || !p.archived.unwrap_or(false))
            .filter(|p| match &args.parent {
                Some(parent) => p.parent_project_id.as_deref() == Some(parent.as_str()),
                None => true,
            })
            .collect();

        global.output().write_list(&projects)
    }

    fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        let fields = ProjectField::with_fields()
            .id()
            .name()
            .description()
            .parent_project_id()
            .archived()
            .web_url()
            .projects(
                ProjectsField::with_fields()
                    .project(ProjectField::with_fields().id().name().parent_project_id().description()),
            )
            .build_types(
                BuildTypesField::with_fields()
                    .build_type(BuildTypeField::with_fields().id().name().project_id().paused()),
            );

        let project = client
            .projects()
            .with_fields(fields)
            .by_locator(&ProjectLocator::with_id(&args.project))?;

        output.write(&ProjectDetail { project })
    }

    fn branches(&self, args: &BranchesArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let policy = if args.all {
            BranchPolicy::AllBranches
        } else {
            BranchPolicy::ActiveHistoryAndActiveVcsBranches
        };
        let fields = BranchesField::with_fields()
            .branch(BranchField::with_fields().name().is_default().active().last_activity());

        let branches = client.projects().with_fields(fields).branches(
            &ProjectLocator::with_id(&args.project),
            &BranchLocator::with_policy(policy),
        )?;

        global.output().write_list(&branches)
    }
}
