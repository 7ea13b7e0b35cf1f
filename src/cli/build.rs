//
//  teamcity-cli
//  cli/build.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Build Commands
//!
//! ```bash
//! # Recent failed builds of a configuration on a branch
//! tc build list --config MyProject_Build --status failure --branch main
//!
//! # Builds currently running
//! tc build list --running
//!
//! tc build view 4512
//! tc build pin 4512 --comment "release candidate"
//! tc build unpin 4512
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::resources::Build;
use crate::fields::{AgentField, BuildField, BuildTypeField, BuildsField};
use crate::locators::{BuildLocator, BuildStatus, BuildTypeLocator, UserLocator};
use crate::output::{
    format_bool, format_status, print_field, print_header, print_optional_field, TableOutput,
    TableRow,
};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(subcommand)]
    pub command: BuildSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BuildSubcommand {
    #[command(visible_alias = "ls")]
    List(ListArgs),

    View(BuildArgs),

    /// Protect a build from cleanup
    Pin(PinArgs),

    Unpin(BuildArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Build configuration ID
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// success, failure, error or unknown
    #[arg(long, short = 's')]
    pub status: Option<BuildStatus>,

    /// Branch name
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Builds triggered by this user
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Only running builds
    #[arg(long)]
    pub running: bool,

    /// Only pinned builds
    #[arg(long)]
    pub pinned: bool,

    /// Only builds carrying this tag
    #[arg(long, short = 't')]
    pub tag: Vec<String>,

    #[arg(long, short = 'l', default_value = "20")]
    pub limit: u32,
}

impl ListArgs {
    fn locator(&self) -> BuildLocator {
        let mut locator = BuildLocator::new();
        if let Some(config) = &self.config {
            locator = locator.build_type(BuildTypeLocator::with_id(config));
        }
        if let Some(status) = self.status {
            locator = locator.status(status);
        }
        if let Some(branch) = &self.branch {
            locator = locator.branch_name(branch);
        }
        if let Some(user) = &self.user {
            locator = locator.user(UserLocator::with_username(user));
        }
        if self.running {
            locator = locator.running(true);
        }
        if self.pinned {
            locator = locator.pinned(true);
        }
        if !self.tag.is_empty() {
            locator = locator.tags(&self.tag);
        }
        locator.count(self.limit)
    }
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct PinArgs {
    /// Build ID
    pub id: String,

    #[arg(long, short = 'm', default_value = "")]
    pub comment: String,
}

impl TableRow for Build {
    fn headers() -> &'static [&'static str] {
        &["ID", "NUMBER", "CONFIGURATION", "BRANCH", "STATUS", "STATE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.number.clone().unwrap_or_default(),
            self.build_type_id.clone().unwrap_or_default(),
            self.branch_name.clone().unwrap_or_default(),
            format_status(self.status.as_deref().unwrap_or("UNKNOWN"), color),
            self.state.clone().unwrap_or_default(),
        ]
    }
}

#[derive(Debug, Serialize)]
struct BuildDetail {
    #[serde(flatten)]
    build: Build,
}

impl TableOutput for BuildDetail {
    fn print_table(&self, color: bool) {
        let build = &self.build;
        let title = match (&build.build_type, &build.number) {
            (Some(bt), Some(number)) => format!("{} #{}", bt.name, number),
            (_, Some(number)) => format!("Build #{number}"),
            _ => "Build".to_string(),
        };
        print_header(&title);
        print_field(
            "ID",
            &build.id.map(|id| id.to_string()).unwrap_or_default(),
            color,
        );
        print_optional_field("Configuration", build.build_type_id.as_deref(), color);
        print_field(
            "Status",
            &format_status(build.status.as_deref().unwrap_or("UNKNOWN"), color),
            color,
        );
        print_optional_field("State", build.state.as_deref(), color);
        print_optional_field("Status text", build.status_text.as_deref(), color);
        print_optional_field("Branch", build.branch_name.as_deref(), color);
        print_optional_field(
            "Agent",
            build.agent.as_ref().map(|a| a.name.as_str()),
            color,
        );
        print_optional_field("Queued", build.queued_date.as_deref(), color);
        print_optional_field("Started", build.start_date.as_deref(), color);
        print_optional_field("Finished", build.finish_date.as_deref(), color);
        if let (Some(start), Some(finish)) = (build.started_at(), build.finished_at()) {
            let secs = (finish - start).num_seconds();
            print_field("Duration", &format!("{}m {}s", secs / 60, secs % 60), color);
        }
        print_field("Pinned", &format_bool(build.pinned.unwrap_or(false), color), color);
        print_optional_field("URL", build.web_url.as_deref(), color);
    }
}

impl BuildCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            BuildSubcommand::List(args) => self.list(args, global),
            BuildSubcommand::View(args) => self.view(args, global),
            BuildSubcommand::Pin(args) => self.pin(args, global),
            BuildSubcommand::Unpin(args) => self.unpin(args, global),
        }
    }

    fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let fields = BuildsField::with_fields().count().build(
            BuildField::with_fields()
                .id()
                .number()
                .build_type_id()
                .branch_name()
                .status()
                .state(),
        );

        let builds = client.builds().with_fields(fields).by_locator(&args.locator())?;
        global.output().write_list(&builds)
    }

    fn view(&self, args: &BuildArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let fields = BuildField::with_fields()
            .id()
            .number()
            .status()
            .state()
            .status_text()
            .branch_name()
            .build_type_id()
            .queued_date()
            .start_date()
            .finish_date()
            .pinned()
            .web_url()
            .build_type(BuildTypeField::with_fields().id().name())
            .agent(AgentField::with_fields().name());

        let build = client.builds().with_fields(fields).by_id(&args.id)?;
        global.output().write(&BuildDetail { build })
    }

    fn pin(&self, args: &PinArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        client
            .builds()
            .pin(&BuildLocator::with_id(&args.id), &args.comment)?;
        global.output().write_success(&format!("Pinned build {}", args.id));
        Ok(())
    }

    fn unpin(&self, args: &BuildArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        client.builds().unpin(&BuildLocator::with_id(&args.id))?;
        global
            .output()
            .write_success(&format!("Unpinned build {}", args.id));
        Ok(())
    }
}
