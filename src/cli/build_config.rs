//
//  teamcity-cli
//  cli/build_config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Build Configuration Commands
//!
//! ```bash
//! tc config-build list --project MyProject
//! tc config-build view MyProject_Build
//! tc config-build pause MyProject_Build
//! tc config-build resume MyProject_Build
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::resources::{BuildType, Property};
use crate::fields::{BuildField, BuildTypeField, BuildTypesField, BuildsField, InvestigationsField};
use crate::locators::{BuildTypeLocator, ProjectLocator};
use crate::output::{
    format_bool, format_status, print_field, print_header, print_optional_field, TableBuilder,
    TableOutput, TableRow,
};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct BuildConfigCommand {
    #[command(subcommand)]
    pub command: BuildConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BuildConfigSubcommand {
    #[command(visible_alias = "ls")]
    List(ListArgs),

    View(ConfigArgs),

    /// Stop new builds from being triggered
    Pause(ConfigArgs),

    /// Allow builds to be triggered again
    Resume(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only configurations in this project
    #[arg(long, short = 'p')]
    pub project: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Build configuration ID
    pub id: String,
}

impl TableRow for BuildType {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "PROJECT", "PAUSED"]
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
            self.project_id.clone().unwrap_or_default(),
            format_bool(self.paused.unwrap_or(false), color),
        ]
    }
}

impl TableRow for Property {
    fn headers() -> &'static [&'static str] {
        &["NAME", "VALUE", "INHERITED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.value.clone().unwrap_or_default(),
            format_bool(self.inherited.unwrap_or(false), color),
        ]
    }
}

#[derive(Debug, Serialize)]
struct BuildTypeDetail {
    #[serde(flatten)]
    build_type: BuildType,
    parameters: Vec<Property>,
}

impl TableOutput for BuildTypeDetail {
    fn print_table(&self, color: bool) {
        let bt = &self.build_type;
        print_header(&bt.name);
        print_field("ID", &bt.id, color);
        print_optional_field("Project", bt.project_id.as_deref(), color);
        print_optional_field("Description", bt.description.as_deref(), color);
        let paused = if bt.paused.unwrap_or(false) {
            "paused"
        } else {
            "active"
        };
        print_field("Status", &format_status(paused, color), color);
        print_optional_field("URL", bt.web_url.as_deref(), color);

        let investigations = bt
            .investigations
            .as_ref()
            .and_then(|i| i.count)
            .unwrap_or(0);
        print_field("Investigations", &investigations.to_string(), color);

        if let Some(last) = bt.builds.as_ref().and_then(|b| b.build.first()) {
            let status = last.status.as_deref().unwrap_or("UNKNOWN");
            print_field(
                "Last build",
                &format!(
                    "#{} {}",
                    last.number.as_deref().unwrap_or("-"),
                    format_status(status, color)
                ),
                color,
            );
        }

        if !self.parameters.is_empty() {
            println!();
            println!("Parameters:");
            TableBuilder::new()
                .color(color)
                .headers(Property::headers().iter().copied())
                .rows(self.parameters.iter().map(|p| p.row(color)))
                .print();
        }
    }
}

impl BuildConfigCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            BuildConfigSubcommand::List(args) => self.list(args, global),
            BuildConfigSubcommand::View(args) => self.view(args, global),
            BuildConfigSubcommand::Pause(args) => self.set_paused(args, true, global),
            BuildConfigSubcommand::Resume(args) => self.set_paused(args, false, global),
        }
    }

    fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let fields = BuildTypesField::with_fields()
            .count()
            .build_type(BuildTypeField::with_fields().id().name().project_id().paused());
        let api = client.build_configs().with_fields(fields);

        let configs = match &args.project {
            Some(project) => api.by_project(&ProjectLocator::with_id(project))?,
            None => api.all()?,
        };

        global.output().write_list(&configs)
    }

    fn view(&self, args: &ConfigArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let locator = BuildTypeLocator::with_id(&args.id);

        let fields = BuildTypeField::with_fields()
            .id()
            .name()
            .description()
            .project_id()
            .paused()
            .web_url()
            .investigations(InvestigationsField::with_fields().count())
            .builds(BuildsField::with_fields().build(BuildField::with_fields().number().status()));

        let build_type = client.build_configs().with_fields(fields).by_locator(&locator)?;
        let parameters = client.build_configs().parameters(&locator)?;

        global.output().write(&BuildTypeDetail {
            build_type,
            parameters,
        })
    }

    fn set_paused(&self, args: &ConfigArgs, paused: bool, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let locator = BuildTypeLocator::with_id(&args.id);
        let api = client.build_configs();

        api.set_pause_status(&locator, paused)?;
        let now_paused = api.pause_status(&locator)?;

        let output = global.output();
        if global.json {
            crate::output::write_json(&serde_json::json!({
                "id": args.id,
                "paused": now_paused,
            }))
        } else {
            let verb = if now_paused { "Paused" } else { "Resumed" };
            output.write_success(&format!("{verb} {}", args.id));
            Ok(())
        }
    }
}
