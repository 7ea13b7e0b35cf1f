//
//  teamcity-cli
//  cli/agent.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Agent Commands
//!
//! ```bash
//! # Every agent the server knows about
//! tc agent list
//!
//! # Only agents that are connected and authorized
//! tc agent list --connected --authorized
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::resources::Agent;
use crate::fields::{AgentField, AgentsField};
use crate::locators::AgentLocator;
use crate::output::{format_bool, format_status, TableRow};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AgentCommand {
    #[command(subcommand)]
    pub command: AgentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AgentSubcommand {
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub connected: bool,

    #[arg(long)]
    pub authorized: bool,

    #[arg(long)]
    pub enabled: bool,
}

impl ListArgs {
    fn locator(&self) -> AgentLocator {
        let mut locator = AgentLocator::new();
        if self.connected {
            locator = locator.connected(true);
        }
        if self.authorized {
            locator = locator.authorized(true);
        }
        if self.enabled {
            locator = locator.enabled(true);
        }
        locator
    }
}

impl TableRow for Agent {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "STATE", "AUTHORIZED", "ENABLED", "IP"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let state = if self.connected.unwrap_or(false) {
            "connected"
        } else {
            "disconnected"
        };
        vec![
            self.id.map(|id| id.to_string()).unwrap_or_default(),
            self.name.clone(),
            format_status(state, color),
            format_bool(self.authorized.unwrap_or(false), color),
            format_bool(self.enabled.unwrap_or(false), color),
            self.ip.clone().unwrap_or_default(),
        ]
    }
}

impl AgentCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AgentSubcommand::List(args) => self.list(args, global),
        }
    }

    fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let fields = AgentsField::with_fields().count().agent(
            AgentField::with_fields()
                .id()
                .name()
                .connected()
                .authorized()
                .enabled()
                .ip(),
        );
        let agents = client
            .agents()
            .with_fields(fields)
            .by_locator(&args.locator())?;
        global.output().write_list(&agents)
    }
}
