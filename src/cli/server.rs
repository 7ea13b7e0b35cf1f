//
//  teamcity-cli
//  cli/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Server Commands
//!
//! ```bash
//! tc server info
//! tc server plugins --json
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::resources::{Plugin, Server};
use crate::output::{print_field, print_header, print_optional_field, TableOutput, TableRow};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ServerCommand {
    #[command(subcommand)]
    pub command: ServerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ServerSubcommand {
    /// Show server version and build information
    Info,

    /// List installed plugins
    Plugins,
}

#[derive(Debug, Serialize)]
struct ServerInfo {
    url: String,
    #[serde(flatten)]
    server: Server,
}

impl TableOutput for ServerInfo {
    fn print_table(&self, color: bool) {
        print_header("TeamCity Server");
        print_field("URL", &self.url, color);
        print_optional_field("Version", self.server.version.as_deref(), color);
        print_optional_field("Build", self.server.build_number.as_deref(), color);
        print_optional_field("Build date", self.server.build_date.as_deref(), color);
        print_optional_field("Started", self.server.start_time.as_deref(), color);
    }
}

impl TableRow for Plugin {
    fn headers() -> &'static [&'static str] {
        &["NAME", "DISPLAY NAME", "VERSION"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.display_name.clone().unwrap_or_default(),
            self.version.clone().unwrap_or_default(),
        ]
    }
}

impl ServerCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let output = global.output();

        match &self.command {
            ServerSubcommand::Info => {
                let server = client.server().info()?;
                let info = ServerInfo {
                    url: client.server_url().to_string(),
                    server,
                };
                output.write(&info)
            }
            ServerSubcommand::Plugins => {
                let plugins = client.server().plugins()?;
                output.write_list(&plugins)
            }
        }
    }
}
