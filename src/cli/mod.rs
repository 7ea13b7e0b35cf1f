//
//  teamcity-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Command-Line Interface
//!
//! Command definitions for the `tc` binary, built with clap's derive API.
//! Each subcommand lives in its own module and exposes a `run` method that
//! receives the [`GlobalOptions`].
//!
//! ## Command Structure
//!
//! ```text
//! tc <COMMAND> <SUBCOMMAND> [OPTIONS]
//!
//! Commands:
//!   server         Server information
//!   project        Projects
//!   config-build   Build configurations
//!   build          Builds
//!   user           Users
//!   agent          Build agents
//!   api            Raw REST requests
//!   config         CLI configuration
//!   auth           Credential status
//! ```
//!
//! ## Global Options
//!
//! | Option | Env | Description |
//! |--------|-----|-------------|
//! | `--host` | `TEAMCITY_HOST` | Server host, overrides the config file |
//! | `--token` | `TEAMCITY_TOKEN` | Access token |
//! | `--username` | `TEAMCITY_USERNAME` | User for HTTP Basic auth |
//! | `--password` | `TEAMCITY_PASSWORD` | Password for HTTP Basic auth |
//! | `--api-version` | | REST API version segment |
//! | `--no-cache` | | Disable the response cache |
//! | `--json` | | Output JSON |

mod agent;
mod api;
mod auth;
mod build;
mod build_config;
mod config;
mod project;
mod server;
mod user;

pub use agent::AgentCommand;
pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use build::BuildCommand;
pub use build_config::BuildConfigCommand;
pub use config::ConfigCommand;
pub use project::ProjectCommand;
pub use server::ServerCommand;
pub use user::UserCommand;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::api::TeamCityClient;
use crate::config::{apply_host, Config, ServerConfig};
use crate::output::{OutputFormat, OutputWriter};

#[derive(Parser, Debug)]
#[command(
    name = "tc",
    version,
    about = "Work with TeamCity from the command line",
    long_about = "tc is a CLI for the TeamCity REST API.\n\n\
                  It brings projects, build configurations, builds and agents to your terminal.",
    propagate_version = true,
    after_help = "Use 'tc <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// TeamCity server, e.g. `ci.example.com` or `http://ci:8111`
    #[arg(long, global = true, env = "TEAMCITY_HOST")]
    pub host: Option<String>,

    /// Access token, sent as a bearer token
    #[arg(long, global = true, env = "TEAMCITY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, global = true, env = "TEAMCITY_USERNAME")]
    pub username: Option<String>,

    #[arg(long, global = true, env = "TEAMCITY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// REST API version, e.g. `2018.1` or `latest`
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Do not cache responses for this invocation
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Connection settings from the config file with flag and environment
    /// overrides applied.
    pub fn server_config(&self) -> Result<ServerConfig> {
        let config = Config::load().context("Failed to load configuration")?;
        Ok(self.apply_overrides(config.server))
    }

    fn apply_overrides(&self, mut server: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            apply_host(&mut server, host);
        }
        if let Some(token) = &self.token {
            server.auth.token = Some(token.clone());
        }
        if let Some(username) = &self.username {
            // Flag credentials replace a stored token.
            server.auth.token = self.token.clone();
            server.auth.username = Some(username.clone());
            server.auth.password = self.password.clone();
        }
        if let Some(version) = &self.api_version {
            server.api_version = Some(version.clone());
        }
        if self.no_cache {
            server.cache = false;
        }
        server
    }

    /// A client for the configured server.
    pub fn client(&self) -> Result<TeamCityClient> {
        let server = self.server_config()?;
        if server.host.is_empty() {
            anyhow::bail!(
                "No TeamCity server configured. Run 'tc config set host <host>' or set TEAMCITY_HOST."
            );
        }
        Ok(TeamCityClient::from_config(&server)?)
    }

    pub fn output(&self) -> OutputWriter {
        if self.json {
            OutputWriter::new(OutputFormat::Json)
        } else {
            OutputWriter::new(OutputFormat::Table)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Server(ServerCommand),

    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    #[command(name = "config-build", visible_alias = "bt")]
    BuildConfig(BuildConfigCommand),

    Build(BuildCommand),

    User(UserCommand),

    Agent(AgentCommand),

    Api(ApiCommand),

    Config(ConfigCommand),

    Auth(AuthCommand),

    Version,
}
