//
//  teamcity-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Commands
//!
//! ```bash
//! # Store an access token read from stdin
//! echo "$TOKEN" | tc auth login --with-token
//!
//! # Store username and password, or switch to guest access
//! tc auth login --username admin --password secret
//! tc auth login --guest
//!
//! # Check the stored credential against the server
//! tc auth status
//!
//! tc auth logout
//! ```

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::ApiError;
use crate::auth::{read_token_from_stdin, validate_token};
use crate::config::{display_address, AuthConfig, Config};
use crate::output::{format_bool, print_field, print_header, print_optional_field, TableOutput};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store credentials in the config file
    Login(LoginArgs),

    /// Remove stored credentials
    Logout,

    /// Verify the active credential with the server
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read an access token from standard input
    #[arg(long, conflicts_with_all = ["guest", "username"])]
    pub with_token: bool,

    /// Use the guest account
    #[arg(long, conflicts_with = "username")]
    pub guest: bool,

    #[arg(long, requires = "password")]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct AuthStatus {
    server: String,
    mode: &'static str,
    authenticated: bool,
    error: Option<String>,
}

impl TableOutput for AuthStatus {
    fn print_table(&self, color: bool) {
        print_header(&self.server);
        print_field("Credential", self.mode, color);
        print_field("Authenticated", &format_bool(self.authenticated, color), color);
        print_optional_field("Error", self.error.as_deref(), color);
    }
}

impl AuthCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => self.login(args, global),
            AuthSubcommand::Logout => self.logout(global),
            AuthSubcommand::Status => self.status(global),
        }
    }

    fn login(&self, args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
        let auth = if args.with_token {
            let token = read_token_from_stdin()?;
            if !validate_token(&token) {
                bail!("Invalid token format");
            }
            AuthConfig {
                token: Some(token),
                ..Default::default()
            }
        } else if args.guest {
            AuthConfig {
                guest: true,
                ..Default::default()
            }
        } else if let Some(username) = &args.username {
            AuthConfig {
                username: Some(username.clone()),
                password: args.password.clone(),
                ..Default::default()
            }
        } else {
            bail!("Specify --with-token, --guest or --username/--password");
        };

        let mut config = Config::load()?;
        let mode = auth.credential().mode();
        config.server.auth = auth;
        config.save()?;

        global
            .output()
            .write_success(&format!("Stored {mode} credentials"));
        Ok(())
    }

    fn logout(&self, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        config.server.auth = AuthConfig::default();
        config.save()?;
        global.output().write_success("Removed stored credentials");
        Ok(())
    }

    fn status(&self, global: &GlobalOptions) -> Result<()> {
        let server = global.server_config()?;
        let client = global.client()?;

        let (authenticated, error) = match client.authenticate(false) {
            Ok(true) => (true, None),
            Ok(false) => (false, Some("server rejected the credential".to_string())),
            Err(ApiError::NotAuthenticated) => (false, Some(ApiError::NotAuthenticated.to_string())),
            Err(e) => return Err(e.into()),
        };

        let status = AuthStatus {
            server: display_address(&server),
            mode: client.credential().mode(),
            authenticated,
            error,
        };
        global.output().write(&status)?;

        if !status.authenticated {
            // Non-zero exit for scripts.
            return Err(ApiError::NotAuthenticated.into());
        }
        Ok(())
    }
}
