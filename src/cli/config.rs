//
//  teamcity-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Commands
//!
//! ```bash
//! tc config set host https://ci.example.com
//! tc config set auth.token "$TOKEN"
//! tc config get api_version
//! tc config show
//! tc config path
//! ```
//!
//! Setting a key to an empty string clears it.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::auth::mask_token;
use crate::config::{display_address, Config, CONFIG_KEYS};
use crate::output::{print_field, print_header};

use super::GlobalOptions;

const SECRET_KEYS: &[&str] = &["auth.password", "auth.token"];

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print all settings, secrets masked
    #[command(visible_alias = "list")]
    Show,

    Get(GetArgs),

    Set(SetArgs),

    /// Print the configuration file location
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    pub key: String,

    pub value: String,
}

impl ConfigCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Show => self.show(global),
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let entries: Vec<(&str, Option<String>)> = CONFIG_KEYS
            .iter()
            .map(|key| (*key, config.get(key).map(|v| display_value(key, &v))))
            .collect();

        if global.json {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.map_or(serde_json::Value::Null, Into::into)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
            return Ok(());
        }

        let color = console::colors_enabled();
        if config.server.host.is_empty() {
            print_header("No server configured");
        } else {
            print_header(&display_address(&config.server));
        }
        for (key, value) in entries {
            print_field(key, value.as_deref().unwrap_or("-"), color);
        }
        Ok(())
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        ensure_known(&args.key)?;
        let config = Config::load()?;
        let value = config.get(&args.key);

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }
        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        ensure_known(&args.key)?;
        let mut config = Config::load()?;
        config.set(&args.key, &args.value)?;
        config.save()?;

        let shown = display_value(&args.key, &args.value);
        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": shown,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(&args.key).cyan(),
                shown
            );
        }
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;
        if global.json {
            let result = serde_json::json!({ "path": path.display().to_string() });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}

fn ensure_known(key: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        );
    }
    Ok(())
}

fn display_value(key: &str, value: &str) -> String {
    if SECRET_KEYS.contains(&key) {
        mask_token(value)
    } else {
        value.to_string()
    }
}
