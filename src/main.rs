//
//  teamcity-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use teamcity_cli::cli::{Cli, Commands};
use teamcity_cli::exit_codes;

fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli);

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::from_error(&e));
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TC_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Server(cmd) => cmd.run(&cli.global),
        Commands::Project(cmd) => cmd.run(&cli.global),
        Commands::BuildConfig(cmd) => cmd.run(&cli.global),
        Commands::Build(cmd) => cmd.run(&cli.global),
        Commands::User(cmd) => cmd.run(&cli.global),
        Commands::Agent(cmd) => cmd.run(&cli.global),
        Commands::Api(cmd) => cmd.run(&cli.global),
        Commands::Config(cmd) => cmd.run(&cli.global),
        Commands::Auth(cmd) => cmd.run(&cli.global),
        Commands::Version => {
            println!("tc version {}", teamcity_cli::VERSION);
            Ok(())
        }
    }
}
