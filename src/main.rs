//! scdeploy CLI - deploy the blockchain supply-chain stack to Azure
//!
//! Usage: scdeploy <COMMAND>
//!
//! Commands:
//!   deploy        Provision infrastructure, deploy the contract, patch app settings
//!   parse-output  Parse captured contract deployer output
//!   check         Verify that the required tools are installed
//!
//! Exit codes: 0 success, 1 fatal error, 2 partial failure.

use anyhow::Result;
use clap::Parser;

use scdeploy::RunStatus;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};

/// Exit code for a run where a recoverable step failed
const EXIT_PARTIAL: i32 = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Deploy(args) => {
            let status =
                commands::deploy::cmd_deploy(args, cli.json, cli.verbose, cli.config.as_deref())?;
            if status == RunStatus::Partial {
                std::process::exit(EXIT_PARTIAL);
            }
        }
        Commands::ParseOutput { file } => {
            let deployed =
                commands::parse_output::cmd_parse_output(file.as_deref(), cli.json, cli.verbose)?;
            if !deployed {
                std::process::exit(1);
            }
        }
        Commands::Check => {
            let ok = commands::check::cmd_check(cli.json, cli.verbose, cli.config.as_deref())?;
            if !ok {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
