use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use scdeploy::application::deploy::{
    DEFAULT_CONSORTIUM_PARAMETERS, DEFAULT_CONSORTIUM_TEMPLATE, DEFAULT_SUPPLYCHAIN_PARAMETERS,
    DEFAULT_SUPPLYCHAIN_TEMPLATE,
};

/// scdeploy - deploy the blockchain supply-chain stack to Azure
#[derive(Parser, Debug)]
#[command(name = "scdeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./scdeploy.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the resource group, deploy both templates and the contract
    Deploy(DeployArgs),

    /// Parse captured contract deployer output (reads stdin if FILE is omitted)
    ParseOutput {
        /// File holding the deployer's combined output
        file: Option<PathBuf>,
    },

    /// Verify that az, the contract deployer and curl are available
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Azure subscription to deploy into
    #[arg(long, env = "SCDEPLOY_SUBSCRIPTION_ID")]
    pub subscription_id: Option<String>,

    /// Resource group to deploy into (created if missing)
    #[arg(long)]
    pub resource_group: String,

    /// Region for a new resource group (e.g. eastus)
    #[arg(long)]
    pub region: Option<String>,

    /// Base name for the template deployments
    #[arg(long)]
    pub deployment_name: String,

    #[arg(long, default_value = DEFAULT_CONSORTIUM_TEMPLATE, value_name = "PATH")]
    pub consortium_template: PathBuf,

    #[arg(long, default_value = DEFAULT_CONSORTIUM_PARAMETERS, value_name = "PATH")]
    pub consortium_parameters: PathBuf,

    #[arg(long, default_value = DEFAULT_SUPPLYCHAIN_TEMPLATE, value_name = "PATH")]
    pub supplychain_template: PathBuf,

    #[arg(long, default_value = DEFAULT_SUPPLYCHAIN_PARAMETERS, value_name = "PATH")]
    pub supplychain_parameters: PathBuf,

    /// Ethereum account password (defaults to the consortium parameter file)
    #[arg(long, env = "SCDEPLOY_ACCOUNT_PASSWORD", hide_env_values = true)]
    pub account_password: Option<String>,

    /// Web app slot to patch
    #[arg(long)]
    pub slot: Option<String>,

    /// Prompt for missing input instead of failing
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip waiting for the blockchain node to answer
    #[arg(long)]
    pub skip_readiness: bool,
}
