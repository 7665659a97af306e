//! `scdeploy deploy`

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use scdeploy::config::Config;
use scdeploy::domain::ports::{DeployEventSink, RunStatus};
use scdeploy::domain::value_objects::{Region, Secret};
use scdeploy::infrastructure::{
    AzCli, AzCliPlatform, CurlRpcProbe, DialoguerRegionPrompt, JsonEventSink, JsonParameterStore,
    NodeContractDeployer, ThreadSleeper,
};
use scdeploy::{DeployOptions, DeployUseCase, ScdeployError};

use crate::cli::DeployArgs;
use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;
use crate::ui::output::{print_config_warnings, print_warning};
use crate::ui::terminal::stdin_is_terminal;

pub fn cmd_deploy(
    args: &DeployArgs,
    json: bool,
    verbose: u8,
    config_path: Option<&Path>,
) -> Result<RunStatus> {
    let project_root = std::env::current_dir()?;
    let (config, warnings) = Config::resolve(&project_root, config_path)?;
    let ui = UiContext::new(json, verbose, &config);
    if !json {
        print_config_warnings(&ui, &warnings);
    }

    let options = build_options(args, &config)?;

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))
        .context("failed to install the Ctrl+C handler")?;

    let mut use_case = DeployUseCase::new(
        AzCliPlatform::new(AzCli::new(&config.azure.program)),
        NodeContractDeployer::from_config(&config.contract),
        JsonParameterStore::new(),
        Box::new(CurlRpcProbe::new(Duration::from_secs(
            config.readiness.probe_timeout_secs,
        ))),
        Box::new(ThreadSleeper::new(running)),
    );

    if args.interactive {
        if stdin_is_terminal() {
            use_case = use_case.with_prompt(Box::new(DialoguerRegionPrompt::new()));
        } else {
            print_warning(&ui, "--interactive ignored: stdin is not a terminal");
        }
    }

    let sink: Arc<dyn DeployEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    };

    let mut result = use_case.execute_with_events(&options, sink);
    let status = result.status();
    if status == RunStatus::Failed {
        if let Some(err) = result.error.take() {
            return Err(err.into());
        }
        anyhow::bail!("deployment failed");
    }
    Ok(status)
}

/// CLI flags over config values
fn build_options(args: &DeployArgs, config: &Config) -> Result<DeployOptions> {
    let subscription_id = args
        .subscription_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| config.azure.subscription_id.clone())
        .ok_or_else(|| {
            ScdeployError::missing_input(
                "subscription id",
                "pass --subscription-id or set SCDEPLOY_SUBSCRIPTION_ID",
            )
        })?;

    let mut options = DeployOptions::from_config(
        config,
        subscription_id,
        args.resource_group.as_str(),
        args.deployment_name.as_str(),
    )
    .with_region(args.region.as_deref().and_then(Region::parse))
    .with_consortium_files(&args.consortium_template, &args.consortium_parameters)
    .with_supplychain_files(&args.supplychain_template, &args.supplychain_parameters)
    .with_account_password(
        args.account_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Secret::new),
    );

    if let Some(slot) = &args.slot {
        options = options.with_slot(slot.as_str());
    }
    if args.skip_readiness {
        options = options.with_readiness(None);
    }
    Ok(options)
}
