//! `scdeploy check` - verify the external tools a deployment needs

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use scdeploy::application::deploy::{DEFAULT_CONSORTIUM_TEMPLATE, DEFAULT_SUPPLYCHAIN_TEMPLATE};
use scdeploy::config::Config;
use scdeploy::infrastructure::{AzCli, CurlRpcProbe, NodeContractDeployer};

use crate::ui::context::UiContext;
use crate::ui::json::emit;
use crate::ui::output::print_config_warnings;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckStatus {
    Pass,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CheckItem {
    name: String,
    status: CheckStatus,
    message: String,
}

impl CheckItem {
    fn tool(name: &str, program: &str, available: bool, purpose: &str) -> Self {
        if available {
            Self {
                name: name.to_string(),
                status: CheckStatus::Pass,
                message: format!("`{}` found", program),
            }
        } else {
            Self {
                name: name.to_string(),
                status: CheckStatus::Error,
                message: format!("`{}` not found on PATH ({})", program, purpose),
            }
        }
    }

    fn file(root: &Path, name: &str) -> Self {
        if root.join(name).is_file() {
            Self {
                name: name.to_string(),
                status: CheckStatus::Pass,
                message: "present".to_string(),
            }
        } else {
            Self {
                name: name.to_string(),
                status: CheckStatus::Warning,
                message: "not in the current directory; pass its path to deploy".to_string(),
            }
        }
    }
}

/// Returns whether every required tool is available.
pub fn cmd_check(json: bool, verbose: u8, config_path: Option<&Path>) -> Result<bool> {
    let project_root = std::env::current_dir()?;
    let (config, warnings) = Config::resolve(&project_root, config_path)?;
    let ui = UiContext::new(json, verbose, &config);
    if !json {
        print_config_warnings(&ui, &warnings);
    }

    let items = run_checks(&config, &project_root);
    let ok = !items.iter().any(|i| i.status == CheckStatus::Error);

    if json {
        for item in &items {
            let status = match item.status {
                CheckStatus::Pass => "pass",
                CheckStatus::Warning => "warning",
                CheckStatus::Error => "error",
            };
            let _ = emit(json!({
                "event": "check",
                "command": "check",
                "name": item.name,
                "status": status,
                "message": item.message,
            }));
        }
        let _ = emit(json!({
            "event": "complete",
            "command": "check",
            "success": ok,
        }));
    } else {
        print!("{}", render_check(&items, &ui));
    }

    Ok(ok)
}

fn run_checks(config: &Config, project_root: &Path) -> Vec<CheckItem> {
    let az = AzCli::new(&config.azure.program);
    let deployer = NodeContractDeployer::from_config(&config.contract);
    let curl = CurlRpcProbe::default();

    vec![
        CheckItem::tool(
            "azure cli",
            az.program(),
            az.check_available(),
            "needed for every cloud call",
        ),
        CheckItem::tool(
            "contract deployer",
            deployer.program(),
            deployer.check_available(),
            "needed to deploy the contract",
        ),
        CheckItem::tool(
            "curl",
            curl.program(),
            curl.check_available(),
            "needed for the node readiness wait",
        ),
        CheckItem::file(project_root, DEFAULT_CONSORTIUM_TEMPLATE),
        CheckItem::file(project_root, DEFAULT_SUPPLYCHAIN_TEMPLATE),
    ]
}

fn render_check(items: &[CheckItem], ui: &UiContext) -> String {
    let (color, unicode) = (ui.color, ui.unicode);
    let mut out = format!(
        "{} {}\n\n",
        Icon::Check.colored(color, unicode),
        ColoredText::info("scdeploy check").bold().render(color)
    );

    for item in items {
        let icon = match item.status {
            CheckStatus::Pass => Icon::Success,
            CheckStatus::Warning => Icon::Warning,
            CheckStatus::Error => Icon::Error,
        };
        let message = match item.status {
            CheckStatus::Pass => ColoredText::dim(item.message.as_str()),
            CheckStatus::Warning => ColoredText::warning(item.message.as_str()),
            CheckStatus::Error => ColoredText::error(item.message.as_str()),
        };
        out.push_str(&format!(
            "{} {:<20} {}\n",
            icon.colored(color, unicode),
            item.name,
            message.render(color)
        ));
    }

    let errors = items
        .iter()
        .filter(|i| i.status == CheckStatus::Error)
        .count();
    out.push('\n');
    if errors == 0 {
        out.push_str(&ColoredText::success("Ready to deploy").bold().render(color));
    } else {
        out.push_str(
            &ColoredText::error(format!("{} required tool(s) missing", errors))
                .bold()
                .render(color),
        );
    }
    out.push('\n');
    out
}
