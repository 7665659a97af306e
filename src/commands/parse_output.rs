//! `scdeploy parse-output` - run the contract output parser on captured text

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use scdeploy::config::Config;
use scdeploy::domain::entities::ContractOutcome;
use scdeploy::domain::services::{OutputSource, ParsedOutput};
use scdeploy::parse_contract_output;

use crate::ui::context::UiContext;
use crate::ui::json::emit;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Returns whether the output reports a deployed contract.
pub fn cmd_parse_output(file: Option<&Path>, json: bool, verbose: u8) -> Result<bool> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let parsed = parse_contract_output(&text, None);
    let deployed = matches!(parsed.output.outcome(), ContractOutcome::Deployed { .. });

    if json {
        let _ = emit(json!({
            "event": "parse_output",
            "command": "parse-output",
            "source": parsed.source,
            "result": parsed.output,
            "diagnostic": parsed.diagnostic,
            "deployed": deployed,
        }));
    } else {
        let ui = UiContext::new(false, verbose, &Config::default());
        print!("{}", render_parsed(&parsed, &ui));
    }

    Ok(deployed)
}

fn render_parsed(parsed: &ParsedOutput, ui: &UiContext) -> String {
    let (color, unicode) = (ui.color, ui.unicode);
    let field = |name: &str, value: &Option<String>| {
        format!(
            "  {:<17} {}\n",
            name,
            value.as_deref().unwrap_or("-")
        )
    };

    let mut out = String::new();
    match parsed.output.outcome() {
        ContractOutcome::Deployed { .. } => out.push_str(&format!(
            "{} {}\n",
            Icon::Success.colored(color, unicode),
            ColoredText::success("Contract deployed").bold().render(color)
        )),
        ContractOutcome::Failed(reason) => out.push_str(&format!(
            "{} {}: {}\n",
            Icon::Error.colored(color, unicode),
            ColoredText::error("No deployed contract").bold().render(color),
            parsed.diagnostic.clone().unwrap_or(reason)
        )),
    }

    if parsed.source != OutputSource::None {
        out.push_str(&field("contract address", &parsed.output.contract_address));
        out.push_str(&field("account address", &parsed.output.account_address));
        out.push_str(&field("error", &parsed.output.error));
        if ui.verbose > 0 {
            out.push_str(
                &ColoredText::dim(format!("  found via {:?}\n", parsed.source)).render(color),
            );
        }
    }
    out
}
