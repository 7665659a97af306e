//! Console event sink
//!
//! Human-readable rendering of deploy events. `-v` adds provider, settings
//! and contract deployer output; `-vv` adds the parameter file diff.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use scdeploy::domain::ports::{DeployEvent, DeployEventSink, RunStatus};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct ConsoleEventSink {
    ui: UiContext,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, writer: W) -> Self {
        Self {
            ui,
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let lines = render_event(&event, &self.ui);
        if lines.is_empty() {
            return;
        }
        if let Ok(mut writer) = self.writer.lock() {
            for line in lines {
                let _ = writeln!(writer, "{}", line);
            }
            let _ = writer.flush();
        }
    }
}

pub(crate) fn render_event(event: &DeployEvent, ui: &UiContext) -> Vec<String> {
    let (color, unicode) = (ui.color, ui.unicode);
    let detail = |text: String| {
        format!(
            "    {} {}",
            Icon::Arrow.colored(color, unicode),
            ColoredText::dim(text).render(color)
        )
    };

    match event {
        DeployEvent::Started {
            resource_group,
            deployment_name,
            ..
        } => vec![
            format!(
                "{} {}",
                Icon::Deploy.colored(color, unicode),
                ColoredText::info("scdeploy deploy").bold().render(color)
            ),
            ColoredText::dim(format!(
                "   resource group {}, deployment {}",
                resource_group, deployment_name
            ))
            .render(color),
            String::new(),
        ],

        DeployEvent::StepStarted { step } if ui.verbose > 0 => vec![format!(
            "{} {}...",
            Icon::Progress.colored(color, unicode),
            step.label()
        )],
        DeployEvent::StepStarted { .. } => Vec::new(),

        DeployEvent::StepCompleted { step, detail: text } => vec![format!(
            "{} {} {}",
            Icon::Success.colored(color, unicode),
            step.label(),
            ColoredText::dim(format!("({})", text)).render(color)
        )],

        DeployEvent::StepSkipped { step, reason } => vec![format!(
            "{} {} {}",
            Icon::Pending.colored(color, unicode),
            ColoredText::dim(step.label()).render(color),
            ColoredText::dim(format!("skipped: {}", reason)).render(color)
        )],

        DeployEvent::StepFailed { step, error, fatal } => {
            let (icon, label) = if *fatal {
                (Icon::Error, ColoredText::error(step.label()).bold())
            } else {
                (Icon::Warning, ColoredText::warning(step.label()).bold())
            };
            let mut lines = vec![format!(
                "{} {}: {}",
                icon.colored(color, unicode),
                label.render(color),
                error
            )];
            if !*fatal {
                lines.push(detail("continuing with the remaining steps".to_string()));
            }
            lines
        }

        DeployEvent::ProviderRegistered { namespace } if ui.verbose > 0 => {
            vec![detail(format!("registered {}", namespace))]
        }
        DeployEvent::ProviderRegistered { .. } => Vec::new(),

        DeployEvent::TemplateSubmitted {
            deployment,
            template,
            parameters,
        } => {
            let parameters = parameters
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "no parameter file".to_string());
            vec![detail(format!(
                "submitting {} from {} ({}), this can take a while",
                deployment,
                template.display(),
                parameters
            ))]
        }

        DeployEvent::ParametersRewritten { diff, .. } if ui.verbose > 1 => diff
            .lines()
            .map(|line| {
                let text = format!("      {}", line);
                if line.starts_with('+') && !line.starts_with("+++") {
                    ColoredText::success(text).render(color)
                } else if line.starts_with('-') && !line.starts_with("---") {
                    ColoredText::error(text).render(color)
                } else {
                    ColoredText::dim(text).render(color)
                }
            })
            .collect(),
        DeployEvent::ParametersRewritten { .. } => Vec::new(),

        DeployEvent::ReadinessProbe {
            attempt,
            max_attempts,
            ready: false,
            next_delay,
            message,
        } => {
            let mut text = format!("node not answering yet (attempt {}/{})", attempt, max_attempts);
            if let Some(delay) = next_delay {
                text.push_str(&format!(", retrying in {}", format_delay(*delay)));
            }
            let mut lines = vec![detail(text)];
            if let (Some(message), true) = (message, ui.verbose > 0) {
                lines.push(detail(message.clone()));
            }
            lines
        }
        DeployEvent::ReadinessProbe { .. } => Vec::new(),

        DeployEvent::ContractOutput { output } if ui.verbose > 0 => output
            .lines()
            .map(|line| ColoredText::dim(format!("      | {}", line)).render(color))
            .collect(),
        DeployEvent::ContractOutput { .. } => Vec::new(),

        DeployEvent::SettingsPatched {
            app, slot, keys, ..
        } if ui.verbose > 0 => vec![detail(format!("{} [{}]: {}", app, slot, keys.join(", ")))],
        DeployEvent::SettingsPatched { .. } => Vec::new(),

        DeployEvent::Completed {
            status,
            completed_count,
            skipped_count,
            failed_count,
        } => {
            let (icon, title) = match status {
                RunStatus::Success => (
                    Icon::Success,
                    ColoredText::success("Deployment complete").bold(),
                ),
                RunStatus::Partial => (
                    Icon::Warning,
                    ColoredText::warning("Deployment partially complete").bold(),
                ),
                RunStatus::Failed => (Icon::Error, ColoredText::error("Deployment failed").bold()),
            };
            vec![
                String::new(),
                format!("{} {}", icon.colored(color, unicode), title.render(color)),
                ColoredText::dim(format!(
                    "   {} completed, {} skipped, {} failed",
                    completed_count, skipped_count, failed_count
                ))
                .render(color),
            ]
        }
    }
}

fn format_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", delay.as_millis())
    }
}
