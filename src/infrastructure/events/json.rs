//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.
//! Every line carries an RFC 3339 `ts` field.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: Value) {
        if let Some(obj) = event.as_object_mut() {
            obj.insert(
                "ts".to_string(),
                Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

pub(crate) fn event_to_json(event: &DeployEvent) -> Value {
    match event {
        DeployEvent::Started {
            resource_group,
            deployment_name,
            step_count,
        } => json!({
            "event": "start",
            "command": "deploy",
            "resource_group": resource_group,
            "deployment_name": deployment_name,
            "step_count": step_count,
        }),

        DeployEvent::StepStarted { step } => json!({
            "event": "step_start",
            "step": step,
        }),

        DeployEvent::StepCompleted { step, detail } => json!({
            "event": "step_complete",
            "step": step,
            "detail": detail,
        }),

        DeployEvent::StepSkipped { step, reason } => json!({
            "event": "step_skipped",
            "step": step,
            "reason": reason,
        }),

        DeployEvent::StepFailed { step, error, fatal } => json!({
            "event": "step_failed",
            "step": step,
            "error": error,
            "fatal": fatal,
        }),

        DeployEvent::ProviderRegistered { namespace } => json!({
            "event": "provider_registered",
            "namespace": namespace,
        }),

        DeployEvent::TemplateSubmitted {
            deployment,
            template,
            parameters,
        } => json!({
            "event": "template_submitted",
            "deployment": deployment,
            "template": template.display().to_string(),
            "parameters": parameters.as_ref().map(|p| p.display().to_string()),
        }),

        DeployEvent::ParametersRewritten {
            path,
            changed,
            diff,
        } => json!({
            "event": "parameters_rewritten",
            "path": path.display().to_string(),
            "changed": changed,
            "diff": diff,
        }),

        DeployEvent::ReadinessProbe {
            attempt,
            max_attempts,
            ready,
            next_delay,
            message,
        } => json!({
            "event": "readiness_probe",
            "attempt": attempt,
            "max_attempts": max_attempts,
            "ready": ready,
            "next_delay_ms": next_delay.map(|d| d.as_millis() as u64),
            "message": message,
        }),

        DeployEvent::ContractOutput { output } => json!({
            "event": "contract_output",
            "output": output,
        }),

        DeployEvent::SettingsPatched {
            app,
            slot,
            keys,
            total,
        } => json!({
            "event": "settings_patched",
            "app": app,
            "slot": slot,
            "keys": keys,
            "total": total,
        }),

        DeployEvent::Completed {
            status,
            completed_count,
            skipped_count,
            failed_count,
        } => json!({
            "event": "complete",
            "command": "deploy",
            "status": status,
            "completed": completed_count,
            "skipped": skipped_count,
            "failed": failed_count,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_to_json(&event));
    }
}
