//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::Step;

/// Overall outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    /// A recoverable step failed; dependent steps were skipped
    Partial,
    /// A fatal step failed and the run stopped
    Failed,
}

/// Event emitted during deploy operations
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        resource_group: String,
        deployment_name: String,
        step_count: usize,
    },

    StepStarted { step: Step },

    StepCompleted { step: Step, detail: String },

    /// Step did not run; `reason` names what it depended on
    StepSkipped { step: Step, reason: String },

    StepFailed {
        step: Step,
        error: String,
        fatal: bool,
    },

    ProviderRegistered { namespace: String },

    TemplateSubmitted {
        deployment: String,
        template: PathBuf,
        parameters: Option<PathBuf>,
    },

    /// Supply-chain parameter file was rewritten
    ParametersRewritten {
        path: PathBuf,
        changed: Vec<String>,
        /// Unified diff of the file (secrets redacted)
        diff: String,
    },

    /// One readiness probe finished
    ReadinessProbe {
        attempt: u32,
        max_attempts: u32,
        ready: bool,
        /// Delay before the next probe, if there is one
        next_delay: Option<Duration>,
        message: Option<String>,
    },

    /// Captured contract deployer output (secrets redacted)
    ContractOutput { output: String },

    SettingsPatched {
        app: String,
        slot: String,
        /// Keys written by this run
        keys: Vec<String>,
        /// Total number of settings pushed
        total: usize,
    },

    /// Deploy completed (or stopped on a fatal error)
    Completed {
        status: RunStatus,
        completed_count: usize,
        skipped_count: usize,
        failed_count: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
