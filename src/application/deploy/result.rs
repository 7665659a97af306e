//! Deploy Result
//!
//! Result types for deploy operations.

use crate::domain::entities::ContractOutput;
use crate::domain::ports::RunStatus;
use crate::domain::value_objects::Step;
use crate::error::ScdeployError;

/// How one step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Completed { detail: String },
    Skipped { reason: String },
    Failed { error: String, fatal: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub status: StepStatus,
}

/// Result of a deploy operation
#[derive(Debug, Default)]
pub struct DeployResult {
    /// One record per step, in pipeline order
    pub steps: Vec<StepRecord>,
    pub rpc_endpoint: Option<String>,
    pub contract: Option<ContractOutput>,
    /// Error that stopped the run, if any
    pub error: Option<ScdeployError>,
}

impl DeployResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RunStatus {
        let mut partial = false;
        for record in &self.steps {
            if let StepStatus::Failed { fatal, .. } = record.status {
                if fatal {
                    return RunStatus::Failed;
                }
                partial = true;
            }
        }
        if self.error.is_some() {
            RunStatus::Failed
        } else if partial {
            RunStatus::Partial
        } else {
            RunStatus::Success
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == RunStatus::Success
    }

    pub fn record(&self, step: Step) -> Option<&StepRecord> {
        self.steps.iter().find(|r| r.step == step)
    }

    pub fn completed_count(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Completed { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Skipped { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&StepStatus) -> bool) -> usize {
        self.steps.iter().filter(|r| pred(&r.status)).count()
    }
}
