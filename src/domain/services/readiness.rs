//! Node Readiness Wait
//!
//! After the consortium deployment finishes, the transaction node still needs
//! time to boot and start serving JSON-RPC. Instead of sleeping a fixed
//! amount, the node is probed with exponential backoff until it answers or
//! the attempt budget runs out.

use std::time::Duration;

use crate::domain::ports::{NodeProbe, Sleeper};
use crate::error::{ScdeployError, ScdeployResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: u32,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(30),
            multiplier: 2,
        }
    }
}

impl ReadinessPolicy {
    /// Delay after the `attempt`-th probe (1-based), capped at `max_delay`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = self.multiplier.max(1).saturating_pow(exponent);
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Result of a single probe, reported to the caller's observer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeAttempt {
    pub attempt: u32,
    pub ready: bool,
    pub next_delay: Option<Duration>,
    pub message: Option<String>,
}

/// Probe until ready. Returns the number of attempts it took.
///
/// Probe errors count as "not ready yet", except a missing probe tool,
/// which no amount of waiting will fix.
pub fn wait_until_ready(
    probe: &dyn NodeProbe,
    sleeper: &dyn Sleeper,
    policy: &ReadinessPolicy,
    endpoint: &str,
    mut observe: impl FnMut(&ProbeAttempt),
) -> ScdeployResult<u32> {
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        if sleeper.is_cancelled() {
            return Err(ScdeployError::Cancelled);
        }

        let (ready, message) = match probe.is_ready(endpoint) {
            Ok(ready) => (ready, None),
            Err(e @ ScdeployError::CommandNotFound { .. }) => return Err(e),
            Err(e) => (false, Some(e.to_string())),
        };

        let next_delay = (!ready && attempt < max_attempts).then(|| policy.delay_after(attempt));
        observe(&ProbeAttempt {
            attempt,
            ready,
            next_delay,
            message,
        });

        if ready {
            return Ok(attempt);
        }
        if let Some(delay) = next_delay {
            sleeper.sleep(delay);
        }
    }

    if sleeper.is_cancelled() {
        return Err(ScdeployError::Cancelled);
    }

    Err(ScdeployError::NodeNotReady {
        endpoint: endpoint.to_string(),
        attempts: max_attempts,
    })
}
