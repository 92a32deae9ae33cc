use std::time::Duration;

use crate::config::BackoffConfig;

/// Parameters of the adaptive backoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Delay in seconds before the very first request of the run.
    pub initial_delay_secs: f64,
    /// Amount the delay shrinks by after each successful attempt.
    pub success_step_secs: f64,
    /// Floor applied after doubling on a failed attempt.
    pub min_failure_delay_secs: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_secs: 0.1,
            success_step_secs: 0.01,
            min_failure_delay_secs: 0.01,
        }
    }
}

impl From<&BackoffConfig> for BackoffPolicy {
    fn from(cfg: &BackoffConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts,
            initial_delay_secs: cfg.initial_delay_secs,
            success_step_secs: cfg.success_step_secs,
            min_failure_delay_secs: cfg.min_failure_delay_secs,
        }
    }
}

/// Current inter-request delay, carried across every fetch of a run.
///
/// The delay never goes negative: success subtracts `success_step_secs` and
/// clamps at zero, failure doubles and clamps at `min_failure_delay_secs` so a
/// zero delay cannot turn into a retry storm.
#[derive(Debug, Clone)]
pub struct BackoffController {
    policy: BackoffPolicy,
    current_delay: f64,
}

impl BackoffController {
    pub fn new(policy: BackoffPolicy) -> Self {
        Self {
            current_delay: policy.initial_delay_secs.max(0.0),
            policy,
        }
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Current delay in seconds.
    pub fn current_delay(&self) -> f64 {
        self.current_delay
    }

    /// Current delay as a `Duration`, saturating for absurdly large values.
    pub fn current_delay_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.current_delay).unwrap_or(Duration::MAX)
    }

    pub fn record_success(&mut self) {
        self.current_delay = (self.current_delay - self.policy.success_step_secs).max(0.0);
    }

    pub fn record_failure(&mut self) {
        self.current_delay = (self.current_delay * 2.0).max(self.policy.min_failure_delay_secs);
    }
}

impl Default for BackoffController {
    fn default() -> Self {
        Self::new(BackoffPolicy::default())
    }
}
