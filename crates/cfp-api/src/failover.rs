use std::time::Duration;

/// Where one logical call currently stands in its retry/failover budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Attempt `attempt` (1-based) against host `host`, after sleeping
    /// `backoff` first.
    Try {
        host: usize,
        attempt: u32,
        backoff: Duration,
    },
    /// Every host's retry budget is spent.
    Exhausted,
}

/// Retry/failover schedule for one logical call: `max_attempts` tries per
/// host with exponential backoff between them, hosts consumed in
/// configured order. Pure state machine so the policy is testable apart
/// from any network.
#[derive(Debug)]
pub struct FailoverPlan {
    hosts: usize,
    max_attempts: u32,
    backoff_base: Duration,
    host: usize,
    attempt: u32,
}

impl FailoverPlan {
    pub fn new(hosts: usize, max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            hosts,
            max_attempts: max_attempts.max(1),
            backoff_base,
            host: 0,
            attempt: 1,
        }
    }

    pub fn current(&self) -> Step {
        if self.host >= self.hosts {
            return Step::Exhausted;
        }
        // First attempt on a host is immediate; retries wait
        // base * 2^(attempt - 2).
        let backoff = if self.attempt <= 1 {
            Duration::ZERO
        } else {
            self.backoff_base * 2u32.saturating_pow(self.attempt - 2)
        };
        Step::Try {
            host: self.host,
            attempt: self.attempt,
            backoff,
        }
    }

    /// Advance past a failed attempt: next retry on the same host, or the
    /// next host once the per-host budget is spent.
    pub fn advance(&mut self) {
        if self.attempt < self.max_attempts {
            self.attempt += 1;
        } else {
            self.host += 1;
            self.attempt = 1;
        }
    }
}
