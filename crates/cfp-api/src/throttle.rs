use std::time::{Duration, Instant};

/// Process-wide minimum spacing between outbound calls. Every network
/// call, whichever component issues it, must pass through one shared
/// instance of this gate.
///
/// The arithmetic is separated from the sleeping so it can be tested
/// without waiting.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_call: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: None,
        }
    }

    /// How long a caller must still wait at `now` before the next call
    /// is allowed.
    pub fn delay(&self, now: Instant) -> Duration {
        match self.last_call {
            None => Duration::ZERO,
            Some(last) => self.min_interval.saturating_sub(now.duration_since(last)),
        }
    }

    /// Record that a call went out at `now`.
    pub fn record(&mut self, now: Instant) {
        self.last_call = Some(now);
    }
}
