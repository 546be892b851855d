use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::failover::{FailoverPlan, Step};
use crate::throttle::Throttle;
use crate::transport::Transport;

/// Retries per host before failing over. Not configurable: the budget is
/// policy, not tuning.
const MAX_ATTEMPTS: u32 = 4;
const BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Network tuning for one run.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Equivalent API bases tried in order for every logical call.
    pub hosts: Vec<String>,
    pub min_interval: Duration,
    pub page_size: u32,
    pub max_pages_per_user: Option<u32>,
}

/// API client wrapping a [`Transport`] with the process-wide throttle,
/// per-call retry/failover, and paged history retrieval.
pub struct ApiClient<T: Transport> {
    transport: T,
    settings: ApiSettings,
    throttle: Mutex<Throttle>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, settings: ApiSettings) -> Self {
        let throttle = Mutex::new(Throttle::new(settings.min_interval));
        Self {
            transport,
            settings,
            throttle,
        }
    }

    /// Wait out the global minimum inter-call interval, then stamp it.
    ///
    /// The lock is held across the sleep so concurrent callers, if any
    /// ever exist, still serialize through this one gate.
    async fn throttle(&self) {
        let mut gate = self.throttle.lock().await;
        let wait = gate.delay(Instant::now());
        if !wait.is_zero() {
            debug!("throttle: sleeping {:.2}s", wait.as_secs_f64());
            tokio::time::sleep(wait).await;
        }
        gate.record(Instant::now());
    }

    /// One logical call: throttle, try hosts in order with bounded
    /// backed-off retries, unwrap the API's status envelope.
    ///
    /// A `Rejected` envelope is a definitive answer and returns
    /// immediately; transient failures burn through the failover plan and
    /// end in `HostsExhausted`.
    pub async fn call(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, FetchError> {
        let mut plan = FailoverPlan::new(self.settings.hosts.len(), MAX_ATTEMPTS, BACKOFF_BASE);
        let mut last_err: Option<FetchError> = None;
        loop {
            match plan.current() {
                Step::Exhausted => {
                    return Err(FetchError::HostsExhausted {
                        endpoint: endpoint.to_string(),
                        last: last_err
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "no host configured".to_string()),
                    });
                }
                Step::Try {
                    host,
                    attempt,
                    backoff,
                } => {
                    if !backoff.is_zero() {
                        debug!(
                            "{endpoint}: backing off {:.2}s before attempt {attempt}",
                            backoff.as_secs_f64()
                        );
                        tokio::time::sleep(backoff).await;
                    }
                    self.throttle().await;

                    let base = &self.settings.hosts[host];
                    let url = format!("{base}/{endpoint}");
                    let outcome = match self.transport.get(&url, params).await {
                        Ok(body) => parse_envelope(endpoint, &body),
                        Err(e) => Err(e),
                    };
                    match outcome {
                        Ok(result) => return Ok(result),
                        Err(e) if !e.is_transient() => return Err(e),
                        Err(e) => {
                            warn!("{endpoint}: host {base} attempt {attempt}/{MAX_ATTEMPTS}: {e}");
                            last_err = Some(e);
                            plan.advance();
                        }
                    }
                }
            }
        }
    }

    /// Full submission history for one handle, concatenated in page order.
    ///
    /// Stops when a page comes back shorter than the page size, or when
    /// the optional per-user page budget is spent.
    pub async fn user_submissions(&self, handle: &str) -> Result<Vec<Value>, FetchError> {
        let page_size = self.settings.page_size;
        let mut rows = Vec::new();
        let mut from: u64 = 1;
        let mut page: u32 = 0;
        loop {
            page += 1;
            debug!("user.status: {handle} page={page} from={from}");
            let result = self
                .call(
                    "user.status",
                    &[
                        ("handle", handle.to_string()),
                        ("from", from.to_string()),
                        ("count", page_size.to_string()),
                    ],
                )
                .await?;
            let batch = result.as_array().cloned().ok_or_else(|| {
                FetchError::Malformed("user.status result is not an array".to_string())
            })?;
            let fetched = batch.len();
            rows.extend(batch);
            if fetched < page_size as usize {
                break;
            }
            if let Some(max_pages) = self.settings.max_pages_per_user {
                if page >= max_pages {
                    debug!("user.status: {handle} reached max_pages_per_user={max_pages}");
                    break;
                }
            }
            from += u64::from(page_size);
        }
        Ok(rows)
    }
}

fn looks_like_html(body: &str) -> bool {
    let t = body.trim_start().to_lowercase();
    t.starts_with("<!doctype html") || t.starts_with("<html")
}

/// Comments the service sends when the problem is on its side, worth
/// retrying elsewhere or later.
fn is_transient_comment(comment: &str) -> bool {
    let c = comment.to_lowercase();
    ["limit exceeded", "service unavailable", "please try again later"]
        .iter()
        .any(|needle| c.contains(needle))
}

/// Unwrap the `{"status": "OK"|"FAILED", ...}` envelope around every
/// API response.
fn parse_envelope(endpoint: &str, body: &str) -> Result<Value, FetchError> {
    if looks_like_html(body) {
        return Err(FetchError::Malformed(
            "non-JSON HTML response (likely WAF challenge)".to_string(),
        ));
    }
    let json: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(format!("invalid JSON: {e}")))?;
    match json.get("status").and_then(Value::as_str) {
        Some("OK") => json
            .get("result")
            .cloned()
            .ok_or_else(|| FetchError::Malformed("OK envelope without result".to_string())),
        Some("FAILED") => {
            let comment = json
                .get("comment")
                .and_then(Value::as_str)
                .unwrap_or("FAILED")
                .trim()
                .to_string();
            if is_transient_comment(&comment) {
                Err(FetchError::Service(comment))
            } else {
                Err(FetchError::Rejected {
                    endpoint: endpoint.to_string(),
                    comment,
                })
            }
        }
        _ => Err(FetchError::Malformed(
            "envelope missing status field".to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
