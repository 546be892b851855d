/// Failure modes of one logical fetch. `Timeout`, `Service`, and
/// `Malformed` are transient and retried inside the client; `Rejected`
/// is a definitive answer from the service and never retried.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("service error: {0}")]
    Service(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("{endpoint}: rejected by service: {comment}")]
    Rejected { endpoint: String, comment: String },

    #[error("{endpoint}: every host exhausted; last error: {last}")]
    HostsExhausted { endpoint: String, last: String },
}

impl FetchError {
    /// Whether retrying this failure on the same or another host can help.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout | FetchError::Service(_) | FetchError::Malformed(_)
        )
    }
}

/// Run-fatal failures surfaced to the CLI boundary.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("handle '{handle}' is invalid: {comment}")]
    InvalidHandle { handle: String, comment: String },

    #[error("problem catalog unavailable: {0}")]
    CatalogUnavailable(FetchError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
