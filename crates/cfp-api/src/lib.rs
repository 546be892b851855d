//! Resilient access to the Codeforces-style catalog/history API: global
//! request throttling, bounded retry with backoff, multi-host failover,
//! paged history retrieval, and the parsers that turn raw responses into
//! the `cfp-core` model.

pub mod catalog;
pub mod client;
pub mod error;
pub mod failover;
pub mod submissions;
pub mod throttle;
pub mod transport;

pub use catalog::load_catalog;
pub use client::{ApiClient, ApiSettings};
pub use error::{ApiError, FetchError};
pub use submissions::build_touched_set;
pub use transport::{HttpTransport, Transport};
