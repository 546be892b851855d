//! Run configuration loading and validation (cfp.toml).

mod config;

pub use config::{NetworkConfig, RunConfig, DEFAULT_API_HOSTS};
