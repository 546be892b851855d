use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Equivalent API bases tried in order; overridable via `[network] api_hosts`.
pub const DEFAULT_API_HOSTS: [&str; 2] = [
    "https://codeforces.com/api",
    "https://www.codeforces.com/api",
];

const DEFAULT_MIN_INTERVAL_MS: u64 = 2200;
const DEFAULT_TIMEOUT_SECS: u64 = 45;
const DEFAULT_PAGE_SIZE: u32 = 500;

/// One run's configuration document.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Accounts whose submission history rules problems out.
    pub handles: Vec<String>,
    /// Requested difficulty ratings, one problem picked per entry, in order.
    pub ratings: Vec<u32>,
    pub year_min: i32,
    pub year_max: i32,

    #[serde(default)]
    pub distinct_contest: bool,
    #[serde(default)]
    pub distinct_tags: bool,
    /// Tag -> maximum picks carrying that tag. Ignored while
    /// `distinct_tags` is set (the stricter rule wins).
    #[serde(default)]
    pub tag_caps: HashMap<String, u32>,
    #[serde(default)]
    pub seed: Option<u64>,

    /// Case-insensitive substrings of contest names to exclude.
    #[serde(default)]
    pub exclude_contest_name_patterns: Vec<String>,
    #[serde(default)]
    pub exclude_contest_ids: Vec<i64>,

    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub api_hosts: Vec<String>,
    pub min_interval_ms: u64,
    pub timeout_secs: u64,
    pub page_size: u32,
    pub max_pages_per_user: Option<u32>,
    pub user_agent: String,
    /// Netscape cookies.txt to pass through to the fetch layer.
    pub cookie_file: Option<PathBuf>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_hosts: DEFAULT_API_HOSTS.iter().map(|h| h.to_string()).collect(),
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages_per_user: None,
            user_agent: format!("cf-picker/{}", env!("CARGO_PKG_VERSION")),
            cookie_file: None,
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let mut config: RunConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the cross-field rules and normalize what serde cannot:
    /// trimmed handles/hosts, clamped page size, floored timeout.
    pub fn validate(&mut self) -> Result<()> {
        self.handles = self
            .handles
            .iter()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();
        if self.handles.is_empty() {
            bail!("'handles' must be a non-empty list");
        }
        if self.ratings.is_empty() {
            bail!("'ratings' must be a non-empty list");
        }
        if self.ratings.iter().any(|&r| r == 0) {
            bail!("'ratings' entries must be positive integers");
        }
        if self.year_min > self.year_max {
            bail!("'year_min' cannot be greater than 'year_max'");
        }
        for (tag, &cap) in &self.tag_caps {
            if cap < 1 {
                bail!("tag_caps['{tag}'] must be >= 1");
            }
        }
        if let Some(max_pages) = self.network.max_pages_per_user {
            if max_pages < 1 {
                bail!("'max_pages_per_user' must be >= 1");
            }
        }

        self.network.api_hosts = self
            .network
            .api_hosts
            .iter()
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty())
            .collect();
        if self.network.api_hosts.is_empty() {
            bail!("'api_hosts' must list at least one host");
        }
        self.network.page_size = self.network.page_size.clamp(100, 1000);
        self.network.timeout_secs = self.network.timeout_secs.max(5);
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
