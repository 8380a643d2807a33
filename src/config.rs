use serde::{Deserialize, Serialize};

use crate::error::{ActivityError, Result};

pub const API_BASE: &str = "https://api.github.com";
pub const ACCEPT_HEADER: &str = "application/vnd.github+json";
pub const USER_AGENT: &str = concat!("github-activity-sdk/", env!("CARGO_PKG_VERSION"));

/// Environment variable consulted for an API token when the builder is
/// asked to read one.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Largest `per_page` value the upstream API honors.
pub const MAX_REPO_PAGE_SIZE: u32 = 100;
pub const DEFAULT_REPO_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_REPOS_FOR_STATS: usize = 5;
pub const DEFAULT_PROBE_LIMIT: usize = 3;

/// Number of trailing series entries shown in the bar chart.
pub const RECENT_WINDOW: usize = 90;

// ---------------------------------------------------------------------------
// ActivityConfig
// ---------------------------------------------------------------------------

/// Policy caps for one search.
///
/// Both values bound upstream traffic: `repo_page_size` caps the single
/// repository-list page, `max_repos_for_stats` caps the statistics fan-out.
///
/// Accepts the JSON form `{"repoPageSize": 100, "maxReposForStats": 5}`;
/// missing keys fall back to the defaults, unknown keys are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ActivityConfig {
    pub repo_page_size: u32,
    pub max_repos_for_stats: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            repo_page_size: DEFAULT_REPO_PAGE_SIZE,
            max_repos_for_stats: DEFAULT_MAX_REPOS_FOR_STATS,
        }
    }
}

impl ActivityConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ActivityConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the caps are within what upstream accepts.
    ///
    /// `max_repos_for_stats` may be zero, which disables the statistics
    /// fan-out entirely.
    pub fn validate(&self) -> Result<()> {
        if self.repo_page_size == 0 || self.repo_page_size > MAX_REPO_PAGE_SIZE {
            return Err(ActivityError::InvalidArgument(format!(
                "repoPageSize must be between 1 and {}, got {}",
                MAX_REPO_PAGE_SIZE, self.repo_page_size
            )));
        }
        Ok(())
    }
}

/// Read the API token from [`TOKEN_ENV_VAR`], ignoring blank values.
pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
