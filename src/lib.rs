//! GitHub activity SDK for Rust.
//!
//! Lists a user's public repositories and folds the weekly commit statistics
//! of the first few into one daily series, ready for a contribution chart.
//!
//! # Quick start
//!
//! ```no_run
//! use github_activity_sdk::GithubActivitySdk;
//!
//! let sdk = GithubActivitySdk::builder().build().unwrap();
//!
//! // Repository grid
//! let repos = sdk.repos().list("octocat").unwrap();
//!
//! // Daily commit counts over the first five repositories
//! let series = sdk.activity().aggregate("octocat");
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod config;
pub mod error;
pub mod fold;
pub mod models;
pub mod presentation;
pub mod queries;
pub mod session;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncGithubActivitySdk;
pub use client::ApiClient;
pub use config::ActivityConfig;
pub use error::{ActivityError, FailureKind, Result};
pub use session::{SearchGeneration, SearchOutcome, SearchTicket};
pub use transport::{Endpoint, HttpTransport, Transport, UpstreamResponse};

use std::fmt;
use std::time::Duration;

use crate::models::ActivityReport;

// ---------------------------------------------------------------------------
// GithubActivitySdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`GithubActivitySdk`].
///
/// Use [`GithubActivitySdk::builder()`] to obtain a builder, chain
/// configuration methods, and call [`build()`](GithubActivitySdkBuilder::build).
pub struct GithubActivitySdkBuilder {
    base_url: String,
    token: Option<String>,
    token_from_env: bool,
    timeout: Duration,
    config: ActivityConfig,
    transport: Option<Box<dyn Transport>>,
}

impl Default for GithubActivitySdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE.to_string(),
            token: None,
            token_from_env: false,
            timeout: Duration::from_secs(30),
            config: ActivityConfig::default(),
            transport: None,
        }
    }
}

impl GithubActivitySdkBuilder {
    /// Point the SDK at a different API root (e.g. a GitHub Enterprise
    /// `https://host/api/v3`). Defaults to `https://api.github.com`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Send `token` as a bearer credential with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fall back to the `GITHUB_TOKEN` environment variable when no explicit
    /// token is set. Defaults to `false`.
    pub fn token_from_env(mut self, enabled: bool) -> Self {
        self.token_from_env = enabled;
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace both policy caps at once.
    pub fn config(mut self, config: ActivityConfig) -> Self {
        self.config = config;
        self
    }

    /// Page size of the single repository-list request (1 to 100).
    pub fn repo_page_size(mut self, size: u32) -> Self {
        self.config.repo_page_size = size;
        self
    }

    /// How many repositories have their statistics fetched.
    pub fn max_repos_for_stats(mut self, max: usize) -> Self {
        self.config.max_repos_for_stats = max;
        self
    }

    /// Use a custom [`Transport`] instead of the reqwest-backed
    /// [`HttpTransport`]. `base_url`, `token` and `timeout` are then ignored.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Build the SDK.
    ///
    /// No request is made here; the HTTP client is only configured.
    pub fn build(self) -> Result<GithubActivitySdk> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let token = self
                    .token
                    .or_else(|| self.token_from_env.then(config::token_from_env).flatten());
                Box::new(HttpTransport::new(
                    &self.base_url,
                    token.as_deref(),
                    self.timeout,
                )?)
            }
        };
        let client = ApiClient::new(transport, self.config)?;
        Ok(GithubActivitySdk { client })
    }
}

// ---------------------------------------------------------------------------
// GithubActivitySdk
// ---------------------------------------------------------------------------

/// The main entry point of the SDK.
///
/// Wraps an [`ApiClient`] and exposes query interfaces as lightweight
/// borrowing wrappers. The SDK is `Sync`; concurrent searches may share one
/// instance.
///
/// Created via [`GithubActivitySdk::builder()`].
pub struct GithubActivitySdk {
    client: ApiClient,
}

impl GithubActivitySdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> GithubActivitySdkBuilder {
        GithubActivitySdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the repository listing interface.
    pub fn repos(&self) -> queries::RepoQuery<'_> {
        queries::RepoQuery::new(&self.client)
    }

    /// Access the commit activity interface.
    pub fn activity(&self) -> queries::ActivityQuery<'_> {
        queries::ActivityQuery::new(&self.client)
    }

    // -- Orchestration -----------------------------------------------------

    /// Run one dashboard search for `username`.
    ///
    /// Lists the repositories once and aggregates activity from that list.
    /// When listing fails the error is kept in
    /// [`SearchOutcome::repositories`] and the activity report is empty.
    pub fn search(&self, username: &str) -> SearchOutcome {
        let username = username.trim();
        let repositories = self.repos().list(username);
        let activity = match &repositories {
            Ok(repos) => self.activity().report_for(username, repos),
            Err(e) => {
                tracing::warn!(username, error = %e, "repository list unavailable; activity left empty");
                ActivityReport::empty(username)
            }
        };
        SearchOutcome {
            username: username.to_string(),
            repositories,
            activity,
        }
    }

    /// The policy caps in effect.
    pub fn config(&self) -> &ActivityConfig {
        self.client.config()
    }

    /// Return a reference to the underlying [`ApiClient`] for advanced usage.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for GithubActivitySdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.client.config();
        write!(
            f,
            "GithubActivitySdk(base_url={}, repo_page_size={}, max_repos_for_stats={})",
            self.client.base_url(),
            config.repo_page_size,
            config.max_repos_for_stats
        )
    }
}
