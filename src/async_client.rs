//! Async wrapper around [`GithubActivitySdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client and the statistics fan-out do their work.
//!
//! # Example
//!
//! ```no_run
//! use github_activity_sdk::AsyncGithubActivitySdk;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncGithubActivitySdk::builder().build().await.unwrap();
//!
//!     // Only the newest search's outcome is returned
//!     if let Some(outcome) = sdk.search_latest("octocat").await.unwrap() {
//!         println!("{} days of activity", outcome.activity.series.len());
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::error::{ActivityError, Result};
use crate::models::{DailySeries, RepositorySummary};
use crate::session::{SearchGeneration, SearchOutcome};
use crate::{GithubActivitySdk, GithubActivitySdkBuilder};

fn join_error(e: tokio::task::JoinError) -> ActivityError {
    ActivityError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncGithubActivitySdkBuilder
// ---------------------------------------------------------------------------

/// Builder for an [`AsyncGithubActivitySdk`].
///
/// Wraps a [`GithubActivitySdkBuilder`]; configure it with the same options
/// through [`configure`](Self::configure).
#[derive(Default)]
pub struct AsyncGithubActivitySdkBuilder {
    inner: GithubActivitySdkBuilder,
}

impl AsyncGithubActivitySdkBuilder {
    /// Apply synchronous builder options.
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(GithubActivitySdkBuilder) -> GithubActivitySdkBuilder,
    {
        self.inner = f(self.inner);
        self
    }

    /// Build the async SDK.
    ///
    /// The blocking HTTP client is constructed on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncGithubActivitySdk> {
        let inner = self.inner;
        tokio::task::spawn_blocking(move || {
            let sdk = inner.build()?;
            Ok(AsyncGithubActivitySdk {
                inner: Arc::new(sdk),
                generation: SearchGeneration::new(),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncGithubActivitySdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`GithubActivitySdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The wrapper also owns a
/// [`SearchGeneration`] so [`search_latest`](Self::search_latest) can drop
/// outcomes of searches that were overtaken by a newer one.
pub struct AsyncGithubActivitySdk {
    inner: Arc<GithubActivitySdk>,
    generation: SearchGeneration,
}

impl AsyncGithubActivitySdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncGithubActivitySdkBuilder {
        AsyncGithubActivitySdkBuilder::default()
    }

    /// Wrap an already-built SDK.
    pub fn from_sdk(sdk: GithubActivitySdk) -> Self {
        Self {
            inner: Arc::new(sdk),
            generation: SearchGeneration::new(),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use github_activity_sdk::AsyncGithubActivitySdk;
    /// # async fn example() -> github_activity_sdk::Result<()> {
    /// # let sdk = AsyncGithubActivitySdk::builder().build().await?;
    /// let probes = sdk.run(|s| s.activity().probe("octocat", 3)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&GithubActivitySdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(join_error)?
    }

    /// List a user's repositories asynchronously.
    pub async fn list_repositories(&self, username: &str) -> Result<Vec<RepositorySummary>> {
        let username = username.to_string();
        self.run(move |s| s.repos().list(&username)).await
    }

    /// Aggregate a user's commit activity asynchronously.
    ///
    /// Only fails if the blocking task itself could not complete.
    pub async fn aggregate_commit_activity(&self, username: &str) -> Result<DailySeries> {
        let username = username.to_string();
        self.run(move |s| Ok(s.activity().aggregate(&username))).await
    }

    /// Run a full search asynchronously, regardless of newer searches.
    pub async fn search(&self, username: &str) -> Result<SearchOutcome> {
        let username = username.to_string();
        self.run(move |s| Ok(s.search(&username))).await
    }

    /// Run a search and return its outcome only if no other search was
    /// started on this instance in the meantime.
    ///
    /// Returns `Ok(None)` for a superseded search.
    pub async fn search_latest(&self, username: &str) -> Result<Option<SearchOutcome>> {
        let ticket = self.generation.begin();
        let outcome = self.search(username).await?;
        Ok(self.generation.accept(&ticket, outcome))
    }

    /// The generation counter used by [`search_latest`](Self::search_latest).
    pub fn generation(&self) -> &SearchGeneration {
        &self.generation
    }

    /// Borrow the wrapped synchronous SDK.
    pub fn sdk(&self) -> &GithubActivitySdk {
        &self.inner
    }
}
