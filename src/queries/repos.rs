//! Repository listing for a single account.

use std::collections::HashSet;

use super::{normalize_username, upstream_message};
use crate::client::ApiClient;
use crate::error::{ActivityError, Result};
use crate::models::RepositorySummary;
use crate::transport::Endpoint;

// ---------------------------------------------------------------------------
// RepoQuery
// ---------------------------------------------------------------------------

/// Query interface for a user's public repositories.
pub struct RepoQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> RepoQuery<'a> {
    /// Create a new `RepoQuery` bound to the given client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List the public repositories of `username`.
    ///
    /// Fetches a single page of at most `repo_page_size` entries; anything
    /// past that page is not returned. Entries repeating an `id` already
    /// seen are dropped, keeping upstream order otherwise.
    ///
    /// # Errors
    ///
    /// * [`ActivityError::InvalidArgument`] for a blank username.
    /// * [`ActivityError::NotFound`] when upstream answers 404.
    /// * [`ActivityError::Upstream`] for any other non-success status, and
    ///   the `Http`/`Io`/`Json` variants for transport or payload failures.
    pub fn list(&self, username: &str) -> Result<Vec<RepositorySummary>> {
        let username = normalize_username(username)?;
        let span = tracing::info_span!("list_repositories", username);
        let _guard = span.enter();

        let endpoint = Endpoint::UserRepos {
            username,
            per_page: self.client.config().repo_page_size,
        };
        let resp = self.client.get(&endpoint)?;

        if resp.status == 404 {
            return Err(ActivityError::NotFound(format!("user '{}'", username)));
        }
        if !resp.is_success() {
            return Err(ActivityError::Upstream {
                status: resp.status,
                message: upstream_message(&resp.body),
            });
        }

        let repos: Vec<RepositorySummary> = serde_json::from_str(&resp.body)?;
        let received = repos.len();

        let mut seen = HashSet::with_capacity(received);
        let unique: Vec<RepositorySummary> =
            repos.into_iter().filter(|r| seen.insert(r.id)).collect();

        if unique.len() < received {
            tracing::debug!(
                dropped = received - unique.len(),
                "duplicate repository ids dropped"
            );
        }
        tracing::debug!(count = unique.len(), "listed repositories");
        Ok(unique)
    }

    /// Number of repositories [`list`](Self::list) returns.
    pub fn count(&self, username: &str) -> Result<usize> {
        Ok(self.list(username)?.len())
    }
}
