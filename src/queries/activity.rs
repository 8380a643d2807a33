//! Commit activity aggregation across a user's repositories.
//!
//! The aggregator lists the user's repositories, takes the first
//! `max_repos_for_stats` of them, requests each one's weekly statistics on
//! its own scoped thread, waits for every request to settle, and folds the
//! results into a [`DailySeries`]. A repository whose statistics cannot be
//! fetched contributes nothing; it never fails the aggregation.

use std::io;
use std::thread;

use super::{normalize_username, upstream_message, RepoQuery};
use crate::client::ApiClient;
use crate::config::DEFAULT_PROBE_LIMIT;
use crate::error::{ActivityError, Result};
use crate::fold::ActivityFold;
use crate::models::{
    ActivityReport, DailySeries, PartialDataLoss, RepositorySummary, StatsProbe,
    WeeklyActivityRecord,
};
use crate::transport::{Endpoint, UpstreamResponse};

/// Result of one statistics request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsFetch {
    Ready(Vec<WeeklyActivityRecord>),
    /// Upstream accepted the request but has not computed the statistics yet.
    Pending,
}

// ---------------------------------------------------------------------------
// ActivityQuery
// ---------------------------------------------------------------------------

/// Query interface for per-repository commit statistics.
pub struct ActivityQuery<'a> {
    client: &'a ApiClient,
}

impl<'a> ActivityQuery<'a> {
    /// Create a new `ActivityQuery` bound to the given client.
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Daily commit counts for `username`, summed over the first
    /// `max_repos_for_stats` repositories.
    ///
    /// Never fails. An unlistable user or a set of repositories with no
    /// usable statistics yields an empty series.
    pub fn aggregate(&self, username: &str) -> DailySeries {
        self.report(username).series
    }

    /// Like [`aggregate`](Self::aggregate) but also reports which
    /// repositories were fetched, failed, or were still pending.
    pub fn report(&self, username: &str) -> ActivityReport {
        let span = tracing::info_span!("aggregate_commit_activity", username);
        let _guard = span.enter();

        match RepoQuery::new(self.client).list(username) {
            Ok(repos) => self.report_for(username, &repos),
            Err(e) => {
                tracing::warn!(error = %e, "repository list unavailable; activity left empty");
                ActivityReport::empty(username.trim())
            }
        }
    }

    /// Aggregate over a repository list the caller already holds.
    ///
    /// Only the first `max_repos_for_stats` entries are used, in the order
    /// given.
    pub fn report_for(&self, username: &str, repositories: &[RepositorySummary]) -> ActivityReport {
        let username = match normalize_username(username) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(error = %e, "no activity to aggregate");
                return ActivityReport::empty(username.trim());
            }
        };

        let limit = self.client.config().max_repos_for_stats;
        let selected: Vec<&RepositorySummary> = repositories.iter().take(limit).collect();
        let outcomes = self.fetch_all(username, &selected);

        let mut report = ActivityReport::empty(username);
        let mut fold = ActivityFold::new();

        for (repo, outcome) in selected.iter().zip(outcomes) {
            report.selected.push(repo.name.clone());
            match outcome {
                Ok(StatsFetch::Ready(weeks)) => fold.add_weeks(&weeks),
                Ok(StatsFetch::Pending) => {
                    tracing::debug!(repository = %repo.name, "commit statistics not ready");
                    report.pending.push(repo.name.clone());
                }
                Err(e) => {
                    tracing::warn!(
                        repository = %repo.name,
                        error = %e,
                        "commit activity unavailable; counting as zero"
                    );
                    report.losses.push(PartialDataLoss {
                        repository: repo.name.clone(),
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                }
            }
        }

        report.skipped_weeks = fold.skipped_weeks();
        report.series = fold.finish();
        tracing::debug!(
            days = report.series.len(),
            losses = report.losses.len(),
            pending = report.pending.len(),
            skipped_weeks = report.skipped_weeks,
            "commit activity folded"
        );
        report
    }

    /// Fetch the weekly statistics of one repository.
    ///
    /// 202 and 204 responses, as well as an empty body or empty JSON object,
    /// mean the statistics are still being computed and yield
    /// [`StatsFetch::Pending`].
    pub fn commit_activity(&self, owner: &str, repo: &str) -> Result<StatsFetch> {
        let resp = self.client.get(&Endpoint::CommitActivity { owner, repo })?;
        interpret_stats(&resp)
    }

    /// Fetch each selected repository's statistics concurrently and return
    /// the outcomes in selection order once all have settled.
    fn fetch_all(&self, username: &str, selected: &[&RepositorySummary]) -> Vec<Result<StatsFetch>> {
        let span = tracing::Span::current();
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());
        thread::scope(|scope| {
            let handles: Vec<_> = selected
                .iter()
                .map(|repo| {
                    let span = span.clone();
                    let dispatch = dispatch.clone();
                    let name = repo.name.as_str();
                    scope.spawn(move || {
                        tracing::dispatcher::with_default(&dispatch, || {
                            span.in_scope(|| self.commit_activity(username, name))
                        })
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(ActivityError::Io(io::Error::other(
                            "commit activity worker panicked",
                        )))
                    })
                })
                .collect()
        })
    }

    /// Fetch the first `limit` repositories' statistics one at a time and
    /// describe what came back.
    ///
    /// A diagnostic aid: unlike [`aggregate`](Self::aggregate) the listing
    /// error is returned, and per-repository failures are reported rather
    /// than absorbed.
    pub fn probe(&self, username: &str, limit: usize) -> Result<Vec<StatsProbe>> {
        let repos = RepoQuery::new(self.client).list(username)?;
        let owner = username.trim();
        Ok(repos
            .iter()
            .take(limit)
            .map(|repo| self.probe_one(owner, &repo.name))
            .collect())
    }

    /// [`probe`](Self::probe) over the first [`DEFAULT_PROBE_LIMIT`]
    /// repositories.
    pub fn probe_default(&self, username: &str) -> Result<Vec<StatsProbe>> {
        self.probe(username, DEFAULT_PROBE_LIMIT)
    }

    fn probe_one(&self, owner: &str, repo: &str) -> StatsProbe {
        let mut probe = StatsProbe {
            repository: repo.to_string(),
            status: None,
            weeks: 0,
            sample_week: None,
            error: None,
        };

        let resp = match self.client.get(&Endpoint::CommitActivity { owner, repo }) {
            Ok(resp) => resp,
            Err(e) => {
                probe.error = Some(e.to_string());
                return probe;
            }
        };
        probe.status = Some(resp.status);

        match interpret_stats(&resp) {
            Ok(StatsFetch::Ready(weeks)) => {
                probe.weeks = weeks.len();
                probe.sample_week = weeks.into_iter().next();
            }
            Ok(StatsFetch::Pending) => {}
            Err(e) => probe.error = Some(e.to_string()),
        }
        probe
    }
}

/// Map a statistics response onto [`StatsFetch`] or an error.
fn interpret_stats(resp: &UpstreamResponse) -> Result<StatsFetch> {
    match resp.status {
        202 | 204 => return Ok(StatsFetch::Pending),
        _ if !resp.is_success() => {
            return Err(ActivityError::Upstream {
                status: resp.status,
                message: upstream_message(&resp.body),
            })
        }
        _ => {}
    }
    parse_commit_activity(&resp.body)
}

/// Decode a statistics body.
pub fn parse_commit_activity(body: &str) -> Result<StatsFetch> {
    if body.trim().is_empty() {
        return Ok(StatsFetch::Pending);
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.as_object().is_some_and(|o| o.is_empty()) {
        return Ok(StatsFetch::Pending);
    }
    let weeks: Vec<WeeklyActivityRecord> = serde_json::from_value(value)?;
    Ok(StatsFetch::Ready(weeks))
}
