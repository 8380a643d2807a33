//! Shared test fixtures for the GitHub activity SDK integration tests.
//!
//! Provides `FakeTransport`, an in-memory [`Transport`] answering from canned
//! responses keyed by endpoint path, plus JSON builders for repository lists
//! and weekly statistics.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use github_activity_sdk::{
    ActivityError, Endpoint, GithubActivitySdk, Result, Transport, UpstreamResponse,
};
use serde_json::{json, Value};

/// 2024-01-07 00:00:00 UTC, a Sunday.
pub const WEEK_2024_01_07: i64 = 1_704_585_600;
pub const WEEK_SECONDS: i64 = 7 * 86_400;

pub const USER: &str = "octocat";

#[derive(Clone)]
enum Canned {
    Reply(UpstreamResponse),
    Fail(String),
    Panic,
}

/// In-memory transport. Clones share routes and call history, so a test can
/// keep one handle for inspection after handing another to the SDK builder.
#[derive(Clone, Default)]
pub struct FakeTransport {
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    calls: Arc<Mutex<Vec<String>>>,
    stats_delay: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `status` and `body`.
    pub fn reply(self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Reply(UpstreamResponse::new(status, body)));
        self
    }

    /// Fail `path` at the transport level, as if the connection dropped.
    pub fn fail(self, path: &str, message: &str) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Fail(message.to_string()));
        self
    }

    /// Panic while serving `path`.
    pub fn panic_on(self, path: &str) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Panic);
        self
    }

    /// Hold every statistics request for `delay` before answering.
    pub fn delay_stats(mut self, delay: Duration) -> Self {
        self.stats_delay = Some(delay);
        self
    }

    /// Every path requested so far, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Statistics paths requested so far, sorted (arrival order is not
    /// deterministic under the fan-out).
    pub fn stats_calls(&self) -> Vec<String> {
        let mut calls: Vec<String> = self
            .calls()
            .into_iter()
            .filter(|c| c.contains("/stats/"))
            .collect();
        calls.sort();
        calls
    }

    /// Highest number of statistics requests observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Transport for FakeTransport {
    fn get(&self, endpoint: &Endpoint<'_>) -> Result<UpstreamResponse> {
        let path = endpoint.path();
        self.calls.lock().unwrap().push(path.clone());
        let canned = self.routes.lock().unwrap().get(&path).cloned();

        if let (Some(delay), Endpoint::CommitActivity { .. }) = (self.stats_delay, endpoint) {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(delay);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        match canned {
            Some(Canned::Reply(resp)) => Ok(resp),
            Some(Canned::Fail(msg)) => Err(ActivityError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                msg,
            ))),
            Some(Canned::Panic) => panic!("fake transport asked to panic on {path}"),
            None => Ok(UpstreamResponse::new(404, r#"{"message":"Not Found"}"#)),
        }
    }

    fn base_url(&self) -> &str {
        "memory://fake/"
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

pub fn repos_path(user: &str) -> String {
    format!("/users/{user}/repos?per_page=100")
}

pub fn stats_path(user: &str, repo: &str) -> String {
    format!("/repos/{user}/{repo}/stats/commit_activity")
}

// ---------------------------------------------------------------------------
// JSON builders
// ---------------------------------------------------------------------------

pub fn repo_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("{USER}/{name}"),
        "html_url": format!("https://github.com/{USER}/{name}"),
        "description": format!("The {name} project"),
        "language": "Rust",
        "stargazers_count": id * 10,
        "forks_count": id,
        "private": false
    })
}

/// Repository list with ids 1..=n in the order given.
pub fn repos_body(names: &[&str]) -> String {
    let repos: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| repo_json(i as u64 + 1, name))
        .collect();
    Value::Array(repos).to_string()
}

pub fn week_json(week: i64, days: [u32; 7]) -> Value {
    json!({
        "week": week,
        "total": days.iter().sum::<u32>(),
        "days": days
    })
}

pub fn weeks_body(weeks: &[(i64, [u32; 7])]) -> String {
    let weeks: Vec<Value> = weeks.iter().map(|&(w, d)| week_json(w, d)).collect();
    Value::Array(weeks).to_string()
}

/// A transport serving `names` as the repository list of [`USER`], with no
/// statistics routes yet.
pub fn fake_with_repos(names: &[&str]) -> FakeTransport {
    FakeTransport::new().reply(&repos_path(USER), 200, repos_body(names))
}

pub fn sdk_with(fake: &FakeTransport) -> GithubActivitySdk {
    GithubActivitySdk::builder()
        .transport(fake.clone())
        .build()
        .unwrap()
}

pub fn date(s: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}
