//! HTTP plumbing for the upstream REST API.
//!
//! Queries never talk to reqwest directly. They describe what they want as an
//! [`Endpoint`] and hand it to a [`Transport`], which returns the raw status
//! and body. Status interpretation stays with the query that knows what a
//! given status means for its endpoint.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;

use crate::config;
use crate::error::{ActivityError, Result};

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// An upstream resource the SDK knows how to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `GET /users/{username}/repos?per_page={per_page}`
    UserRepos { username: &'a str, per_page: u32 },
    /// `GET /repos/{owner}/{repo}/stats/commit_activity`
    CommitActivity { owner: &'a str, repo: &'a str },
}

impl<'a> Endpoint<'a> {
    /// Unencoded path segments, in order.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Endpoint::UserRepos { username, .. } => vec!["users", username, "repos"],
            Endpoint::CommitActivity { owner, repo } => {
                vec!["repos", owner, repo, "stats", "commit_activity"]
            }
        }
    }

    /// Query string parameter, if the endpoint takes one.
    pub fn query(&self) -> Option<(&'static str, String)> {
        match self {
            Endpoint::UserRepos { per_page, .. } => Some(("per_page", per_page.to_string())),
            Endpoint::CommitActivity { .. } => None,
        }
    }

    /// Human-readable path such as `/users/octocat/repos?per_page=100`.
    ///
    /// Used for tracing and as the lookup key of in-memory transports. Not
    /// percent-encoded; [`HttpTransport`] builds the real URL from
    /// [`segments`](Self::segments).
    pub fn path(&self) -> String {
        let mut path = format!("/{}", self.segments().join("/"));
        if let Some((key, value)) = self.query() {
            path.push('?');
            path.push_str(key);
            path.push('=');
            path.push_str(&value);
        }
        path
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Raw upstream answer: status code plus the undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests against the upstream API.
///
/// Implementations must be shareable across threads: the commit aggregator
/// calls [`get`](Self::get) from several worker threads at once.
pub trait Transport: Send + Sync {
    /// Perform the request. Non-success statuses are *not* errors at this
    /// level; only failures to obtain a response are.
    fn get(&self, endpoint: &Endpoint<'_>) -> Result<UpstreamResponse>;

    /// Base URL requests are resolved against, for display.
    fn base_url(&self) -> &str;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// [`Transport`] backed by a blocking reqwest client.
pub struct HttpTransport {
    base_url: Url,
    client: Client,
    authenticated: bool,
}

impl HttpTransport {
    /// Build a transport for `base_url`.
    ///
    /// Every request carries the GitHub JSON `Accept` header and the SDK
    /// user agent. When `token` is set it is sent as a bearer credential.
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ActivityError::InvalidArgument(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ActivityError::InvalidArgument(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(config::ACCEPT_HEADER));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ActivityError::InvalidArgument("API token is not a valid header value".into())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            base_url,
            client,
            authenticated: token.is_some(),
        })
    }

    /// Resolve an endpoint to a full, percent-encoded URL.
    pub fn url_for(&self, endpoint: &Endpoint<'_>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        if let Some((key, value)) = endpoint.query() {
            url.query_pairs_mut().append_pair(key, &value);
        }
        url
    }

    /// Whether requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

impl Transport for HttpTransport {
    fn get(&self, endpoint: &Endpoint<'_>) -> Result<UpstreamResponse> {
        let resp = self.client.get(self.url_for(endpoint)).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(UpstreamResponse { status, body })
    }

    fn base_url(&self) -> &str {
        self.base_url.as_str()
    }
}
