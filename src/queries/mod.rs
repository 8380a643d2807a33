//! Query modules for the GitHub activity SDK.
//!
//! Each module provides a query struct that borrows an
//! [`ApiClient`](crate::client::ApiClient) and exposes the operations for one
//! upstream resource.

pub mod activity;
pub mod repos;

pub use activity::ActivityQuery;
pub use repos::RepoQuery;

use crate::error::{ActivityError, Result};

/// Trim `username` and reject it when nothing is left.
pub(crate) fn normalize_username(username: &str) -> Result<&str> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ActivityError::InvalidArgument(
            "username must not be empty".into(),
        ));
    }
    Ok(trimmed)
}

/// Pull the `message` field out of an upstream error body, falling back to
/// a shortened copy of the raw body.
pub(crate) fn upstream_message(body: &str) -> String {
    const MAX_LEN: usize = 200;

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_LEN).collect()
}
