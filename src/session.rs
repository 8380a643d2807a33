//! Search outcomes and the generation token that discards stale ones.
//!
//! A dashboard may start a new search before the previous one has returned.
//! In-flight requests cannot be cancelled, so each search takes a
//! [`SearchTicket`] from a shared [`SearchGeneration`] and its result is only
//! applied if that ticket is still the latest when the result arrives.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ActivityReport, RepositorySummary};

// ---------------------------------------------------------------------------
// SearchOutcome
// ---------------------------------------------------------------------------

/// Everything one search produces.
///
/// The repository list keeps its typed failure so the caller can tell an
/// unknown user apart from other errors. The activity report never fails; it
/// is empty when the list could not be fetched.
#[derive(Debug)]
pub struct SearchOutcome {
    pub username: String,
    pub repositories: Result<Vec<RepositorySummary>>,
    pub activity: ActivityReport,
}

// ---------------------------------------------------------------------------
// SearchGeneration
// ---------------------------------------------------------------------------

/// Identifies one search started through a [`SearchGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Monotonic search counter shared by everything that starts searches for
/// the same view.
#[derive(Debug, Clone, Default)]
pub struct SearchGeneration {
    current: Arc<AtomicU64>,
}

impl SearchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding every earlier ticket.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` belongs to the most recent search.
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }

    /// Return `value` if `ticket` is still current, otherwise drop it.
    pub fn accept<T>(&self, ticket: &SearchTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                ticket = ticket.0,
                current = self.current.load(Ordering::Acquire),
                "stale search result discarded"
            );
            None
        }
    }
}
