use serde::Serialize;

use super::activity::{DailySeries, WeeklyActivityRecord};
use crate::error::FailureKind;

// ---------------------------------------------------------------------------
// PartialDataLoss — A repository whose statistics could not be used
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialDataLoss {
    pub repository: String,
    pub kind: FailureKind,
    pub message: String,
}

// ---------------------------------------------------------------------------
// ActivityReport — Outcome of one aggregation run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityReport {
    pub username: String,
    /// Repositories whose statistics were requested, in list order.
    pub selected: Vec<String>,
    pub series: DailySeries,
    /// Repositories that contributed nothing because their fetch failed.
    pub losses: Vec<PartialDataLoss>,
    /// Repositories whose statistics upstream was still computing.
    pub pending: Vec<String>,
    /// Weeks dropped because their start timestamp could not be dated.
    pub skipped_weeks: usize,
}

impl ActivityReport {
    /// An empty report, used when there is nothing to aggregate.
    pub fn empty(username: &str) -> Self {
        Self {
            username: username.to_string(),
            ..Self::default()
        }
    }

    /// Whether every selected repository contributed.
    pub fn is_complete(&self) -> bool {
        self.losses.is_empty() && self.pending.is_empty() && self.skipped_weeks == 0
    }
}

// ---------------------------------------------------------------------------
// StatsProbe — Diagnostic view of one statistics request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsProbe {
    pub repository: String,
    /// HTTP status, absent when no response was received.
    pub status: Option<u16>,
    pub weeks: usize,
    pub sample_week: Option<WeeklyActivityRecord>,
    pub error: Option<String>,
}
