//! Display policy for activity charts.
//!
//! Nothing here renders; these helpers reproduce the dashboard's choices
//! (window length, color tiers, banner wording) so any front end or test
//! harness applies the same rules.

use serde::Serialize;

use crate::config::RECENT_WINDOW;
use crate::error::ActivityError;
use crate::models::{DailyCommitPoint, DailySeries};

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";
pub const NO_ACTIVITY_MESSAGE: &str =
    "No contribution data available yet. This may be due to API limits or lack of public commit history.";

// ---------------------------------------------------------------------------
// ActivityLevel
// ---------------------------------------------------------------------------

/// Color tier of one day's commit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// 0 commits
    None,
    /// 1 to 2 commits
    Low,
    /// 3 to 5 commits
    Medium,
    /// more than 5 commits
    High,
}

impl ActivityLevel {
    pub fn from_count(count: u64) -> Self {
        match count {
            0 => ActivityLevel::None,
            1..=2 => ActivityLevel::Low,
            3..=5 => ActivityLevel::Medium,
            _ => ActivityLevel::High,
        }
    }

    /// Hex fill color for the tier.
    pub fn color(self) -> &'static str {
        match self {
            ActivityLevel::None => "#ebedf0",
            ActivityLevel::Low => "#9be9a8",
            ActivityLevel::Medium => "#40c463",
            ActivityLevel::High => "#216e39",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// One bar of the recent-activity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartBar {
    #[serde(flatten)]
    pub point: DailyCommitPoint,
    pub level: ActivityLevel,
    pub color: &'static str,
}

/// The trailing `window` entries of `series`.
///
/// This counts entries, not calendar days: a sparse series yields bars
/// spanning more than `window` days.
pub fn recent(series: &DailySeries, window: usize) -> &[DailyCommitPoint] {
    series.tail(window)
}

/// Bars for the recent-activity chart over the default window.
pub fn bar_chart(series: &DailySeries) -> Vec<ChartBar> {
    bar_chart_with_window(series, RECENT_WINDOW)
}

pub fn bar_chart_with_window(series: &DailySeries, window: usize) -> Vec<ChartBar> {
    recent(series, window)
        .iter()
        .map(|&point| {
            let level = ActivityLevel::from_count(point.count);
            ChartBar {
                point,
                level,
                color: level.color(),
            }
        })
        .collect()
}

/// Banner text for a failed repository listing.
pub fn error_banner(err: &ActivityError) -> &'static str {
    if err.is_not_found() {
        USER_NOT_FOUND_MESSAGE
    } else {
        FETCH_ERROR_MESSAGE
    }
}
