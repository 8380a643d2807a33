use std::ops::Index;

use chrono::{DateTime, Days, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WeeklyActivityRecord — Upstream per-repository, per-week commit counts
// ---------------------------------------------------------------------------

/// One week of commit counts as reported by the statistics endpoint.
///
/// `days` must hold exactly seven entries; any other length fails
/// deserialization. `total` is carried through as reported and never
/// checked against the day counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyActivityRecord {
    /// Week start, unix seconds (UTC).
    pub week: i64,
    pub total: u32,
    pub days: [u32; 7],
}

impl WeeklyActivityRecord {
    /// UTC calendar date the week starts on, or `None` when the timestamp is
    /// outside chrono's representable range.
    pub fn start_date(&self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.week, 0).map(|dt| dt.date_naive())
    }

    /// `(date, count)` for each of the seven days, computed by calendar-day
    /// addition from [`start_date`](Self::start_date).
    pub fn dated_days(&self) -> Option<Vec<(NaiveDate, u32)>> {
        let start = self.start_date()?;
        self.days
            .iter()
            .enumerate()
            .map(|(offset, &count)| {
                start
                    .checked_add_days(Days::new(offset as u64))
                    .map(|date| (date, count))
            })
            .collect()
    }

    /// Sum of the seven day counts.
    pub fn day_sum(&self) -> u64 {
        self.days.iter().map(|&d| u64::from(d)).sum()
    }
}

// ---------------------------------------------------------------------------
// DailyCommitPoint — One date of the folded series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyCommitPoint {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub count: u64,
}

// ---------------------------------------------------------------------------
// DailySeries — Date-ordered output of the fold
// ---------------------------------------------------------------------------

/// Commit counts per day, strictly ascending by date with no duplicates.
///
/// The series is not guaranteed to be contiguous: a date only appears if some
/// fetched week covered it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailySeries(Vec<DailyCommitPoint>);

impl DailySeries {
    /// Construct from points already in strictly ascending date order.
    ///
    /// Only the fold builds series; this stays crate-private so the ordering
    /// invariant cannot be broken from outside.
    pub(crate) fn from_sorted(points: Vec<DailyCommitPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].date < w[1].date));
        Self(points)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn points(&self) -> &[DailyCommitPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyCommitPoint> {
        self.0.iter()
    }

    /// Count recorded for `date`, if the series covers it.
    pub fn count_on(&self, date: NaiveDate) -> Option<u64> {
        self.0
            .binary_search_by(|p| p.date.cmp(&date))
            .ok()
            .map(|i| self.0[i].count)
    }

    /// Sum of every point.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|p| p.count).sum()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.0.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.0.last().map(|p| p.date)
    }

    /// The trailing `n` points (all of them when the series is shorter).
    pub fn tail(&self, n: usize) -> &[DailyCommitPoint] {
        let start = self.0.len().saturating_sub(n);
        &self.0[start..]
    }

    pub fn into_points(self) -> Vec<DailyCommitPoint> {
        self.0
    }
}

impl Index<usize> for DailySeries {
    type Output = DailyCommitPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a DailySeries {
    type Item = &'a DailyCommitPoint;
    type IntoIter = std::slice::Iter<'a, DailyCommitPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
