//! Folding weekly commit records into a daily series.
//!
//! Each week is spread over its seven UTC calendar dates (calendar-day
//! addition, never fixed 86 400-second steps) and counts landing on the same
//! date are summed. The fold only adds, so the result does not depend on the
//! order in which repositories or weeks are fed in.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{DailyCommitPoint, DailySeries, WeeklyActivityRecord};

/// Accumulator for one aggregation run.
#[derive(Debug, Default, Clone)]
pub struct ActivityFold {
    counts: BTreeMap<NaiveDate, u64>,
    skipped_weeks: usize,
}

impl ActivityFold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one week. Zero-count days are still recorded so the dates appear
    /// in the series.
    pub fn add_week(&mut self, record: &WeeklyActivityRecord) {
        match record.dated_days() {
            Some(days) => {
                for (date, count) in days {
                    *self.counts.entry(date).or_insert(0) += u64::from(count);
                }
            }
            None => {
                self.skipped_weeks += 1;
                tracing::warn!(week = record.week, "week start out of range; skipped");
            }
        }
    }

    /// Add every week reported for one repository.
    pub fn add_weeks<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a WeeklyActivityRecord>,
    {
        for record in records {
            self.add_week(record);
        }
    }

    /// Number of weeks dropped because their start could not be dated.
    pub fn skipped_weeks(&self) -> usize {
        self.skipped_weeks
    }

    pub fn finish(self) -> DailySeries {
        let points = self
            .counts
            .into_iter()
            .map(|(date, count)| DailyCommitPoint { date, count })
            .collect();
        DailySeries::from_sorted(points)
    }
}

/// Fold several repositories' weekly records in one call.
pub fn fold_repositories<'a, R>(repositories: R) -> DailySeries
where
    R: IntoIterator<Item = &'a [WeeklyActivityRecord]>,
{
    let mut fold = ActivityFold::new();
    for weeks in repositories {
        fold.add_weeks(weeks);
    }
    fold.finish()
}
