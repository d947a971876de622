//! Summing daily step entries into period totals and averages.
//!
//! Days the API did not return are simply absent from the sum; nothing is
//! padded with zeroes.

use crate::error::StepError;
use crate::models::DailyStepEntry;
use crate::period::DateRange;

/// Total steps over the given entries.
pub fn total(entries: &[DailyStepEntry]) -> u64 {
    entries.iter().map(|e| e.steps).sum()
}

/// Average per day, rounded down.
pub fn average(sum: u64, days: u64) -> Result<u64, StepError> {
    if days == 0 {
        return Err(StepError::InvalidParameter("cannot average over zero days"));
    }
    Ok(sum / days)
}

/// Steps summed over a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub range: DateRange,
    pub total: u64,
    pub entries: Vec<DailyStepEntry>,
}

impl Aggregate {
    /// Sum the entries that fall inside `range`.
    pub fn over(range: DateRange, entries: Vec<DailyStepEntry>) -> Self {
        let entries: Vec<_> = entries
            .into_iter()
            .filter(|e| range.contains(e.date))
            .collect();
        Self {
            range,
            total: total(&entries),
            entries,
        }
    }

    /// Average over every day of the range, including days with no entry.
    pub fn average(&self) -> u64 {
        // day_count() is at least 1
        self.total / self.range.day_count()
    }
}
