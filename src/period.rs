//! Calendar period arithmetic: week, month and year boundaries and rolling
//! N-day windows ending on a reference date.

use crate::error::StepError;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use std::fmt;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Closed date interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, StepError> {
        if start > end {
            return Err(StepError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, both ends included.
    pub fn day_count(&self) -> u64 {
        // start <= end, so the difference is never negative
        (self.end - self.start).num_days() as u64 + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Clamp the end of the range to `today`.
    ///
    /// Returns `None` when the whole range lies after `today`.
    pub fn up_to(&self, today: NaiveDate) -> Option<Self> {
        if today < self.start {
            return None;
        }
        Some(Self {
            start: self.start,
            end: self.end.min(today),
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    Week,
    Month,
    Year,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 3] = [PeriodKind::Week, PeriodKind::Month, PeriodKind::Year];

    pub fn range_of(self, date: NaiveDate) -> Result<DateRange, StepError> {
        match self {
            PeriodKind::Week => week_of(date),
            PeriodKind::Month => month_of(date),
            PeriodKind::Year => year_of(date),
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self {
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::Year => "year",
        };
        f.write_str(v)
    }
}

/// Parse a `YYYY-MM-DD` date. A trailing time component
/// (`YYYY-MM-DDTHH:MM:SS`) is accepted and dropped.
pub fn parse_date(raw: &str) -> Result<NaiveDate, StepError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(date);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|_| StepError::InvalidDate(raw.to_string()))
}

/// Monday to Sunday week containing `date`.
pub fn week_of(date: NaiveDate) -> Result<DateRange, StepError> {
    let before = u64::from(date.weekday().num_days_from_monday());
    let start = date
        .checked_sub_days(Days::new(before))
        .ok_or_else(|| out_of_range(date))?;
    let end = start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| out_of_range(date))?;
    Ok(DateRange { start, end })
}

/// First to last day of the calendar month containing `date`.
pub fn month_of(date: NaiveDate) -> Result<DateRange, StepError> {
    let (year, month) = (date.year(), date.month());
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| out_of_range(date))?;
    let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .ok_or_else(|| out_of_range(date))?;
    Ok(DateRange { start, end })
}

/// January 1st to December 31st of the year containing `date`.
pub fn year_of(date: NaiveDate) -> Result<DateRange, StepError> {
    let year = date.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| out_of_range(date))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| out_of_range(date))?;
    Ok(DateRange { start, end })
}

/// The `n` days ending on `today`, today included.
pub fn last_n_days(today: NaiveDate, n: u32) -> Result<DateRange, StepError> {
    if n == 0 {
        return Err(StepError::InvalidParameter("number of days must be at least 1"));
    }
    let start = today
        .checked_sub_days(Days::new(u64::from(n - 1)))
        .ok_or_else(|| out_of_range(today))?;
    Ok(DateRange { start, end: today })
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn out_of_range(date: NaiveDate) -> StepError {
    StepError::InvalidDate(format!("{} has no representable period", date))
}
