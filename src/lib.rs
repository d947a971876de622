//! Rust client for the step-count endpoints of the Fitbit Web API.
//! Computes calendar period boundaries, sums daily step entries into period
//! totals and averages, and renders console summaries and line charts.

pub mod aggregate;
pub mod chart;
pub mod client;
pub mod diary;
pub mod error;
pub mod models;
pub mod period;
pub mod report;

pub use aggregate::Aggregate;
pub use client::Client;
pub use diary::StepDiary;
pub use error::{ApiError, StepError};
pub use models::DailyStepEntry;
pub use period::{DateRange, PeriodKind, last_n_days, month_of, parse_date, week_of, year_of};
pub use report::{Summary, format_thousands};
