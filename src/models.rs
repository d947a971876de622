use crate::error::StepError;
use crate::period::parse_date;
use chrono::NaiveDate;
use log::debug;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Step count recorded for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyStepEntry {
    pub date: NaiveDate,
    pub steps: u64,
}

impl DailyStepEntry {
    pub fn new(date: NaiveDate, steps: u64) -> Self {
        Self { date, steps }
    }
}

#[derive(Debug, Deserialize)]
pub struct LifetimeResponse {
    pub lifetime: Lifetime,
}

#[derive(Debug, Deserialize)]
pub struct Lifetime {
    pub tracker: LifetimeTotals,
}

#[derive(Debug, Deserialize)]
pub struct LifetimeTotals {
    #[serde(deserialize_with = "deserialize_steps")]
    pub steps: u64,
}

#[derive(Debug, Deserialize)]
pub struct DailyActivityResponse {
    pub summary: ActivitySummary,
}

#[derive(Debug, Deserialize)]
pub struct ActivitySummary {
    #[serde(deserialize_with = "deserialize_steps")]
    pub steps: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStepEntry {
    #[serde(rename = "dateTime")]
    date_time: String,

    value: Value,
}

impl TryFrom<&RawStepEntry> for DailyStepEntry {
    type Error = StepError;

    fn try_from(raw: &RawStepEntry) -> Result<Self, Self::Error> {
        let date = parse_date(&raw.date_time).map_err(|_| StepError::InvalidResponse)?;
        let steps = steps_from_value(&raw.value).ok_or(StepError::InvalidResponse)?;
        Ok(DailyStepEntry { date, steps })
    }
}

/// Step counts arrive either as JSON numbers or as numeric strings.
fn steps_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn deserialize_steps<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    steps_from_value(&raw).ok_or_else(|| D::Error::custom("invalid step count"))
}

pub fn parse_lifetime_steps(data: &str) -> Result<u64, StepError> {
    let parsed: LifetimeResponse =
        serde_json::from_str(data).map_err(|_| StepError::InvalidResponse)?;
    debug!("Parsed lifetime steps");
    Ok(parsed.lifetime.tracker.steps)
}

pub fn parse_daily_steps(data: &str) -> Result<u64, StepError> {
    let parsed: DailyActivityResponse =
        serde_json::from_str(data).map_err(|_| StepError::InvalidResponse)?;
    debug!("Parsed daily activity summary");
    Ok(parsed.summary.steps)
}

/// Parse a time series response such as
/// `{"activities-log-steps": [{"dateTime": "2024-01-01", "value": "1234"}]}`.
///
/// The series is keyed by resource name, so the first array found in the
/// top-level object is taken.
pub fn parse_step_series(data: &str) -> Result<Vec<DailyStepEntry>, StepError> {
    let parsed: Map<String, Value> =
        serde_json::from_str(data).map_err(|_| StepError::InvalidResponse)?;
    let series = parsed
        .into_iter()
        .map(|(_, v)| v)
        .find(Value::is_array)
        .ok_or(StepError::InvalidResponse)?;
    let raw: Vec<RawStepEntry> =
        serde_json::from_value(series).map_err(|_| StepError::InvalidResponse)?;
    let entries = raw
        .iter()
        .map(DailyStepEntry::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Parsed {} daily step entries", entries.len());
    Ok(entries)
}
