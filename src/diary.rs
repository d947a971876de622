use crate::aggregate::{self, Aggregate};
use crate::chart::render_period_chart;
use crate::client::Client;
use crate::error::StepError;
use crate::models::DailyStepEntry;
use crate::period::{DateRange, PeriodKind, last_n_days};
use crate::report::Summary;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Step queries relative to a fixed reference day.
///
/// Calendar period totals run from the start of the period up to and
/// including `today`; the rest of the period has no data yet.
#[derive(Debug, Clone)]
pub struct StepDiary {
    client: Client,
    today: NaiveDate,
}

impl StepDiary {
    /// Diary anchored on the local calendar date.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            today: Local::now().date_naive(),
        }
    }

    /// Override the reference day.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        debug!("Step diary reference date set to {}", today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Window covered by the current `kind` period so far.
    pub fn period_range(&self, kind: PeriodKind) -> Result<DateRange, StepError> {
        let full = kind.range_of(self.today)?;
        // today always lies inside its own period
        full.up_to(self.today)
            .ok_or(StepError::InvalidParameter("reference date precedes its period"))
    }

    pub async fn lifetime(&self) -> Result<u64, StepError> {
        self.client.fetch_lifetime_steps().await
    }

    pub async fn current_day(&self) -> Result<u64, StepError> {
        self.client.fetch_daily_summary(self.today).await
    }

    pub async fn period_series(&self, kind: PeriodKind) -> Result<Aggregate, StepError> {
        let range = self.period_range(kind)?;
        self.aggregate(range).await
    }

    pub async fn current_week(&self) -> Result<u64, StepError> {
        Ok(self.period_series(PeriodKind::Week).await?.total)
    }

    pub async fn current_month(&self) -> Result<u64, StepError> {
        Ok(self.period_series(PeriodKind::Month).await?.total)
    }

    pub async fn current_year(&self) -> Result<u64, StepError> {
        Ok(self.period_series(PeriodKind::Year).await?.total)
    }

    /// Total steps over the `n` days ending today.
    pub async fn last_n_days(&self, n: u32) -> Result<u64, StepError> {
        let range = last_n_days(self.today, n)?;
        Ok(self.aggregate(range).await?.total)
    }

    pub async fn last_7_days(&self) -> Result<u64, StepError> {
        self.last_n_days(7).await
    }

    pub async fn last_28_days(&self) -> Result<u64, StepError> {
        self.last_n_days(28).await
    }

    /// Average daily steps over the last `n` days, rounded down.
    pub async fn last_n_days_avg(&self, n: u32) -> Result<u64, StepError> {
        let sum = self.last_n_days(n).await?;
        aggregate::average(sum, u64::from(n))
    }

    pub async fn last_7_days_avg(&self) -> Result<u64, StepError> {
        self.last_n_days_avg(7).await
    }

    pub async fn last_28_days_avg(&self) -> Result<u64, StepError> {
        self.last_n_days_avg(28).await
    }

    /// Collect today, this week, month, year and lifetime totals.
    pub async fn summary(&self) -> Result<Summary, StepError> {
        Ok(Summary {
            today: self.current_day().await?,
            week: self.current_week().await?,
            month: self.current_month().await?,
            year: self.current_year().await?,
            lifetime: self.lifetime().await?,
        })
    }

    /// Fetch the current period's series and chart it into `dir`.
    pub async fn plot_period(&self, kind: PeriodKind, dir: &Path) -> Result<PathBuf, StepError> {
        let agg = self.period_series(kind).await?;
        render_period_chart(dir, kind, agg.range, &agg.entries)
    }

    /// Chart the current week, month and year.
    pub async fn plot_all(&self, dir: &Path) -> Result<Vec<PathBuf>, StepError> {
        let mut paths = Vec::with_capacity(PeriodKind::ALL.len());
        for kind in PeriodKind::ALL {
            paths.push(self.plot_period(kind, dir).await?);
        }
        Ok(paths)
    }

    async fn aggregate(&self, range: DateRange) -> Result<Aggregate, StepError> {
        let entries: Vec<DailyStepEntry> = self
            .client
            .fetch_step_series(range.start(), range.end())
            .await?;
        let agg = Aggregate::over(range, entries);
        info!(
            "{} steps over {} ({} entries)",
            agg.total,
            range,
            agg.entries.len()
        );
        Ok(agg)
    }
}
