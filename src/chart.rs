//! Line charts of daily step series, rendered to SVG.

use crate::error::StepError;
use crate::models::DailyStepEntry;
use crate::period::{DateRange, PeriodKind};
use crate::report::format_thousands;
use chrono::Days;
use log::info;
use plotters::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "graphs";
const WIDTH: u32 = 1000;
const HEIGHT: u32 = 500;

impl PeriodKind {
    pub fn chart_title(self) -> &'static str {
        match self {
            PeriodKind::Week => "Current Week",
            PeriodKind::Month => "Current Month",
            PeriodKind::Year => "Current Year",
        }
    }

    pub fn chart_file_name(self) -> &'static str {
        match self {
            PeriodKind::Week => "currentweek.svg",
            PeriodKind::Month => "currentmonth.svg",
            PeriodKind::Year => "currentyear.svg",
        }
    }

    /// Path of this period's chart inside `dir`.
    pub fn chart_path(self, dir: &Path) -> PathBuf {
        dir.join(self.chart_file_name())
    }
}

/// Render `entries` as a date-indexed line chart spanning `range`.
pub fn render_line_chart(
    path: &Path,
    title: &str,
    range: DateRange,
    entries: &[DailyStepEntry],
) -> Result<(), StepError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // a single-day range still needs a non-empty axis
    let x_end = range
        .end()
        .checked_add_days(Days::new(1))
        .unwrap_or(range.end());
    let max_steps = entries.iter().map(|e| e.steps).max().unwrap_or(0);
    let y_end = (max_steps + max_steps / 10).max(10);

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(range.start()..x_end, 0u64..y_end)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|d| d.format("%b %d").to_string())
        .y_label_formatter(&|v| format_thousands(*v))
        .y_desc("Steps")
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(LineSeries::new(
            entries.iter().map(|e| (e.date, e.steps)),
            &BLUE,
        ))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    info!("Rendered {} chart to {}", title, path.display());
    Ok(())
}

/// Render the chart for one period into `dir` under its fixed file name.
pub fn render_period_chart(
    dir: &Path,
    kind: PeriodKind,
    range: DateRange,
    entries: &[DailyStepEntry],
) -> Result<PathBuf, StepError> {
    let path = kind.chart_path(dir);
    render_line_chart(&path, kind.chart_title(), range, entries)?;
    Ok(path)
}

fn chart_error<E: fmt::Display>(err: E) -> StepError {
    StepError::Chart(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::{month_of, week_of};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn file_names_per_period() {
        let dir = Path::new(DEFAULT_OUTPUT_DIR);
        assert_eq!(
            PeriodKind::Week.chart_path(dir),
            Path::new("graphs/currentweek.svg")
        );
        assert_eq!(PeriodKind::Month.chart_file_name(), "currentmonth.svg");
        assert_eq!(PeriodKind::Year.chart_title(), "Current Year");
    }

    #[test]
    fn writes_svg_chart() {
        let tmp = tempfile::tempdir().unwrap();
        let range = week_of(d(2024, 4, 3)).unwrap();
        let entries = vec![
            DailyStepEntry::new(d(2024, 4, 1), 5400),
            DailyStepEntry::new(d(2024, 4, 2), 12_034),
            DailyStepEntry::new(d(2024, 4, 3), 8000),
        ];
        let path = render_period_chart(tmp.path(), PeriodKind::Week, range, &entries).unwrap();
        assert_eq!(path, tmp.path().join("currentweek.svg"));
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Current Week"));
    }

    #[test]
    fn empty_series_still_renders() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/empty.svg");
        let range = month_of(d(2024, 2, 1)).unwrap();
        render_line_chart(&path, "Empty", range, &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn single_day_range_renders() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("day.svg");
        let range = DateRange::new(d(2024, 4, 1), d(2024, 4, 1)).unwrap();
        let entries = [DailyStepEntry::new(d(2024, 4, 1), 321)];
        render_line_chart(&path, "One day", range, &entries).unwrap();
        assert!(path.exists());
    }
}
