use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use stepdiary::chart::DEFAULT_OUTPUT_DIR;
use stepdiary::client::BASE_URL;
use stepdiary::{Client, PeriodKind, StepDiary, format_thousands, parse_date};

#[derive(Debug, Parser)]
#[command(name = "stepdiary", about = "Step totals and charts from the Fitbit Web API")]
struct Cli {
    /// Bearer access token; falls back to FITBIT_ACCESS_TOKEN env var
    #[arg(long, env = "FITBIT_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// API base URL
    #[arg(long, default_value = BASE_URL)]
    base_url: String,

    /// Reference date YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    /// Directory charts are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print today/week/month/year/lifetime totals and chart each period
    Summary,
    /// Total steps since the account was created
    Lifetime,
    /// Steps for the reference day
    Today,
    /// Steps so far in the current week, month or year
    Period {
        #[arg(value_enum)]
        period: PeriodArg,
    },
    /// Steps over the last N days, today included
    Last {
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Print the daily average (rounded down) instead of the total
        #[arg(long)]
        average: bool,
    },
    /// Render charts for one period, or all of them
    Plot {
        #[arg(value_enum)]
        period: Option<PeriodArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PeriodArg {
    Week,
    Month,
    Year,
}

impl From<PeriodArg> for PeriodKind {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Week => PeriodKind::Week,
            PeriodArg::Month => PeriodKind::Month,
            PeriodArg::Year => PeriodKind::Year,
        }
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| e.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let client = Client::new(cli.token)?.with_base_url(cli.base_url);
    let mut diary = StepDiary::new(client);
    if let Some(date) = cli.date {
        diary = diary.with_today(date);
    }

    match cli.command.unwrap_or(Commands::Summary) {
        Commands::Summary => {
            let summary = diary.summary().await?;
            println!();
            println!("{summary}");
            for path in diary.plot_all(&cli.output_dir).await? {
                println!("Wrote {}", path.display());
            }
        }
        Commands::Lifetime => {
            let steps = diary.lifetime().await?;
            println!("Lifetime: {}", format_thousands(steps));
        }
        Commands::Today => {
            let steps = diary.current_day().await?;
            println!("Today ({}): {}", diary.today(), format_thousands(steps));
        }
        Commands::Period { period } => {
            let kind = PeriodKind::from(period);
            let agg = diary.period_series(kind).await?;
            println!(
                "This {} ({}): {}",
                kind,
                agg.range,
                format_thousands(agg.total)
            );
        }
        Commands::Last { days, average } => {
            if average {
                let avg = diary.last_n_days_avg(days).await?;
                println!("Last {} days average: {}", days, format_thousands(avg));
            } else {
                let total = diary.last_n_days(days).await?;
                println!("Last {} days: {}", days, format_thousands(total));
            }
        }
        Commands::Plot { period } => {
            let paths = match period {
                Some(p) => vec![diary.plot_period(p.into(), &cli.output_dir).await?],
                None => diary.plot_all(&cli.output_dir).await?,
            };
            for path in paths {
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
