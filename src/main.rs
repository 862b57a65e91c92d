use analytics::filter::distinct_symbols;
use analytics::{AnalyticsEngine, FilterCriteria, WinRateTrend, YearMonth, classify, filter_trades, summarize};
use anyhow::Context;
use chrono::{Datelike, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use configuration::{Config, FilterDefaults, load_config};
use core_types::{DateRange, TradeRecord};
use journal::TradeJournal;
use serde::Serialize;
use std::path::PathBuf;

mod logging;
mod render;

/// The main entry point for the Tradelens journal dashboard.
fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    // Held until exit so the file appender flushes.
    let _log_guard = logging::init(&config.logging).context("Failed to initialize logging")?;
    // Loading runs before the subscriber exists, so the fallback is reported here.
    if !cli.config.exists() {
        tracing::info!(path = %cli.config.display(), "Config file not found, using defaults.");
    }

    let journal_path = cli.journal.clone().unwrap_or_else(|| config.journal.path.clone());
    let records = TradeJournal::open(journal_path)
        .load()
        .context("Failed to load the trade journal")?;

    let now = chrono::Local::now().naive_local();
    tracing::debug!(%now, records = records.len(), "Journal ready.");
    run(&cli, &config, &records, now)
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance analytics for a personal trading journal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Path to the journal file, overriding `[journal] path`.
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    /// Print the result as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full dashboard.
    Report(FilterArgs),
    /// Headline metrics and the most recent trades.
    Summary(FilterArgs),
    /// The PnL calendar for one month.
    Calendar(CalendarArgs),
    /// A histogram of per-trade PnL.
    Distribution(DistributionArgs),
    /// Cumulative win rate after each trade.
    Trend(FilterArgs),
    /// List every symbol in the journal.
    Symbols,
}

/// Filters shared by every analytics command; unset flags fall back to `[filters]`.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Reporting period: all, today, week, month, quarter or year.
    #[arg(long)]
    range: Option<DateRange>,

    /// Trade direction: all, buy or sell.
    #[arg(long = "type")]
    trade_type: Option<String>,

    /// Exact symbol, or "all".
    #[arg(long)]
    symbol: Option<String>,
}

#[derive(Args, Debug)]
struct CalendarArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// 1 to 12; defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
}

#[derive(Args, Debug)]
struct DistributionArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Number of buckets, overriding `[dashboard] histogram_bins`.
    #[arg(long)]
    bins: Option<usize>,
}

impl FilterArgs {
    fn criteria(&self, defaults: &FilterDefaults) -> anyhow::Result<FilterCriteria> {
        let range = self.range.unwrap_or(defaults.date_range);
        let trade_type = self.trade_type.as_deref().unwrap_or(&defaults.trade_type);
        let symbol = self.symbol.as_deref().unwrap_or(&defaults.symbol);
        FilterCriteria::parse(range, trade_type, symbol).context("Invalid filter")
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

#[derive(Serialize)]
struct SummaryOutput {
    summary: analytics::PerformanceSummary,
    win_loss: analytics::WinLossBreakdown,
    recent_trades: Vec<TradeRecord>,
}

fn run(cli: &Cli, config: &Config, records: &[TradeRecord], now: NaiveDateTime) -> anyhow::Result<()> {
    let defaults = &config.filters;
    let dashboard = &config.dashboard;

    match &cli.command {
        Commands::Report(args) => {
            let engine = AnalyticsEngine::new(dashboard.clone());
            let report = engine.build_report(records, &args.criteria(defaults)?, now)?;
            if cli.json {
                print_json(&report)?;
            } else {
                render::print_report(&report);
            }
        }
        Commands::Summary(args) => {
            let trades = filter_trades(records, &args.criteria(defaults)?, now);
            let output = SummaryOutput {
                summary: summarize(&trades),
                win_loss: classify(&trades),
                recent_trades: analytics::activity::recent_trades(&trades, dashboard.recent_activity),
            };
            if cli.json {
                print_json(&output)?;
            } else {
                println!("{}", render::summary_table(&output.summary, &output.win_loss));
                println!("{}", render::trades_table(&output.recent_trades));
            }
        }
        Commands::Calendar(args) => {
            let trades = filter_trades(records, &args.filters.criteria(defaults)?, now);
            let today = now.date();
            let period = YearMonth::new(
                args.year.unwrap_or_else(|| today.year()),
                args.month.unwrap_or_else(|| today.month()),
            )?;
            let calendar = analytics::map_to_calendar_days(&trades, period.year, period.month)?;
            if cli.json {
                print_json(&calendar)?;
            } else {
                println!("{}", render::calendar_table(&calendar));
                println!("{}", render::calendar_footer(&calendar));
            }
        }
        Commands::Distribution(args) => {
            let trades = filter_trades(records, &args.filters.criteria(defaults)?, now);
            let histogram = analytics::histogram(&trades, args.bins.unwrap_or(dashboard.histogram_bins))?;
            if cli.json {
                print_json(&histogram)?;
            } else {
                println!("{}", render::histogram_table(&histogram));
            }
        }
        Commands::Trend(args) => {
            let trades = filter_trades(records, &args.criteria(defaults)?, now);
            let points: Vec<_> = WinRateTrend::new(&trades).collect();
            if cli.json {
                print_json(&points)?;
            } else {
                println!("{}", render::trend_table(&points));
            }
        }
        Commands::Symbols => {
            let symbols = distinct_symbols(records);
            if cli.json {
                print_json(&symbols)?;
            } else {
                println!("{}", render::symbols_table(&symbols));
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
