// In app/src/main.rs

use analytics::{DashboardStats, DimensionStats, StatsEngine, StatsQuery, TradeStats};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use core_types::{Symbol, Trade};
use std::collections::HashMap;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A trading journal analytics dashboard.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Computes and prints the full dashboard report.
    Report {
        /// Start of the date range in YYYY-MM-DD format. Defaults to the
        /// earliest journal entry.
        #[arg(long)]
        start_date: Option<String>,

        /// End of the date range in YYYY-MM-DD format. Defaults to the
        /// latest journal entry.
        #[arg(long)]
        end_date: Option<String>,

        /// Restrict the report to one market (e.g., "EURUSD").
        #[arg(short, long)]
        market: Option<String>,

        /// The year for the monthly view. Defaults to the current year.
        #[arg(short, long)]
        year: Option<i32>,

        /// Path to the journal export, overriding the configured one.
        #[arg(long)]
        journal: Option<String>,

        /// Emit the full report as JSON instead of the text dashboard.
        #[arg(long)]
        json: bool,
    },

    /// Prints the month-by-month table for one year.
    Months {
        /// The year to summarize. Defaults to the current year.
        #[arg(short, long)]
        year: Option<i32>,

        /// Restrict the table to one market.
        #[arg(short, long)]
        market: Option<String>,

        /// Path to the journal export, overriding the configured one.
        #[arg(long)]
        journal: Option<String>,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings().context("failed to load settings")?;

    let level: tracing::Level = settings
        .app
        .log_level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    // Parse command-line arguments.
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            start_date,
            end_date,
            market,
            year,
            journal,
            json,
        } => {
            handle_report(&settings, start_date, end_date, market, year, journal, json)?;
        }
        Commands::Months {
            year,
            market,
            journal,
        } => {
            handle_months(&settings, year, market, journal)?;
        }
    }

    Ok(())
}

// --- "Report" Subcommand Logic ---

fn handle_report(
    settings: &app_config::Settings,
    start_date: Option<String>,
    end_date: Option<String>,
    market: Option<String>,
    year: Option<i32>,
    journal_path: Option<String>,
    json: bool,
) -> Result<()> {
    let trades = load_journal(settings, journal_path)?;
    let query = build_query(&trades, settings, start_date, end_date, market, year)?;

    tracing::info!(
        trades = trades.len(),
        from = %query.start_date,
        to = %query.end_date,
        "Computing dashboard statistics."
    );
    let report = StatsEngine::new().calculate(&trades, &query);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &query, &settings.account.currency);
    }
    Ok(())
}

// --- "Months" Subcommand Logic ---

fn handle_months(
    settings: &app_config::Settings,
    year: Option<i32>,
    market: Option<String>,
    journal_path: Option<String>,
) -> Result<()> {
    let trades = load_journal(settings, journal_path)?;
    let query = build_query(&trades, settings, None, None, market, year)?;
    let report = StatsEngine::new().calculate(&trades, &query);

    print_monthly_table(&report, query.year, &settings.account.currency);
    Ok(())
}

// --- Shared Helpers ---

fn load_journal(
    settings: &app_config::Settings,
    path_override: Option<String>,
) -> Result<Vec<Trade>> {
    let path = path_override.unwrap_or_else(|| settings.journal.path.clone());
    let trades = journal::load_trades(&path)
        .with_context(|| format!("failed to load journal from {path}"))?;
    tracing::info!(count = trades.len(), path, "Journal loaded.");
    Ok(trades)
}

/// Builds the engine query from CLI flags, falling back to the journal's
/// own date span and the current year.
fn build_query(
    trades: &[Trade],
    settings: &app_config::Settings,
    start_date: Option<String>,
    end_date: Option<String>,
    market: Option<String>,
    year: Option<i32>,
) -> Result<StatsQuery> {
    let today = Utc::now().date_naive();
    let start_date = match start_date {
        Some(s) => parse_date(&s)?,
        None => trades.iter().map(|t| t.date).min().unwrap_or(today),
    };
    let end_date = match end_date {
        Some(s) => parse_date(&s)?,
        None => trades.iter().map(|t| t.date).max().unwrap_or(today),
    };
    anyhow::ensure!(
        start_date <= end_date,
        "start date {start_date} is after end date {end_date}"
    );

    Ok(StatsQuery {
        start_date,
        end_date,
        symbol: market.map(Symbol),
        year: year.unwrap_or_else(|| today.year()),
        account_balance: settings.account.balance,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

// --- Report Printing ---

fn print_report(report: &DashboardStats, query: &StatsQuery, currency: &str) {
    println!("\n--- Trading Journal Dashboard ---");
    println!("Range: {} to {}", query.start_date, query.end_date);
    if let Some(symbol) = &query.symbol {
        println!("Market: {symbol}");
    }

    print_subset("Executed trades", &report.overview, currency);

    println!("\nStreaks: current {:+} | best {:+} | worst {:+}",
        report.overview.current_streak,
        report.overview.best_streak,
        report.overview.worst_streak
    );
    println!(
        "Avg days between trades: {:.1}",
        report.overview.avg_days_between_trades
    );

    print_breakdown("By market", &report.overview.by_market);
    print_breakdown("By direction", &report.overview.by_direction);
    print_breakdown("By setup", &report.overview.by_setup);
    print_breakdown("By liquidity", &report.overview.by_liquidity);
    print_breakdown("By MSS", &report.overview.by_mss);
    print_breakdown("By news", &report.overview.by_news);
    print_breakdown("By day of week", &report.overview.by_day_of_week);
    print_breakdown("By time of day", &report.overview.by_time_of_day);

    print_monthly_table(report, query.year, currency);

    if report.non_executed.total_trades > 0 {
        print_subset("Non-executed (planned) trades", &report.non_executed, currency);
    }
}

fn print_subset(title: &str, stats: &TradeStats, currency: &str) {
    println!("\n--- {title} ---");
    println!(
        "Trades: {} | W {} / L {} / BE {}+{}",
        stats.total_trades, stats.wins, stats.losses, stats.be_wins, stats.be_losses
    );
    println!(
        "Win rate: {:.1}% ({:.1}% with BE)",
        stats.win_rate, stats.win_rate_with_be
    );
    println!(
        "P&L: {:.2} {currency} (avg {:.2}, avg {:.2}% of balance)",
        stats.total_profit, stats.avg_profit, stats.avg_pnl_percent
    );
    println!(
        "Max drawdown: {:.2}% | Profit factor: {:.2} | Sharpe: {:.2}",
        stats.max_drawdown_percent, stats.profit_factor, stats.sharpe_ratio
    );
    println!(
        "Consistency: {:.0}/100 ({:.0}/100 with BE)",
        stats.consistency_score, stats.consistency_score_with_be
    );
}

fn print_breakdown(title: &str, buckets: &HashMap<String, DimensionStats>) {
    if buckets.is_empty() {
        return;
    }
    println!("\n{title}:");
    let mut keys: Vec<&String> = buckets.keys().collect();
    keys.sort();
    for key in keys {
        let b = &buckets[key];
        println!(
            "  {:<16} W {} / L {} / BE {}+{} | {:.1}% ({:.1}% with BE)",
            key, b.wins, b.losses, b.be_wins, b.be_losses, b.win_rate, b.win_rate_with_be
        );
    }
}

fn print_monthly_table(report: &DashboardStats, year: i32, currency: &str) {
    println!("\n--- Monthly view ({year}) ---");
    for month in &report.monthly {
        if month.trades == 0 {
            continue;
        }
        println!(
            "  {:<10} {:>3} trades | W {} / L {} / BE {}+{} | {:.1}% | {:.2} {currency}",
            month.month,
            month.trades,
            month.wins,
            month.losses,
            month.be_wins,
            month.be_losses,
            month.win_rate,
            month.profit
        );
    }
    match (&report.best_month, &report.worst_month) {
        (Some(best), Some(worst)) => {
            println!(
                "Best month: {} ({:.2} {currency}) | Worst month: {} ({:.2} {currency})",
                best.month, best.profit, worst.month, worst.profit
            );
        }
        _ => println!("No trades recorded for {year}."),
    }
}
