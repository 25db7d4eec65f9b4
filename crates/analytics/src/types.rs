// In crates/analytics/src/types.rs

use chrono::NaiveDate;
use core_types::Symbol;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Bucket label for trades missing a categorical field. Grouping under an
/// explicit bucket keeps such trades visible instead of silently dropped.
pub const UNSPECIFIED: &str = "unspecified";

/// The fixed, ordered time-of-day bands used for the session breakdown.
/// Trades logged without a time, or at 21:00 or later, fall under
/// [`UNSPECIFIED`].
pub const TIME_BANDS: [&str; 4] = ["< 10:00", "10:00 - 11:59", "12:00 - 16:59", "17:00 - 20:59"];

/// Calendar month names in display order for the monthly view.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The immutable query parameters for one aggregation run.
///
/// The view layer's filter state (date range, market, selected year) is
/// passed in explicitly; the engine holds no state of its own.
#[derive(Debug, Clone)]
pub struct StatsQuery {
    /// Start of the date range, inclusive.
    pub start_date: NaiveDate,
    /// End of the date range, inclusive.
    pub end_date: NaiveDate,
    /// Optional market filter; `None` means all markets.
    pub symbol: Option<Symbol>,
    /// The year for the monthly view. Independent of the date range.
    pub year: i32,
    /// Account balance: the drawdown baseline and the basis for deriving
    /// profit on legacy records that lack a recorded profit.
    pub account_balance: Decimal,
}

/// Win/loss/break-even tallies and win rates for one category bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DimensionStats {
    pub wins: u32,
    pub losses: u32,
    pub be_wins: u32,
    pub be_losses: u32,
    /// `wins / (wins + losses)` as a percentage; 0 when no clean trades.
    pub win_rate: f64,
    /// Win rate counting break-even trades by their nominal outcome.
    pub win_rate_with_be: f64,
}

/// One calendar month of the year-scoped monthly view.
#[derive(Debug, Clone, Serialize)]
pub struct MonthStats {
    pub month: String,
    pub trades: u32,
    pub wins: u32,
    pub losses: u32,
    pub be_wins: u32,
    pub be_losses: u32,
    pub profit: Decimal,
    pub win_rate: f64,
    pub win_rate_with_be: f64,
}

/// The full set of derived metrics for one trade subset.
///
/// Computed once for the executed, in-range, market-matching trades and
/// again, with identical shape, for the non-executed subset so planned
/// and taken performance can be compared side by side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeStats {
    pub total_trades: u32,
    pub wins: u32,
    pub losses: u32,
    pub be_wins: u32,
    pub be_losses: u32,
    pub win_rate: f64,
    pub win_rate_with_be: f64,

    pub total_profit: Decimal,
    pub avg_profit: Decimal,
    pub avg_pnl_percent: f64,
    pub max_drawdown_percent: f64,
    pub profit_factor: f64,
    /// 0-100 evenness of monthly profit distribution.
    pub consistency_score: f64,
    pub consistency_score_with_be: f64,
    /// Mean per-trade return over its standard deviation, on the with-BE set.
    pub sharpe_ratio: f64,

    /// Signed run length ending at the most recent trade.
    pub current_streak: i32,
    pub best_streak: i32,
    pub worst_streak: i32,
    pub avg_days_between_trades: f64,

    // Per-dimension breakdowns, keyed by the observed category values.
    pub by_market: HashMap<String, DimensionStats>,
    pub by_setup: HashMap<String, DimensionStats>,
    pub by_liquidity: HashMap<String, DimensionStats>,
    pub by_direction: HashMap<String, DimensionStats>,
    pub by_mss: HashMap<String, DimensionStats>,
    pub by_news: HashMap<String, DimensionStats>,
    pub by_day_of_week: HashMap<String, DimensionStats>,
    pub by_time_of_day: HashMap<String, DimensionStats>,
}

/// Everything the dashboard renders from one aggregation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    /// Executed, in-range, market-matching trades.
    pub overview: TradeStats,
    /// The mirrored statistics for planned-but-not-taken trades.
    pub non_executed: TradeStats,
    /// All twelve months of the selected year, in calendar order.
    pub monthly: Vec<MonthStats>,
    pub best_month: Option<MonthStats>,
    pub worst_month: Option<MonthStats>,
}
