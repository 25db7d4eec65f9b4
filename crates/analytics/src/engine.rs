// In crates/analytics/src/engine.rs

use crate::normalize::{category, effective_profit};
use crate::types::{
    DashboardStats, DimensionStats, MonthStats, StatsQuery, TradeStats, MONTH_NAMES, TIME_BANDS,
    UNSPECIFIED,
};
use chrono::{Datelike, NaiveTime, Timelike};
use core_types::Trade;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// The engine responsible for computing dashboard statistics from the
/// journal's trade records.
///
/// A stateless, synchronous transform: it owns no trade data and performs
/// no I/O, so every invocation is independent and cannot fail. It is
/// re-run whenever the trade set or the query (date range, market, year)
/// changes.
#[derive(Default)]
pub struct StatsEngine;

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the full dashboard report for one query.
    pub fn calculate(&self, trades: &[Trade], query: &StatsQuery) -> DashboardStats {
        let matches_market = |t: &Trade| match &query.symbol {
            Some(symbol) => &t.symbol == symbol,
            None => true,
        };
        let in_range = |t: &Trade| t.date >= query.start_date && t.date <= query.end_date;

        // Executed trades drive the primary statistics; non-executed trades
        // get the same statistics over their own subset so planned and
        // taken performance can be compared.
        let executed: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.is_executed() && in_range(t) && matches_market(t))
            .collect();
        let non_executed: Vec<&Trade> = trades
            .iter()
            .filter(|t| !t.is_executed() && in_range(t) && matches_market(t))
            .collect();

        let overview = Self::subset_stats(&executed, query.account_balance);
        let non_executed = Self::subset_stats(&non_executed, query.account_balance);

        // The monthly view ignores the date range: it covers the selected
        // year so the dashboard's year-at-a-glance stays stable while the
        // user narrows the range.
        let yearly: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.is_executed() && matches_market(t) && t.date.year() == query.year)
            .collect();
        let monthly = Self::monthly_stats(&yearly, query.account_balance);

        let traded_months = monthly.iter().filter(|m| m.trades > 0);
        let best_month = traded_months.clone().max_by_key(|m| m.profit).cloned();
        let worst_month = traded_months.clone().min_by_key(|m| m.profit).cloned();

        DashboardStats {
            overview,
            non_executed,
            monthly,
            best_month,
            worst_month,
        }
    }

    /// Computes the full metric set over one trade subset.
    fn subset_stats(trades: &[&Trade], account_balance: Decimal) -> TradeStats {
        let mut stats = TradeStats::default();
        if trades.is_empty() {
            return stats;
        }

        // Drawdown, streaks, and trade spacing all depend on chronology.
        let mut ordered: Vec<&Trade> = trades.to_vec();
        ordered.sort_by_key(|t| (t.date, t.time));

        // 1. Win/loss/break-even classification.
        stats.total_trades = ordered.len() as u32;
        for trade in &ordered {
            if trade.break_even {
                match trade.outcome {
                    core_types::Outcome::Win => stats.be_wins += 1,
                    core_types::Outcome::Lose => stats.be_losses += 1,
                }
            } else if trade.is_clean_win() {
                stats.wins += 1;
            } else {
                stats.losses += 1;
            }
        }
        (stats.win_rate, stats.win_rate_with_be) =
            win_rates(stats.wins, stats.losses, stats.be_wins, stats.be_losses);

        // 2. Profit and P&L.
        let profits: Vec<Decimal> = ordered
            .iter()
            .map(|t| effective_profit(t, account_balance))
            .collect();
        stats.total_profit = profits.iter().sum();
        stats.avg_profit = stats.total_profit / Decimal::from(stats.total_trades);
        stats.avg_pnl_percent = ordered
            .iter()
            .map(|t| t.pnl_percent.unwrap_or(0.0))
            .sum::<f64>()
            / ordered.len() as f64;

        // 3. Max drawdown over the running equity curve.
        let mut equity = account_balance;
        let mut peak = account_balance;
        let mut max_drawdown = 0.0_f64;
        for profit in &profits {
            equity += *profit;
            peak = peak.max(equity);
            if peak > dec!(0) {
                let drawdown = ((peak - equity) / peak).to_f64().unwrap_or(0.0);
                max_drawdown = max_drawdown.max(drawdown);
            }
        }
        stats.max_drawdown_percent = max_drawdown * 100.0;

        // 4. Profit factor. No losses to divide by yields 0, not infinity.
        let gross_profit: Decimal = profits.iter().filter(|p| **p > dec!(0)).sum();
        let gross_loss: Decimal = profits
            .iter()
            .filter(|p| **p < dec!(0))
            .sum::<Decimal>()
            .abs();
        stats.profit_factor = if gross_loss > dec!(0) {
            (gross_profit / gross_loss).to_f64().unwrap_or(0.0)
        } else {
            0.0
        };

        // 5. Consistency of monthly profits, with and without break-even
        // trades' contribution.
        stats.consistency_score = consistency_score(&ordered, account_balance, false);
        stats.consistency_score_with_be = consistency_score(&ordered, account_balance, true);

        // 6. Sharpe-like ratio on the with-BE set: break-even trades sit
        // near zero return but still dampen or widen volatility.
        stats.sharpe_ratio = sharpe_ratio(&ordered);

        // 7. Streaks. Break-even trades neither extend nor break a run.
        let mut streak = 0_i32;
        let mut best = 0_i32;
        let mut worst = 0_i32;
        for trade in &ordered {
            if trade.break_even {
                continue;
            }
            if trade.is_clean_win() {
                streak = if streak > 0 { streak + 1 } else { 1 };
            } else {
                streak = if streak < 0 { streak - 1 } else { -1 };
            }
            best = best.max(streak);
            worst = worst.min(streak);
        }
        stats.current_streak = streak;
        stats.best_streak = best;
        stats.worst_streak = worst;

        // 8. Average days between consecutive trades.
        if ordered.len() > 1 {
            let total_gap_days: i64 = ordered
                .windows(2)
                .map(|w| (w[1].date - w[0].date).num_days())
                .sum();
            stats.avg_days_between_trades = total_gap_days as f64 / (ordered.len() - 1) as f64;
        }

        // 9. Dimension breakdowns.
        for trade in &ordered {
            tally(&mut stats.by_market, trade.symbol.0.clone(), trade);
            tally(&mut stats.by_setup, category(trade.setup.as_ref()), trade);
            tally(
                &mut stats.by_liquidity,
                category(trade.liquidity.as_ref()),
                trade,
            );
            tally(&mut stats.by_direction, trade.direction.to_string(), trade);
            tally(&mut stats.by_mss, category(trade.mss.as_ref()), trade);
            let news = if trade.news { "news" } else { "no news" };
            tally(&mut stats.by_news, news.to_string(), trade);
            tally(
                &mut stats.by_day_of_week,
                trade.date.format("%A").to_string(),
                trade,
            );
            tally(
                &mut stats.by_time_of_day,
                time_band(trade.time).to_string(),
                trade,
            );
        }
        for map in [
            &mut stats.by_market,
            &mut stats.by_setup,
            &mut stats.by_liquidity,
            &mut stats.by_direction,
            &mut stats.by_mss,
            &mut stats.by_news,
            &mut stats.by_day_of_week,
            &mut stats.by_time_of_day,
        ] {
            for bucket in map.values_mut() {
                (bucket.win_rate, bucket.win_rate_with_be) =
                    win_rates(bucket.wins, bucket.losses, bucket.be_wins, bucket.be_losses);
            }
        }

        stats
    }

    /// Builds the twelve-month table for the year-scoped view. Every month
    /// is present, in calendar order, traded or not.
    fn monthly_stats(trades: &[&Trade], account_balance: Decimal) -> Vec<MonthStats> {
        let mut monthly: Vec<MonthStats> = MONTH_NAMES
            .iter()
            .map(|name| MonthStats {
                month: name.to_string(),
                trades: 0,
                wins: 0,
                losses: 0,
                be_wins: 0,
                be_losses: 0,
                profit: dec!(0),
                win_rate: 0.0,
                win_rate_with_be: 0.0,
            })
            .collect();

        for trade in trades {
            let entry = &mut monthly[trade.date.month0() as usize];
            entry.trades += 1;
            entry.profit += effective_profit(trade, account_balance);
            if trade.break_even {
                match trade.outcome {
                    core_types::Outcome::Win => entry.be_wins += 1,
                    core_types::Outcome::Lose => entry.be_losses += 1,
                }
            } else if trade.is_clean_win() {
                entry.wins += 1;
            } else {
                entry.losses += 1;
            }
        }

        for entry in &mut monthly {
            (entry.win_rate, entry.win_rate_with_be) =
                win_rates(entry.wins, entry.losses, entry.be_wins, entry.be_losses);
        }

        monthly
    }
}

/// Plain and BE-inclusive win rates, both guarded against an empty
/// denominator.
fn win_rates(wins: u32, losses: u32, be_wins: u32, be_losses: u32) -> (f64, f64) {
    let clean_total = wins + losses;
    let win_rate = if clean_total > 0 {
        wins as f64 / clean_total as f64 * 100.0
    } else {
        0.0
    };

    let full_total = wins + losses + be_wins + be_losses;
    let win_rate_with_be = if full_total > 0 {
        (wins + be_wins) as f64 / full_total as f64 * 100.0
    } else {
        0.0
    };

    (win_rate, win_rate_with_be)
}

/// Maps an execution time to its fixed session band.
fn time_band(time: Option<NaiveTime>) -> &'static str {
    let Some(time) = time else {
        return UNSPECIFIED;
    };
    match time.hour() {
        0..=9 => TIME_BANDS[0],
        10..=11 => TIME_BANDS[1],
        12..=16 => TIME_BANDS[2],
        17..=20 => TIME_BANDS[3],
        _ => UNSPECIFIED,
    }
}

/// How evenly profit is spread across the traded months, 0-100.
///
/// `100 - (stddev / mean) * 100`, clamped. A losing or break-even overall
/// mean scores 0; a single traded month has zero deviation and scores 100.
fn consistency_score(trades: &[&Trade], account_balance: Decimal, include_be: bool) -> f64 {
    let mut monthly: HashMap<(i32, u32), Decimal> = HashMap::new();
    for trade in trades {
        if !include_be && trade.break_even {
            continue;
        }
        *monthly
            .entry((trade.date.year(), trade.date.month()))
            .or_default() += effective_profit(trade, account_balance);
    }
    if monthly.is_empty() {
        return 0.0;
    }

    let profits: Vec<f64> = monthly
        .values()
        .map(|p| p.to_f64().unwrap_or(0.0))
        .collect();
    let mean = profits.iter().sum::<f64>() / profits.len() as f64;
    if mean <= 0.0 {
        return 0.0;
    }

    let variance =
        profits.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / profits.len() as f64;
    let score = 100.0 - (variance.sqrt() / mean) * 100.0;
    score.clamp(0.0, 100.0)
}

/// Mean per-trade return over its population standard deviation.
fn sharpe_ratio(trades: &[&Trade]) -> f64 {
    if trades.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = trades.iter().map(|t| t.pnl_percent.unwrap_or(0.0)).collect();
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev > 0.0 { mean / std_dev } else { 0.0 }
}

/// Adds one trade to a breakdown bucket. Win rates are filled in once the
/// whole subset has been tallied.
fn tally(map: &mut HashMap<String, DimensionStats>, key: String, trade: &Trade) {
    let bucket = map.entry(key).or_default();
    if trade.break_even {
        match trade.outcome {
            core_types::Outcome::Win => bucket.be_wins += 1,
            core_types::Outcome::Lose => bucket.be_losses += 1,
        }
    } else if trade.is_clean_win() {
        bucket.wins += 1;
    } else {
        bucket.losses += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{Direction, Outcome, Symbol};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trade(d: NaiveDate, outcome: Outcome, profit: Option<Decimal>) -> Trade {
        Trade {
            date: d,
            time: None,
            symbol: Symbol("EURUSD".to_string()),
            direction: Direction::Long,
            outcome,
            break_even: false,
            partials_taken: false,
            risk_per_trade: None,
            risk_reward: None,
            profit,
            pnl_percent: None,
            setup: None,
            liquidity: None,
            local_high_low: false,
            mss: None,
            news: false,
            stop_loss_size: None,
            launch_hour: false,
            executed: None,
            strategy_id: None,
        }
    }

    fn query() -> StatsQuery {
        StatsQuery {
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            symbol: None,
            year: 2024,
            account_balance: dec!(10_000),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_trade_list_yields_zeroed_report() {
        let report = StatsEngine::new().calculate(&[], &query());
        let stats = &report.overview;
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.wins, 0);
        assert_close(stats.win_rate, 0.0);
        assert_close(stats.win_rate_with_be, 0.0);
        assert_eq!(stats.total_profit, dec!(0));
        assert_close(stats.max_drawdown_percent, 0.0);
        assert_close(stats.profit_factor, 0.0);
        assert!(report.best_month.is_none());
        assert!(report.worst_month.is_none());
    }

    #[test]
    fn win_loss_be_classification_and_rates() {
        // The canonical mixed scenario: one win, one loss, one BE win.
        let mut be = trade(date(2024, 1, 3), Outcome::Win, Some(dec!(0)));
        be.break_even = true;
        let trades = vec![
            trade(date(2024, 1, 1), Outcome::Win, Some(dec!(100))),
            trade(date(2024, 1, 2), Outcome::Lose, Some(dec!(-50))),
            be,
        ];

        let report = StatsEngine::new().calculate(&trades, &query());
        let stats = &report.overview;
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.be_wins, 1);
        assert_eq!(stats.be_losses, 0);
        assert_close(stats.win_rate, 50.0);
        assert_close(stats.win_rate_with_be, 200.0 / 3.0);
        assert_eq!(stats.total_profit, dec!(50));
    }

    #[test]
    fn tallies_partition_the_subset() {
        let mut trades = Vec::new();
        for day in 1..=9 {
            let outcome = if day % 2 == 0 { Outcome::Win } else { Outcome::Lose };
            let mut t = trade(date(2024, 2, day), outcome, Some(dec!(1)));
            t.break_even = day % 3 == 0;
            trades.push(t);
        }

        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_eq!(
            stats.wins + stats.losses + stats.be_wins + stats.be_losses,
            stats.total_trades
        );
    }

    #[test]
    fn all_break_even_trades_have_no_plain_win_rate() {
        let mut trades = Vec::new();
        for (day, outcome) in [(1, Outcome::Win), (2, Outcome::Win), (3, Outcome::Lose)] {
            let mut t = trade(date(2024, 5, day), outcome, Some(dec!(0)));
            t.break_even = true;
            trades.push(t);
        }

        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.losses, 0);
        assert_close(stats.win_rate, 0.0);
        assert_close(stats.win_rate_with_be, 200.0 / 3.0);
    }

    #[test]
    fn drawdown_is_zero_for_a_rising_equity_curve() {
        let trades = vec![
            trade(date(2024, 1, 1), Outcome::Win, Some(dec!(100))),
            trade(date(2024, 1, 2), Outcome::Win, Some(dec!(50))),
            trade(date(2024, 1, 3), Outcome::Win, Some(dec!(25))),
        ];
        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_close(stats.max_drawdown_percent, 0.0);
    }

    #[test]
    fn drawdown_measures_decline_from_the_peak() {
        // Equity: 10_000 -> 10_100 (peak) -> 9_900. Drawdown 200 / 10_100.
        let trades = vec![
            trade(date(2024, 1, 1), Outcome::Win, Some(dec!(100))),
            trade(date(2024, 1, 2), Outcome::Lose, Some(dec!(-200))),
        ];
        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_close(stats.max_drawdown_percent, 200.0 / 10_100.0 * 100.0);
        assert!(stats.max_drawdown_percent >= 0.0);
    }

    #[test]
    fn profit_factor_guards_the_zero_loss_case() {
        let winners = vec![
            trade(date(2024, 1, 1), Outcome::Win, Some(dec!(100))),
            trade(date(2024, 1, 2), Outcome::Win, Some(dec!(50))),
        ];
        let stats = StatsEngine::new().calculate(&winners, &query()).overview;
        assert_close(stats.profit_factor, 0.0);

        let mixed = vec![
            trade(date(2024, 1, 1), Outcome::Win, Some(dec!(150))),
            trade(date(2024, 1, 2), Outcome::Lose, Some(dec!(-50))),
        ];
        let stats = StatsEngine::new().calculate(&mixed, &query()).overview;
        assert_close(stats.profit_factor, 3.0);
    }

    #[test]
    fn streaks_ignore_break_even_trades() {
        // W W BE L L L W -> best 2, worst -3, current 1.
        let mut trades = vec![
            trade(date(2024, 1, 1), Outcome::Win, Some(dec!(10))),
            trade(date(2024, 1, 2), Outcome::Win, Some(dec!(10))),
        ];
        let mut be = trade(date(2024, 1, 3), Outcome::Win, Some(dec!(0)));
        be.break_even = true;
        trades.push(be);
        trades.push(trade(date(2024, 1, 4), Outcome::Lose, Some(dec!(-10))));
        trades.push(trade(date(2024, 1, 5), Outcome::Lose, Some(dec!(-10))));
        trades.push(trade(date(2024, 1, 6), Outcome::Lose, Some(dec!(-10))));
        trades.push(trade(date(2024, 1, 7), Outcome::Win, Some(dec!(10))));

        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_eq!(stats.best_streak, 2);
        assert_eq!(stats.worst_streak, -3);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn average_days_between_trades() {
        let trades = vec![
            trade(date(2024, 1, 1), Outcome::Win, Some(dec!(1))),
            trade(date(2024, 1, 4), Outcome::Win, Some(dec!(1))),
            trade(date(2024, 1, 6), Outcome::Win, Some(dec!(1))),
        ];
        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_close(stats.avg_days_between_trades, 2.5);
    }

    #[test]
    fn date_range_and_market_filters_bound_the_primary_subset() {
        let mut other_market = trade(date(2024, 3, 6), Outcome::Win, Some(dec!(10)));
        other_market.symbol = Symbol("GBPUSD".to_string());
        let trades = vec![
            trade(date(2024, 3, 5), Outcome::Win, Some(dec!(10))),
            trade(date(2023, 12, 31), Outcome::Win, Some(dec!(10))),
            other_market,
        ];

        let mut q = query();
        q.symbol = Some(Symbol("EURUSD".to_string()));
        let report = StatsEngine::new().calculate(&trades, &q);
        assert_eq!(report.overview.total_trades, 1);
        assert_eq!(report.overview.by_market.len(), 1);
        assert!(report.overview.by_market.contains_key("EURUSD"));
    }

    #[test]
    fn non_executed_trades_feed_the_mirrored_set_only() {
        let mut planned = trade(date(2024, 4, 2), Outcome::Win, Some(dec!(80)));
        planned.executed = Some(false);
        let trades = vec![trade(date(2024, 4, 1), Outcome::Lose, Some(dec!(-40))), planned];

        let report = StatsEngine::new().calculate(&trades, &query());
        assert_eq!(report.overview.total_trades, 1);
        assert_eq!(report.overview.losses, 1);
        assert_eq!(report.non_executed.total_trades, 1);
        assert_eq!(report.non_executed.wins, 1);
        assert_close(report.non_executed.win_rate, 100.0);
    }

    #[test]
    fn monthly_view_ignores_the_date_range_but_honors_the_year() {
        let trades = vec![
            trade(date(2024, 3, 5), Outcome::Win, Some(dec!(300))),
            trade(date(2024, 3, 12), Outcome::Win, Some(dec!(200))),
            trade(date(2024, 6, 2), Outcome::Lose, Some(dec!(-100))),
            trade(date(2023, 3, 9), Outcome::Win, Some(dec!(999))),
        ];

        // Narrow range: only June is in range, but the monthly table still
        // covers all of 2024.
        let mut q = query();
        q.start_date = date(2024, 6, 1);
        q.end_date = date(2024, 6, 30);
        let report = StatsEngine::new().calculate(&trades, &q);

        assert_eq!(report.overview.total_trades, 1);
        assert_eq!(report.monthly.len(), 12);
        let march = &report.monthly[2];
        assert_eq!(march.month, "March");
        assert_eq!(march.trades, 2);
        assert_eq!(march.profit, dec!(500));

        let best = report.best_month.unwrap();
        assert_eq!(best.month, "March");
        let worst = report.worst_month.unwrap();
        assert_eq!(worst.month, "June");
    }

    #[test]
    fn time_of_day_buckets_use_the_fixed_bands() {
        let cases = [
            (NaiveTime::from_hms_opt(9, 59, 0), TIME_BANDS[0]),
            (NaiveTime::from_hms_opt(10, 0, 0), TIME_BANDS[1]),
            (NaiveTime::from_hms_opt(14, 30, 0), TIME_BANDS[2]),
            (NaiveTime::from_hms_opt(20, 59, 0), TIME_BANDS[3]),
            (NaiveTime::from_hms_opt(22, 0, 0), UNSPECIFIED),
            (None, UNSPECIFIED),
        ];
        for (time, band) in cases {
            assert_eq!(time_band(time), band);
        }

        let mut t = trade(date(2024, 1, 10), Outcome::Win, Some(dec!(10)));
        t.time = NaiveTime::from_hms_opt(10, 30, 0);
        let stats = StatsEngine::new().calculate(&[t], &query()).overview;
        assert_eq!(stats.by_time_of_day["10:00 - 11:59"].wins, 1);
    }

    #[test]
    fn day_of_week_and_unspecified_category_buckets() {
        // 2024-03-05 is a Tuesday.
        let mut tagged = trade(date(2024, 3, 5), Outcome::Win, Some(dec!(10)));
        tagged.setup = Some("FVG".to_string());
        let untagged = trade(date(2024, 3, 5), Outcome::Lose, Some(dec!(-10)));

        let stats = StatsEngine::new()
            .calculate(&[tagged, untagged], &query())
            .overview;
        assert_eq!(stats.by_day_of_week["Tuesday"].wins, 1);
        assert_eq!(stats.by_day_of_week["Tuesday"].losses, 1);
        assert_eq!(stats.by_setup["FVG"].wins, 1);
        assert_eq!(stats.by_setup[UNSPECIFIED].losses, 1);
        assert_close(stats.by_setup["FVG"].win_rate, 100.0);
    }

    #[test]
    fn news_breakdown_splits_on_the_flag() {
        let mut news = trade(date(2024, 2, 1), Outcome::Win, Some(dec!(10)));
        news.news = true;
        let quiet = trade(date(2024, 2, 2), Outcome::Lose, Some(dec!(-10)));

        let stats = StatsEngine::new().calculate(&[news, quiet], &query()).overview;
        assert_eq!(stats.by_news["news"].wins, 1);
        assert_eq!(stats.by_news["no news"].losses, 1);
    }

    #[test]
    fn consistency_rewards_even_months_over_concentrated_ones() {
        // Two months, identical profit: perfectly even.
        let even = vec![
            trade(date(2024, 1, 10), Outcome::Win, Some(dec!(100))),
            trade(date(2024, 2, 10), Outcome::Win, Some(dec!(100))),
        ];
        let even_stats = StatsEngine::new().calculate(&even, &query()).overview;
        assert_close(even_stats.consistency_score, 100.0);

        // Same total, concentrated in one month: strictly lower score.
        let lumpy = vec![
            trade(date(2024, 1, 10), Outcome::Win, Some(dec!(190))),
            trade(date(2024, 2, 10), Outcome::Win, Some(dec!(10))),
        ];
        let lumpy_stats = StatsEngine::new().calculate(&lumpy, &query()).overview;
        assert!(lumpy_stats.consistency_score < even_stats.consistency_score);
        assert!(lumpy_stats.consistency_score >= 0.0);
    }

    #[test]
    fn single_traded_month_is_perfectly_consistent() {
        // One profitable month has zero deviation from its own mean.
        let trades = vec![
            trade(date(2024, 7, 2), Outcome::Win, Some(dec!(60))),
            trade(date(2024, 7, 18), Outcome::Win, Some(dec!(40))),
        ];
        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_close(stats.consistency_score, 100.0);
        assert_close(stats.consistency_score_with_be, 100.0);
    }

    #[test]
    fn losing_months_score_zero_consistency() {
        let trades = vec![
            trade(date(2024, 1, 10), Outcome::Lose, Some(dec!(-100))),
            trade(date(2024, 2, 10), Outcome::Lose, Some(dec!(-100))),
        ];
        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_close(stats.consistency_score, 0.0);
    }

    #[test]
    fn sharpe_ratio_guards_degenerate_inputs() {
        // A single trade and a zero-variance set both yield 0.
        let one = vec![trade(date(2024, 1, 1), Outcome::Win, Some(dec!(10)))];
        let stats = StatsEngine::new().calculate(&one, &query()).overview;
        assert_close(stats.sharpe_ratio, 0.0);

        let mut flat = Vec::new();
        for day in 1..=3 {
            let mut t = trade(date(2024, 1, day), Outcome::Win, Some(dec!(10)));
            t.pnl_percent = Some(1.0);
            flat.push(t);
        }
        let stats = StatsEngine::new().calculate(&flat, &query()).overview;
        assert_close(stats.sharpe_ratio, 0.0);
    }

    #[test]
    fn sharpe_ratio_is_mean_over_stddev() {
        let mut trades = Vec::new();
        for (day, ret) in [(1, 2.0), (2, -1.0), (3, 2.0)] {
            let mut t = trade(date(2024, 1, day), Outcome::Win, Some(dec!(10)));
            t.pnl_percent = Some(ret);
            trades.push(t);
        }
        let stats = StatsEngine::new().calculate(&trades, &query()).overview;

        // Returns 2, -1, 2: mean 1, population variance (1 + 4 + 1) / 3 = 2.
        let mean = 1.0;
        let std_dev = 2.0_f64.sqrt();
        assert_close(stats.sharpe_ratio, mean / std_dev);
    }

    #[test]
    fn legacy_trades_without_profit_use_derived_amounts() {
        // No profit recorded: win derives 10_000 * 0.5% * 2 = 100, the
        // loss -50.
        let trades = vec![
            trade(date(2024, 1, 1), Outcome::Win, None),
            trade(date(2024, 1, 2), Outcome::Lose, None),
        ];
        let stats = StatsEngine::new().calculate(&trades, &query()).overview;
        assert_eq!(stats.total_profit, dec!(50));
        assert_eq!(stats.avg_profit, dec!(25));
    }
}
