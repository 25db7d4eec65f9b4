// In crates/analytics/src/normalize.rs

use core_types::Trade;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::UNSPECIFIED;

/// Fallback risk per trade, in percent of account balance, for journal
/// entries that predate the risk field.
pub const DEFAULT_RISK_PER_TRADE: f64 = 0.5;

/// Fallback risk:reward ratio for journal entries that predate the field.
pub const DEFAULT_RISK_REWARD: f64 = 2.0;

/// The realized profit of a trade in account currency.
///
/// Uses the recorded profit when present. Legacy records derive it from
/// risk and R:R: `risk_amount * rr` on a win, `-risk_amount` on a loss,
/// where `risk_amount = balance * risk% / 100`. Break-even trades without
/// a recorded profit contribute zero; a recorded profit (partials taken
/// before break-even) is honored as-is.
pub fn effective_profit(trade: &Trade, account_balance: Decimal) -> Decimal {
    if let Some(profit) = trade.profit {
        return profit;
    }
    if trade.break_even {
        return dec!(0);
    }

    let risk_pct = trade.risk_per_trade.unwrap_or(DEFAULT_RISK_PER_TRADE);
    let rr = trade.risk_reward.unwrap_or(DEFAULT_RISK_REWARD);
    let risk_amount =
        account_balance * Decimal::from_f64(risk_pct).unwrap_or(Decimal::ZERO) / dec!(100);

    if trade.is_clean_win() {
        risk_amount * Decimal::from_f64(rr).unwrap_or(Decimal::ZERO)
    } else {
        -risk_amount
    }
}

/// Normalizes an optional category value to its bucket key.
pub fn category(value: Option<&String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => UNSPECIFIED.to_string(),
    }
}
