// In crates/core-types/src/types.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A market/instrument identifier (e.g., "EURUSD", "NQ").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            other => Err(Error::UnknownDirection(other.to_string())),
        }
    }
}

/// The recorded result of a trade. This is a closed set: journal entries
/// with any other value fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl FromStr for Outcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Win" => Ok(Outcome::Win),
            "Lose" => Ok(Outcome::Lose),
            other => Err(Error::UnknownOutcome(other.to_string())),
        }
    }
}

/// A single logged trade, as recorded in the journal.
///
/// Most analytical fields are optional: older journal entries predate
/// several of them, and the analytics layer applies documented defaults
/// rather than rejecting such records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// The trade date (local trading day).
    pub date: NaiveDate,
    /// Execution time of day, when logged. Used for time-of-day bucketing.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    pub symbol: Symbol,
    pub direction: Direction,
    pub outcome: Outcome,
    /// A trade closed at ~zero net result. Tracked separately from clean
    /// wins/losses, but still carries a nominal `outcome`.
    #[serde(default)]
    pub break_even: bool,
    /// Part of the position was closed before the rest hit break-even/target.
    #[serde(default)]
    pub partials_taken: bool,
    /// Risk on the trade as a percentage of account balance.
    #[serde(default)]
    pub risk_per_trade: Option<f64>,
    /// Planned risk:reward ratio.
    #[serde(default)]
    pub risk_reward: Option<f64>,
    /// Realized profit in account currency. Legacy records omit this and
    /// have it derived from risk and R:R instead.
    #[serde(default)]
    pub profit: Option<Decimal>,
    /// Realized return as a percentage of account balance.
    #[serde(default)]
    pub pnl_percent: Option<f64>,
    #[serde(default)]
    pub setup: Option<String>,
    #[serde(default)]
    pub liquidity: Option<String>,
    /// Whether the entry swept a local high/low.
    #[serde(default)]
    pub local_high_low: bool,
    /// Market structure shift tag.
    #[serde(default)]
    pub mss: Option<String>,
    /// Whether the trade was taken around a news event.
    #[serde(default)]
    pub news: bool,
    /// Stop-loss size in points/pips.
    #[serde(default)]
    pub stop_loss_size: Option<f64>,
    /// Whether the trade was taken during the launch hour window.
    #[serde(default)]
    pub launch_hour: bool,
    /// Whether the planned trade was actually taken. Absent means executed:
    /// the flag was added after the journal format already existed.
    #[serde(default)]
    pub executed: Option<bool>,
    #[serde(default)]
    pub strategy_id: Option<String>,
}

impl Trade {
    /// Non-executed trades are planned setups the user logged but never took.
    pub fn is_executed(&self) -> bool {
        self.executed.unwrap_or(true)
    }

    /// A clean win: won AND not break-even.
    pub fn is_clean_win(&self) -> bool {
        self.outcome == Outcome::Win && !self.break_even
    }

    /// A clean loss: lost AND not break-even.
    pub fn is_clean_loss(&self) -> bool {
        self.outcome == Outcome::Lose && !self.break_even
    }
}
