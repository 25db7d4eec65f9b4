// In crates/analytics/src/lib.rs

pub mod engine;
pub mod normalize;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use engine::StatsEngine;
pub use types::{
    DashboardStats, DimensionStats, MonthStats, StatsQuery, TradeStats, MONTH_NAMES, TIME_BANDS,
    UNSPECIFIED,
};
