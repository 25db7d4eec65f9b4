// In crates/journal/src/lib.rs

use core_types::Trade;
use std::fs;
use std::path::Path;

pub mod error;

// Re-export the most important types for easy access.
pub use error::{Error, Result};

/// Loads the full trade journal from a JSON export file.
///
/// The file holds a plain JSON array of trade records, as exported by the
/// journal's backend. Records with unknown outcome values are rejected
/// rather than silently skipped.
pub fn load_trades(path: impl AsRef<Path>) -> Result<Vec<Trade>> {
    let content = fs::read_to_string(path)?;
    let trades: Vec<Trade> = serde_json::from_str(&content)?;
    Ok(trades)
}

/// Writes the trade journal back out as pretty-printed JSON.
pub fn save_trades(path: impl AsRef<Path>, trades: &[Trade]) -> Result<()> {
    let content = serde_json::to_string_pretty(trades)?;
    fs::write(path, content)?;
    Ok(())
}
