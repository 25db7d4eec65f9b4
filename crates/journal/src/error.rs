// In crates/journal/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read journal file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Journal file is not valid JSON: {0}")]
    FormatError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
