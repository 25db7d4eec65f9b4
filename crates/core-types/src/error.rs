// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown trade outcome: {0}")]
    UnknownOutcome(String),

    #[error("Unknown trade direction: {0}")]
    UnknownDirection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
