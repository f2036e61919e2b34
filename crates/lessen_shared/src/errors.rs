//! Error results that can be returned when setting up a stream
use thiserror::Error;

/// Errors that can occur before any character has been read
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid source range {start}..{end} for a text of {len} characters")]
    InvalidRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
