//! Error types for the fallible, non-engine operations.
//!
//! The slot-filling engine itself never fails: unplaceable hours are an
//! accepted outcome. Errors only arise when parsing configuration or
//! user-entered split patterns.

use thiserror::Error;

/// Errors raised while loading configuration or parsing user input.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A split pattern string such as `"3+2"` could not be parsed.
    #[error("Invalid split pattern: {0}")]
    InvalidSplitPattern(String),

    /// A (day, period, class) position does not exist in the schedule.
    #[error("No cell at {day} period {period} for class {class}")]
    UnknownCell {
        day: String,
        period: i32,
        class: String,
    },

    /// Configuration JSON could not be decoded.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TimetableError>;
