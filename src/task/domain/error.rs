//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The expiration date components do not form a calendar date.
    #[error("invalid expiration date {year:04}-{month:02}-{day:02}")]
    InvalidExpirationDate {
        /// Calendar year component.
        year: i32,
        /// One-based month component.
        month: u32,
        /// Day-of-month component.
        day: u32,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
