// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for instrumentation
//!
//! Lifecycle violations (starting twice, timing against a registry that is
//! not live, stopping twice) are programming errors. Fallible entry points
//! return them as values; guards that cannot return a value panic with them.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for instrumentation operations
pub type InstrumentResult<T> = Result<T, InstrumentError>;

/// Errors that can occur while instrumenting a run
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum InstrumentError {
    /// A registry was started while another one is still live
    #[error("A timing registry is already live; only one may exist per process")]
    AlreadyStarted,

    /// The global registry was used before `start` was called
    #[error("No timing registry has been started")]
    NotStarted,

    /// The registry has already been torn down
    #[error("Timing registry is no longer running")]
    NotRunning,

    /// `stop` was called on a registry that was already stopped
    #[error("Timing registry was already stopped")]
    AlreadyStopped,

    /// Labels must be non-empty text
    #[error("Invalid label: {0:?}")]
    InvalidLabel(String),

    /// Statistics were requested over a series with no samples
    #[error("Cannot compute statistics for an empty sample series")]
    EmptySeries,

    /// Writing the report failed
    #[error("Failed to write report: {0}")]
    Output(String),
}

impl InstrumentError {
    /// Check if this error is a lifecycle (ordering) contract violation
    pub fn is_lifecycle_violation(&self) -> bool {
        matches!(
            self,
            InstrumentError::AlreadyStarted
                | InstrumentError::NotStarted
                | InstrumentError::NotRunning
                | InstrumentError::AlreadyStopped
        )
    }
}

impl From<std::io::Error> for InstrumentError {
    fn from(err: std::io::Error) -> Self {
        InstrumentError::Output(err.to_string())
    }
}
