// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use thiserror::Error;

/// A worker reported that its unit of work did not complete.
///
/// Displays as exactly the message the worker supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WorkerFailure {
    message: String,
}

impl WorkerFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for WorkerFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("completion channel capacity must be at least 1")]
    ZeroCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reduce strategy '{0}' (expected 'fail-fast' or 'tolerant')")]
pub struct ParseStrategyError(pub String);

/// Result of a reduction raced against a deadline or a cancellation token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error(transparent)]
    Worker(#[from] WorkerFailure),

    #[error("wait cancelled before all workers reported")]
    Cancelled,

    #[error("workers did not all report within {0:?}")]
    TimedOut(Duration),
}
