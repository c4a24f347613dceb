// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::worker::SimulatedWorker;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::thread;
use tokio::task::JoinHandle;
use wait_core::CompletionSender;

/// Trait for abstracting where workers run (tokio tasks, OS threads)
pub trait WorkerRuntime: Send + 'static {
    type Handle: Send;
    type Error: fmt::Display + Send;

    /// Start a worker that reports through `sender`
    fn spawn(worker: SimulatedWorker, sender: CompletionSender) -> Self::Handle;

    /// Wait for the worker to complete
    async fn join(handle: Self::Handle) -> Result<(), Self::Error>;
}

/// Tokio task-based runtime
pub struct TokioRuntime;

impl WorkerRuntime for TokioRuntime {
    type Handle = JoinHandle<()>;
    type Error = tokio::task::JoinError;

    fn spawn(worker: SimulatedWorker, sender: CompletionSender) -> Self::Handle {
        tokio::spawn(worker.run(sender))
    }

    async fn join(handle: Self::Handle) -> Result<(), Self::Error> {
        handle.await
    }
}

/// OS thread-based runtime
pub struct ThreadRuntime;

impl WorkerRuntime for ThreadRuntime {
    type Handle = thread::JoinHandle<()>;
    type Error = String;

    fn spawn(worker: SimulatedWorker, sender: CompletionSender) -> Self::Handle {
        thread::spawn(move || worker.run_blocking(sender))
    }

    async fn join(handle: Self::Handle) -> Result<(), Self::Error> {
        match tokio::task::spawn_blocking(move || handle.join()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err("worker thread panicked".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    #[default]
    Tasks,
    Threads,
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeKind::Tasks => f.write_str("tasks"),
            RuntimeKind::Threads => f.write_str("threads"),
        }
    }
}

impl FromStr for RuntimeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tasks" => Ok(RuntimeKind::Tasks),
            "threads" => Ok(RuntimeKind::Threads),
            other => Err(format!(
                "unknown runtime '{other}' (expected 'tasks' or 'threads')"
            )),
        }
    }
}
