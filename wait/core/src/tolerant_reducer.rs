// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CompletionChannel, Reducer, WorkerFailure};
use async_trait::async_trait;
use tracing::{info, warn};

/// Waits for every worker and merges all failures into one.
///
/// The merged message is each failure's message followed by `\n`, in the
/// order the failures arrived.
pub async fn reduce_tolerant(channel: &mut CompletionChannel) -> Result<(), WorkerFailure> {
    let mut merged = String::new();
    let mut failures = 0usize;

    while let Some(outcome) = channel.recv().await {
        if let Err(failure) = outcome {
            warn!(%failure, "worker failed");
            merged.push_str(failure.message());
            merged.push('\n');
            failures += 1;
        }

        channel.record();
    }

    if merged.is_empty() {
        return Ok(());
    }

    info!(
        failures,
        capacity = channel.capacity(),
        "all workers reported, some failed"
    );
    Err(WorkerFailure::new(merged))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TolerantReducer;

#[async_trait]
impl Reducer for TolerantReducer {
    async fn reduce(&self, channel: &mut CompletionChannel) -> Result<(), WorkerFailure> {
        reduce_tolerant(channel).await
    }
}
