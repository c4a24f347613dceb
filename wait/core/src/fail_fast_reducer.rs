// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CompletionChannel, Reducer, WorkerFailure};
use async_trait::async_trait;
use tracing::info;

/// Waits for every worker to succeed, returning the first failure observed.
///
/// On a failure the channel is left open and undrained: producers that have
/// not reported yet may still send into it. Drop the channel, or call
/// [`CompletionChannel::discard`], to dispose of it.
///
/// On the success-only path the channel is closed once `capacity` outcomes
/// have been received.
pub async fn reduce_fail_fast(channel: &mut CompletionChannel) -> Result<(), WorkerFailure> {
    while let Some(outcome) = channel.recv().await {
        if let Err(failure) = outcome {
            info!(
                received = channel.received(),
                capacity = channel.capacity(),
                %failure,
                "worker failed, returning early"
            );
            return Err(failure);
        }

        channel.record();
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FailFastReducer;

#[async_trait]
impl Reducer for FailFastReducer {
    async fn reduce(&self, channel: &mut CompletionChannel) -> Result<(), WorkerFailure> {
        reduce_fail_fast(channel).await
    }
}
