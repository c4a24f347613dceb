// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Opt-in deadline and cancellation for a reduction.
//!
//! The reducers themselves wait as long as it takes for `capacity` outcomes
//! to arrive. These wrappers race a reduction against a timer or a
//! [`CancellationToken`]; whichever finishes first decides the result. The
//! channel keeps whatever state the reducer left it in when the race ended.

use crate::{CompletionChannel, Reducer, WaitError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub async fn reduce_with_timeout<R>(
    reducer: &R,
    channel: &mut CompletionChannel,
    limit: Duration,
) -> Result<(), WaitError>
where
    R: Reducer + ?Sized,
{
    let result = tokio::time::timeout(limit, reducer.reduce(channel)).await;

    match result {
        Ok(result) => result.map_err(WaitError::from),
        Err(_) => {
            warn!(
                received = channel.received(),
                capacity = channel.capacity(),
                ?limit,
                "timed out waiting for workers"
            );
            Err(WaitError::TimedOut(limit))
        }
    }
}

pub async fn reduce_until_cancelled<R>(
    reducer: &R,
    channel: &mut CompletionChannel,
    token: &CancellationToken,
) -> Result<(), WaitError>
where
    R: Reducer + ?Sized,
{
    let result = tokio::select! {
        biased;
        _ = token.cancelled() => None,
        result = reducer.reduce(channel) => Some(result),
    };

    match result {
        Some(result) => result.map_err(WaitError::from),
        None => {
            warn!(
                received = channel.received(),
                capacity = channel.capacity(),
                "wait cancelled"
            );
            Err(WaitError::Cancelled)
        }
    }
}
