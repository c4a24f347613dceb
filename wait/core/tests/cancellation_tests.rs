// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wait_core::{
    completion_channel, reduce_until_cancelled, reduce_with_timeout, FailFastReducer,
    ReduceStrategy, TolerantReducer, WaitError, WorkerFailure,
};

// ============================================================
// Timeout
// ============================================================

#[tokio::test]
async fn test_timeout_when_a_worker_never_reports() {
    let (tx, mut channel) = completion_channel(3).unwrap();
    tx.succeed().await;
    tx.succeed().await;

    let limit = Duration::from_millis(30);
    let result = reduce_with_timeout(&TolerantReducer, &mut channel, limit).await;

    assert_eq!(result, Err(WaitError::TimedOut(limit)));
    assert_eq!(channel.received(), 2);
    assert!(!channel.is_closed());
}

#[tokio::test]
async fn test_timeout_passes_through_reduction_result() {
    let (tx, mut channel) = completion_channel(2).unwrap();
    tx.fail("boom").await;
    tx.succeed().await;

    let result =
        reduce_with_timeout(&FailFastReducer, &mut channel, Duration::from_secs(5)).await;
    assert_eq!(result, Err(WaitError::Worker(WorkerFailure::new("boom"))));
}

// ============================================================
// Cancellation
// ============================================================

#[tokio::test]
async fn test_cancelled_token_wins_over_ready_outcomes() {
    let (tx, mut channel) = completion_channel(1).unwrap();
    tx.succeed().await;

    let token = CancellationToken::new();
    token.cancel();

    let result = reduce_until_cancelled(&ReduceStrategy::Tolerant, &mut channel, &token).await;
    assert_eq!(result, Err(WaitError::Cancelled));
    assert_eq!(channel.received(), 0);
}

#[tokio::test]
async fn test_cancel_while_waiting() {
    let (_tx, mut channel) = completion_channel(2).unwrap();
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let result = reduce_until_cancelled(&ReduceStrategy::FailFast, &mut channel, &token).await;
    assert_eq!(result, Err(WaitError::Cancelled));
}

#[tokio::test]
async fn test_uncancelled_reduction_completes() {
    let (tx, mut channel) = completion_channel(2).unwrap();
    tx.succeed().await;
    tx.succeed().await;

    let token = CancellationToken::new();
    let result = reduce_until_cancelled(&ReduceStrategy::FailFast, &mut channel, &token).await;
    assert_eq!(result, Ok(()));
    assert!(channel.is_closed());
}
