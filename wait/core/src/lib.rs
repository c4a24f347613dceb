// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Completion channel and reducers for a fixed-size batch of concurrent workers.
//!
//! A caller sizes a [`CompletionChannel`] to the number of workers it is about
//! to launch, hands each worker a clone of the [`CompletionSender`], and then
//! waits on one of the reducers:
//!
//! - [`reduce_fail_fast`] returns the first failure it observes.
//! - [`reduce_tolerant`] drains every outcome and merges all failures.
//!
//! Both close the channel once `capacity` outcomes have been received.

mod error;
pub use error::{ChannelError, ParseStrategyError, WaitError, WorkerFailure};

mod outcome;
pub use outcome::Outcome;

mod completion_channel;
pub use completion_channel::{completion_channel, CompletionChannel, CompletionSender};

pub mod reducer;
pub use reducer::Reducer;

mod fail_fast_reducer;
pub use fail_fast_reducer::{reduce_fail_fast, FailFastReducer};

mod tolerant_reducer;
pub use tolerant_reducer::{reduce_tolerant, TolerantReducer};

mod reduce_strategy;
pub use reduce_strategy::ReduceStrategy;

pub mod cancellable;
pub use cancellable::{reduce_until_cancelled, reduce_with_timeout};
