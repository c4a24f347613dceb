// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CompletionChannel, WorkerFailure};
use async_trait::async_trait;

/// Trait for reducing a batch of worker outcomes into one result
///
/// Implementations read outcomes until the channel is closed and drained,
/// counting them against the channel's declared capacity.
///
/// Precondition: called at most once per channel.
#[async_trait]
pub trait Reducer: Send + Sync {
    async fn reduce(&self, channel: &mut CompletionChannel) -> Result<(), WorkerFailure>;
}
