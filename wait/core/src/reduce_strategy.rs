// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{
    reduce_fail_fast, reduce_tolerant, CompletionChannel, ParseStrategyError, Reducer,
    WorkerFailure,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Selects a reducer at runtime, e.g. from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReduceStrategy {
    FailFast,
    #[default]
    Tolerant,
}

impl ReduceStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReduceStrategy::FailFast => "fail-fast",
            ReduceStrategy::Tolerant => "tolerant",
        }
    }
}

impl fmt::Display for ReduceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReduceStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail-fast" => Ok(ReduceStrategy::FailFast),
            "tolerant" => Ok(ReduceStrategy::Tolerant),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

#[async_trait]
impl Reducer for ReduceStrategy {
    async fn reduce(&self, channel: &mut CompletionChannel) -> Result<(), WorkerFailure> {
        match self {
            ReduceStrategy::FailFast => reduce_fail_fast(channel).await,
            ReduceStrategy::Tolerant => reduce_tolerant(channel).await,
        }
    }
}
