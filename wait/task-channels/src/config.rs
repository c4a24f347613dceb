// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::worker_runtime::RuntimeKind;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use wait_core::ReduceStrategy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("num_workers must be at least 1")]
    NoWorkers,

    #[error("failure_rate must be between 0 and 100, got {0}")]
    FailureRate(u8),
}

/// Command line overrides for the values in the config file
#[derive(Debug, Parser)]
#[command(about = "Run a batch of simulated workers and wait for all of them to report")]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    #[arg(long)]
    pub num_workers: Option<usize>,

    /// Percentage of workers that report a failure
    #[arg(long)]
    pub failure_rate: Option<u8>,

    /// Upper bound on the simulated work per worker, in milliseconds
    #[arg(long)]
    pub max_work_ms: Option<u64>,

    /// fail-fast or tolerant
    #[arg(long)]
    pub strategy: Option<ReduceStrategy>,

    /// tasks or threads
    #[arg(long)]
    pub runtime: Option<RuntimeKind>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub num_workers: usize,
    pub failure_rate: u8,
    pub max_work_ms: u64,
    pub strategy: ReduceStrategy,
    pub runtime: RuntimeKind,
    pub timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_workers: 8,
            failure_rate: 25,
            max_work_ms: 50,
            strategy: ReduceStrategy::Tolerant,
            runtime: RuntimeKind::Tasks,
            timeout_ms: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(contents)?;
        Ok(config)
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(num_workers) = cli.num_workers {
            self.num_workers = num_workers;
        }
        if let Some(failure_rate) = cli.failure_rate {
            self.failure_rate = failure_rate;
        }
        if let Some(max_work_ms) = cli.max_work_ms {
            self.max_work_ms = max_work_ms;
        }
        if let Some(strategy) = cli.strategy {
            self.strategy = strategy;
        }
        if let Some(runtime) = cli.runtime {
            self.runtime = runtime;
        }
        if cli.timeout_ms.is_some() {
            self.timeout_ms = cli.timeout_ms;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.failure_rate > 100 {
            return Err(ConfigError::FailureRate(self.failure_rate));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = Config::parse(r#"{ "num_workers": 3, "strategy": "fail-fast" }"#).unwrap();
        assert_eq!(config.num_workers, 3);
        assert_eq!(config.strategy, ReduceStrategy::FailFast);
        assert_eq!(config.failure_rate, Config::default().failure_rate);
        assert_eq!(config.runtime, RuntimeKind::Tasks);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_unknown_strategy_is_a_parse_error() {
        let err = Config::parse(r#"{ "strategy": "lenient" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let cli = Cli::parse_from([
            "wait-task-channels",
            "--num-workers",
            "5",
            "--strategy",
            "fail-fast",
            "--runtime",
            "threads",
            "--timeout-ms",
            "250",
        ]);
        let config = Config::default().with_overrides(&cli);

        assert_eq!(config.num_workers, 5);
        assert_eq!(config.strategy, ReduceStrategy::FailFast);
        assert_eq!(config.runtime, RuntimeKind::Threads);
        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.failure_rate, 25);
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let config = Config {
            num_workers: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoWorkers)));

        let config = Config {
            failure_rate: 101,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FailureRate(101))
        ));
    }
}
