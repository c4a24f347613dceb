// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod config;
mod worker;
mod worker_runtime;

use clap::Parser;
use config::{Cli, Config};
use std::io::ErrorKind;
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wait_core::{
    completion_channel, reduce_until_cancelled, reduce_with_timeout, ChannelError,
    ReduceStrategy, WaitError,
};
use worker::SimulatedWorker;
use worker_runtime::{RuntimeKind, ThreadRuntime, TokioRuntime, WorkerRuntime};

#[derive(Debug, Error)]
enum BatchError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Wait(#[from] WaitError),
}

/// Spawns one worker per channel slot, waits on the configured reducer and
/// then joins every worker.
async fn run_batch<RT: WorkerRuntime>(
    config: &Config,
    token: &CancellationToken,
) -> Result<(), BatchError> {
    let (sender, mut channel) = completion_channel(config.num_workers)?;

    let handles: Vec<RT::Handle> = {
        let mut rng = rand::rng();
        (0..config.num_workers)
            .map(|id| {
                let worker =
                    SimulatedWorker::random(&mut rng, id, config.failure_rate, config.max_work_ms);
                RT::spawn(worker, sender.clone())
            })
            .collect()
    };
    drop(sender);

    let result = match config.timeout() {
        Some(limit) => reduce_with_timeout(&config.strategy, &mut channel, limit).await,
        None => reduce_until_cancelled(&config.strategy, &mut channel, token).await,
    };

    if !channel.is_closed() {
        let discarded = channel.discard();
        println!("Discarded {} unread outcome(s)", discarded);
    }

    for handle in handles {
        if let Err(e) = RT::join(handle).await {
            warn!(error = %e, "worker did not finish cleanly");
        }
    }

    result.map_err(BatchError::from)
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();

    let cli = Cli::parse();
    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(config::ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            eprintln!("{} not found, using default configuration...", cli.config.display());
            Config::default()
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}", cli.config.display(), e);
            return ExitCode::from(2);
        }
    }
    .with_overrides(&cli);

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::from(2);
    }

    println!("=== COMPLETION WAIT ===");
    println!("Configuration:");
    println!("  - Workers: {}", config.num_workers);
    println!("  - Failure rate: {}%", config.failure_rate);
    println!("  - Max work: {}ms", config.max_work_ms);
    println!("  - Strategy: {}", config.strategy);
    println!("  - Runtime: {}", config.runtime);
    if let Some(limit) = config.timeout() {
        println!("  - Timeout: {:?}", limit);
    }

    let token = CancellationToken::new();

    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                println!("\n=== Ctrl+C received, cancelling wait ===");
                ctrl_c_token.cancel();
            }
            Err(e) => warn!(error = %e, "failed to listen for Ctrl+C"),
        }
    });

    let start_time = Instant::now();
    let result = match config.runtime {
        RuntimeKind::Tasks => run_batch::<TokioRuntime>(&config, &token).await,
        RuntimeKind::Threads => run_batch::<ThreadRuntime>(&config, &token).await,
    };
    let elapsed = start_time.elapsed();

    match result {
        Ok(()) => {
            println!("\nAll {} workers succeeded in {:?}", config.num_workers, elapsed);
            ExitCode::SUCCESS
        }
        Err(BatchError::Wait(WaitError::Worker(failure))) => {
            let label = match config.strategy {
                ReduceStrategy::FailFast => "First failure",
                ReduceStrategy::Tolerant => "Failures",
            };
            println!("\n{} after {:?}:", label, elapsed);
            print!("{}", failure);
            if !failure.message().ends_with('\n') {
                println!();
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            println!("\n{} after {:?}", e, elapsed);
            ExitCode::FAILURE
        }
    }
}
