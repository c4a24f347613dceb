// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rand::Rng;
use std::time::Duration;
use tracing::debug;
use wait_core::{CompletionSender, Outcome, WorkerFailure};

/// A worker that sleeps for a while and then reports a predetermined outcome
#[derive(Debug, Clone)]
pub struct SimulatedWorker {
    pub id: usize,
    pub work: Duration,
    pub fails: bool,
}

impl SimulatedWorker {
    pub fn random(rng: &mut impl Rng, id: usize, failure_rate: u8, max_work_ms: u64) -> Self {
        Self {
            id,
            work: Duration::from_millis(rng.random_range(0..=max_work_ms)),
            fails: rng.random_bool(f64::from(failure_rate.min(100)) / 100.0),
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.fails {
            Err(WorkerFailure::new(format!(
                "worker {} failed after {}ms",
                self.id,
                self.work.as_millis()
            )))
        } else {
            Ok(())
        }
    }

    pub async fn run(self, sender: CompletionSender) {
        tokio::time::sleep(self.work).await;
        let accepted = sender.send(self.outcome()).await;
        debug!(worker = self.id, accepted, "worker reported");
    }

    pub fn run_blocking(self, sender: CompletionSender) {
        std::thread::sleep(self.work);
        let accepted = sender.send_blocking(self.outcome());
        debug!(worker = self.id, accepted, "worker reported");
    }
}
