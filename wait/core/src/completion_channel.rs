// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{ChannelError, Outcome, WorkerFailure};
use tokio::sync::mpsc;
use tracing::debug;

/// Creates a completion channel for `capacity` workers.
///
/// The returned sender is meant to be cloned once per worker. Each worker
/// must send exactly one [`Outcome`].
pub fn completion_channel(
    capacity: usize,
) -> Result<(CompletionSender, CompletionChannel), ChannelError> {
    if capacity == 0 {
        return Err(ChannelError::ZeroCapacity);
    }

    let (tx, rx) = mpsc::channel::<Outcome>(capacity);

    Ok((
        CompletionSender { tx: tx.clone() },
        CompletionChannel {
            rx,
            keepalive: Some(tx),
            capacity,
            received: 0,
            closed: false,
        },
    ))
}

/// Producer handle given to each worker
#[derive(Clone, Debug)]
pub struct CompletionSender {
    tx: mpsc::Sender<Outcome>,
}

impl CompletionSender {
    /// Send an outcome, waiting for buffer space if needed.
    /// Returns false if the channel no longer accepts outcomes.
    pub async fn send(&self, outcome: Outcome) -> bool {
        self.tx.send(outcome).await.is_ok()
    }

    pub async fn succeed(&self) -> bool {
        self.send(Ok(())).await
    }

    pub async fn fail(&self, message: impl Into<String>) -> bool {
        self.send(Err(WorkerFailure::new(message))).await
    }

    /// Blocking variant for workers running on plain OS threads.
    ///
    /// Panics if called from within an asynchronous execution context, like
    /// [`mpsc::Sender::blocking_send`].
    pub fn send_blocking(&self, outcome: Outcome) -> bool {
        self.tx.blocking_send(outcome).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Bounded, closable conduit of worker outcomes with a single reader.
///
/// The declared capacity is the number of outcomes the reducers expect. The
/// channel is closed by a reducer once that many have been received; it is
/// never closed from outside, and it must not be reduced a second time.
///
/// The channel holds a sender of its own until it is closed, so producers
/// going away before `capacity` outcomes arrive does not end a reduction.
///
/// Dropping the channel drops the receiving side, so any producer still
/// sending is rejected rather than left blocked.
#[derive(Debug)]
pub struct CompletionChannel {
    rx: mpsc::Receiver<Outcome>,
    keepalive: Option<mpsc::Sender<Outcome>>,
    capacity: usize,
    received: usize,
    closed: bool,
}

impl CompletionChannel {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Outcomes counted so far. A failure that ends a fail-fast reduction
    /// early is not counted.
    pub fn received(&self) -> usize {
        self.received
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Closes the channel if still open and drops every buffered outcome.
    /// Returns how many outcomes were discarded.
    pub fn discard(mut self) -> usize {
        if !self.closed {
            self.close();
        }

        let mut discarded = 0;
        while self.rx.try_recv().is_ok() {
            discarded += 1;
        }

        debug!(discarded, "completion channel discarded");
        discarded
    }

    /// Next outcome in arrival order, or `None` once closed and drained.
    pub(crate) async fn recv(&mut self) -> Option<Outcome> {
        self.rx.recv().await
    }

    /// Counts one received outcome and closes the channel when the count
    /// reaches the declared capacity.
    pub(crate) fn record(&mut self) {
        self.received += 1;

        debug!(
            received = self.received,
            capacity = self.capacity,
            "outcome received"
        );

        // Equality, not >=: an over-sent outcome drained after the close
        // must not close the channel a second time.
        if self.received == self.capacity {
            self.close();
        }
    }

    fn close(&mut self) {
        self.rx.close();
        self.keepalive = None;
        self.closed = true;
        debug!(capacity = self.capacity, "completion channel closed");
    }
}
