//! Tokio-backed flip-back scheduling.

use std::time::Duration;

use strictly_memory::{FlipBack, FlipScheduler};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Schedules flip-backs as tokio tasks and delivers them on a channel.
///
/// Each scheduled flip-back sleeps for the configured delay and then sends
/// itself to the receiver returned by [`FlipBackTimers::new`]. Every
/// outstanding task is aborted by [`FlipScheduler::cancel_all`] and on drop.
#[derive(Debug)]
pub struct FlipBackTimers {
    delay: Duration,
    tx: mpsc::UnboundedSender<FlipBack>,
    pending: Vec<JoinHandle<()>>,
}

impl FlipBackTimers {
    /// Creates timers with the given delay, plus the receiving end of the
    /// delivery channel.
    #[instrument]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<FlipBack>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timers = Self {
            delay,
            tx,
            pending: Vec::new(),
        };
        (timers, rx)
    }

    /// Delay between a mismatch and its flip-back.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of flip-backs that have not fired yet.
    pub fn outstanding(&self) -> usize {
        self.pending.iter().filter(|handle| !handle.is_finished()).count()
    }
}

impl FlipScheduler for FlipBackTimers {
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    fn schedule(&mut self, flip: FlipBack) {
        self.pending.retain(|handle| !handle.is_finished());

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!(?flip, "Flip-back timer fired");
            // The receiver is gone only when the UI has shut down.
            let _ = tx.send(flip);
        }));
        debug!(pending = self.pending.len(), "Flip-back scheduled");
    }

    #[instrument(skip(self))]
    fn cancel_all(&mut self) {
        let count = self.pending.len();
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        if count > 0 {
            debug!(count, "Cancelled pending flip-backs");
        }
    }
}

impl Drop for FlipBackTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
