//! Deferred squeeze completion.
//!
//! Each started squeeze gets one tokio task that sleeps for the configured
//! delay and then hands the ticket to a callback. The callback normally
//! forwards the ticket into the app event channel so completion runs on the
//! event loop that owns the store.

use super::store::SqueezeTicket;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_SQUEEZE_DELAY: Duration = Duration::from_millis(500);

pub struct SqueezeTimer {
    delay: Duration,
    jobs: Vec<JoinHandle<()>>,
}

impl SqueezeTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            jobs: Vec::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm a completion job for `ticket`. Must be called from within a
    /// tokio runtime.
    pub fn schedule<F>(&mut self, ticket: SqueezeTicket, on_fire: F)
    where
        F: FnOnce(SqueezeTicket) + Send + 'static,
    {
        self.jobs.retain(|job| !job.is_finished());
        let delay = self.delay;
        debug!(id = %ticket.id, seq = ticket.sequence(), ?delay, "squeeze timer armed");
        self.jobs.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire(ticket);
        }));
    }

    /// Number of jobs that have not fired yet.
    pub fn pending_jobs(&self) -> usize {
        self.jobs.iter().filter(|job| !job.is_finished()).count()
    }

    /// Abort every armed job. Returns how many were still pending.
    pub fn cancel_all(&mut self) -> usize {
        let mut cancelled = 0;
        for job in self.jobs.drain(..) {
            if !job.is_finished() {
                cancelled += 1;
            }
            job.abort();
        }
        if cancelled > 0 {
            debug!(cancelled, "squeeze timers cancelled");
        }
        cancelled
    }
}

impl Default for SqueezeTimer {
    fn default() -> Self {
        Self::new(DEFAULT_SQUEEZE_DELAY)
    }
}

impl Drop for SqueezeTimer {
    fn drop(&mut self) {
        for job in &self.jobs {
            job.abort();
        }
    }
}
