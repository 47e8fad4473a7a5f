use std::future::Future;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};

use crate::config::EngineTiming;

/// Fixed-cadence driver for reconciliation passes
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    period: Duration,
}

impl Scheduler {
    pub fn new(timing: &EngineTiming) -> Self {
        Self {
            period: timing.tick_period(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Call `pass` immediately and then once per period until `shutdown`
    /// resolves. Late periods are skipped rather than bunched up.
    /// Returns how many passes ran.
    pub async fn schedule_repeating<F, S>(&self, mut pass: F, shutdown: S) -> u64
    where
        F: FnMut(),
        S: Future<Output = ()>,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut passes = 0;
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    pass();
                    passes += 1;
                }
            }
        }
        tracing::debug!(passes, "Scheduler stopped");
        passes
    }
}
