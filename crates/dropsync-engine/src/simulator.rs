//! Simulated upload transfer.
//!
//! No bytes move anywhere: a transfer is a timed progress ramp from 0 to 100.
//! The trait seam lets tests substitute deterministic pacing or a rejecting
//! transfer without touching the intake loop.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;
use uuid::Uuid;

/// Receiver for per-file progress values in [0,100].
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn update(&self, file_id: Uuid, percent: f32);
}

/// Transfer failure. The default simulated transfer never produces one;
/// the variant exists for alternative implementations and test doubles.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransferError {
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Per-file asynchronous transfer driver.
///
/// Implementations must be independent per file id: concurrent runs for
/// different ids do not interact.
#[async_trait]
pub trait TransferSimulator: Send + Sync {
    /// Drive one file's transfer to completion, emitting progress through
    /// the sink. Resolves exactly once progress reaches 100.
    async fn run(&self, file_id: Uuid, progress: &dyn ProgressSink)
        -> Result<(), TransferError>;
}

/// Pacing of the simulated ramp: each tick advances progress by a step drawn
/// uniformly from `[min_step, max_step)` after waiting an interval drawn
/// uniformly from `[min_interval, max_interval)`.
#[derive(Debug, Clone)]
pub struct PacingPolicy {
    pub min_step: f32,
    pub max_step: f32,
    pub min_interval: Duration,
    pub max_interval: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            min_step: 5.0,
            max_step: 20.0,
            min_interval: Duration::from_millis(200),
            max_interval: Duration::from_millis(500),
        }
    }
}

impl PacingPolicy {
    /// Immediate fixed-step pacing for deterministic runs.
    pub fn fixed(step: f32, interval: Duration) -> Self {
        Self {
            min_step: step,
            max_step: step,
            min_interval: interval,
            max_interval: interval,
        }
    }

    /// Draw one (step, interval) pair. Degenerate ranges collapse to their
    /// lower bound instead of panicking.
    fn sample(&self) -> (f32, Duration) {
        let mut rng = rand::rng();
        let step = if self.max_step > self.min_step {
            rng.random_range(self.min_step..self.max_step)
        } else {
            self.min_step
        };
        let interval = if self.max_interval > self.min_interval {
            let min = self.min_interval.as_millis() as u64;
            let max = self.max_interval.as_millis() as u64;
            Duration::from_millis(rng.random_range(min..max))
        } else {
            self.min_interval
        };
        (step, interval)
    }
}

/// Default transfer: the randomized local ramp. Never fails.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransfer {
    pacing: PacingPolicy,
}

impl SimulatedTransfer {
    pub fn new(pacing: PacingPolicy) -> Self {
        Self { pacing }
    }
}

#[async_trait]
impl TransferSimulator for SimulatedTransfer {
    async fn run(
        &self,
        file_id: Uuid,
        progress: &dyn ProgressSink,
    ) -> Result<(), TransferError> {
        let mut percent: f32 = 0.0;
        while percent < 100.0 {
            let (step, interval) = self.pacing.sample();
            sleep(interval).await;
            percent = (percent + step).min(100.0);
            progress.update(file_id, percent).await;
        }
        Ok(())
    }
}
