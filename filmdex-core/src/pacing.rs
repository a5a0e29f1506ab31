//! Request pacing between consecutive provider calls.
//!
//! OMDb's free tier throttles aggressive clients, so the search pipeline
//! inserts a small delay after every detail request. The pacer is a trait
//! so tests can count pauses instead of sleeping through them.

use std::time::Duration;

use async_trait::async_trait;

/// Trait for pacing consecutive outbound requests.
#[async_trait]
pub trait RequestPacer: Send + Sync + std::fmt::Debug {
    /// Waits out one pacing interval.
    async fn pause(&self);
}

/// Pacer that sleeps for a fixed duration on every pause.
#[derive(Debug, Clone)]
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    /// Creates a pacer sleeping `delay` per pause.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl RequestPacer for FixedDelayPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Pacer that records pause counts without sleeping.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct CountingPacer {
    pauses: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl CountingPacer {
    /// Creates a pacer with a zeroed pause counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pauses taken so far.
    pub fn pauses(&self) -> usize {
        self.pauses.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RequestPacer for CountingPacer {
    async fn pause(&self) {
        self.pauses
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn test_fixed_delay_pacer_waits() {
        let pacer = FixedDelayPacer::new(Duration::from_millis(10));

        let start = Instant::now();
        pacer.pause().await;

        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_counting_pacer_records_pauses() {
        let pacer = CountingPacer::new();
        assert_eq!(pacer.pauses(), 0);

        pacer.pause().await;
        pacer.pause().await;
        pacer.pause().await;

        assert_eq!(pacer.pauses(), 3);
    }
}
