use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use super::Middleware;
use crate::context::RequestContext;

/// Middleware counting executions that pass through a node.
///
/// All counters use atomic operations, so one instance can be shared by
/// every concurrent match that resolves through its node.
#[derive(Default)]
pub struct MetricsMiddleware {
    request_count: AtomicUsize,
    completed_count: AtomicUsize,
    total_latency_ns: AtomicU64,
}

impl MetricsMiddleware {
    /// Create a new metrics middleware with all counters initialized to zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of executions that entered this middleware
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Number of executions that left this middleware
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_count.load(Ordering::Relaxed)
    }

    /// Mean latency across completed executions.
    /// Returns zero duration if nothing has completed yet.
    #[must_use]
    pub fn average_latency(&self) -> Duration {
        let count = self.completed_count.load(Ordering::Relaxed) as u64;
        if count == 0 {
            Duration::from_nanos(0)
        } else {
            Duration::from_nanos(self.total_latency_ns.load(Ordering::Relaxed) / count)
        }
    }
}

impl Middleware for MetricsMiddleware {
    fn before(&self, _ctx: &mut RequestContext) -> anyhow::Result<()> {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn after(&self, _ctx: &mut RequestContext, latency: Duration) {
        self.completed_count.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ns
            .fetch_add(latency.as_nanos() as u64, Ordering::Relaxed);
    }
}
