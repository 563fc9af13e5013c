use std::time::Duration;

use tracing::{debug, info_span};

use super::Middleware;
use crate::context::RequestContext;

/// Emits a span-scoped debug event on entry and exit of a node's chain.
///
/// The label identifies the node the middleware was registered on, usually
/// its target.
pub struct TracingMiddleware {
    label: String,
}

impl TracingMiddleware {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Middleware for TracingMiddleware {
    fn before(&self, _ctx: &mut RequestContext) -> anyhow::Result<()> {
        let span = info_span!("node", label = %self.label);
        let _guard = span.enter();
        debug!("entering node middleware");
        Ok(())
    }

    fn after(&self, _ctx: &mut RequestContext, latency: Duration) {
        let span = info_span!("node", label = %self.label);
        let _guard = span.enter();
        debug!(latency_us = latency.as_micros() as u64, "leaving node middleware");
    }
}
