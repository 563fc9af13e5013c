use std::time::Duration;

use crate::context::RequestContext;

/// Hooks wrapped around a resolved executor.
///
/// `before` hooks run outermost first; a failing `before` stops the chain
/// and the executor is not run. `after` hooks run in reverse order for
/// every middleware whose `before` succeeded.
pub trait Middleware: Send + Sync {
    fn before(&self, _ctx: &mut RequestContext) -> anyhow::Result<()> {
        Ok(())
    }
    fn after(&self, _ctx: &mut RequestContext, _latency: Duration) {}
}
