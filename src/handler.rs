//! Per-node handler collaborator: middlewares plus terminal executors.

use std::sync::Arc;

use tracing::debug;

use crate::context::RequestContext;
use crate::error::{Result, RouterError};
use crate::executor::{Executor, MiddlewareExecutor};
use crate::middleware::Middleware;

/// Middlewares and executors registered at one node.
#[derive(Clone, Default)]
pub struct Handler {
    middlewares: Vec<Arc<dyn Middleware>>,
    executors: Vec<Arc<dyn Executor>>,
}

impl Handler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
        self.middlewares.push(middleware);
    }

    pub fn add_executor(&mut self, executor: Arc<dyn Executor>) {
        self.executors.push(executor);
    }

    #[must_use]
    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// Names of the registered executors, in registration order.
    pub fn executor_names(&self) -> impl Iterator<Item = &str> {
        self.executors.iter().map(|e| e.name())
    }

    /// Wrap this node's middlewares around a downstream unit of work.
    pub fn pack(&self, downstream: MiddlewareExecutor) -> Result<MiddlewareExecutor> {
        Ok(downstream.wrap(&self.middlewares))
    }

    /// Pick the first executor accepting `ctx` and wrap this node's
    /// middlewares around it.
    pub fn union_executor(&self, ctx: &RequestContext) -> Result<MiddlewareExecutor> {
        if self.executors.is_empty() {
            return Err(RouterError::NoExecutor);
        }
        let executor = self
            .executors
            .iter()
            .find(|e| e.inspect(ctx))
            .ok_or(RouterError::NoInspector)?;
        debug!(executor = %executor.name(), "Executor selected");
        self.pack(MiddlewareExecutor::new(Arc::clone(executor)))
    }

    /// Check that `other` can be merged into `self` without conflicts.
    ///
    /// Names repeated inside `other` conflict as well.
    pub fn check_merge(&self, other: &Handler) -> Result<()> {
        for (n, executor) in other.executors.iter().enumerate() {
            let earlier = other.executors[..n].iter().map(|e| e.name());
            if self
                .executor_names()
                .chain(earlier)
                .any(|name| name == executor.name())
            {
                return Err(RouterError::DuplicateExecutor {
                    name: executor.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Absorb `other`: its middlewares run after ours, its executors are
    /// tried after ours. Fails without mutating on a duplicate executor name.
    pub fn merge(&mut self, other: Handler) -> Result<()> {
        self.check_merge(&other)?;
        self.middlewares.extend(other.middlewares);
        self.executors.extend(other.executors);
        Ok(())
    }
}
