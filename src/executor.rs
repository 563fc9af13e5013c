//! # Executor Module
//!
//! The unit of work handed back to the caller once a path is fully
//! matched.
//!
//! A node never runs anything itself. Terminal nodes pick an [`Executor`]
//! and wrap their middlewares around it; every ancestor on the way back up
//! wraps its own middlewares around the result. The caller receives a
//! [`MiddlewareExecutor`] and runs it whenever it likes.
//!
//! ```rust
//! use trierouter::context::RequestContext;
//! use trierouter::executor::{FnExecutor, MiddlewareExecutor};
//! use std::sync::Arc;
//!
//! let exec = MiddlewareExecutor::new(Arc::new(FnExecutor::new("hello", |ctx| {
//!     ctx.set("greeting", "hi");
//!     Ok(())
//! })));
//! let mut ctx = RequestContext::new();
//! exec.execute(&mut ctx).unwrap();
//! assert_eq!(ctx.get("greeting"), Some("hi"));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use crate::context::RequestContext;
use crate::error::{Result, RouterError};
use crate::middleware::Middleware;

/// A terminal handler registered at a node.
pub trait Executor: Send + Sync {
    /// Name used for diagnostics and duplicate detection on merge.
    fn name(&self) -> &str;

    /// Whether this executor applies to the request described by `ctx`.
    fn inspect(&self, _ctx: &RequestContext) -> bool {
        true
    }

    fn execute(&self, ctx: &mut RequestContext) -> anyhow::Result<()>;
}

type Inspector = dyn Fn(&RequestContext) -> bool + Send + Sync;
type Body = dyn Fn(&mut RequestContext) -> anyhow::Result<()> + Send + Sync;

/// [`Executor`] built from closures.
pub struct FnExecutor {
    name: String,
    inspector: Option<Box<Inspector>>,
    body: Box<Body>,
}

impl FnExecutor {
    /// An executor that accepts every context.
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut RequestContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            inspector: None,
            body: Box::new(body),
        }
    }

    /// Restrict the executor to contexts accepted by `inspector`.
    #[must_use]
    pub fn with_inspector<P>(mut self, inspector: P) -> Self
    where
        P: Fn(&RequestContext) -> bool + Send + Sync + 'static,
    {
        self.inspector = Some(Box::new(inspector));
        self
    }
}

impl Executor for FnExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    fn inspect(&self, ctx: &RequestContext) -> bool {
        self.inspector.as_ref().map_or(true, |p| p(ctx))
    }

    fn execute(&self, ctx: &mut RequestContext) -> anyhow::Result<()> {
        (self.body)(ctx)
    }
}

/// Composed handler chain: middlewares (outermost first) around one executor.
#[derive(Clone)]
pub struct MiddlewareExecutor {
    middlewares: Vec<Arc<dyn Middleware>>,
    executor: Arc<dyn Executor>,
}

impl MiddlewareExecutor {
    /// Bare executor with no middleware.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            middlewares: Vec::new(),
            executor,
        }
    }

    /// Put `outer` in front of the current chain.
    #[must_use]
    pub fn wrap(self, outer: &[Arc<dyn Middleware>]) -> Self {
        if outer.is_empty() {
            return self;
        }
        let mut middlewares = Vec::with_capacity(outer.len() + self.middlewares.len());
        middlewares.extend(outer.iter().map(Arc::clone));
        middlewares.extend(self.middlewares);
        Self {
            middlewares,
            executor: self.executor,
        }
    }

    /// Name of the terminal executor.
    #[must_use]
    pub fn name(&self) -> &str {
        self.executor.name()
    }

    #[must_use]
    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// Run the chain against `ctx`.
    pub fn execute(&self, ctx: &mut RequestContext) -> Result<()> {
        let start = Instant::now();
        let mut entered = 0;
        let mut outcome = Ok(());
        for middleware in &self.middlewares {
            if let Err(err) = middleware.before(ctx) {
                outcome = Err(err);
                break;
            }
            entered += 1;
        }
        if outcome.is_ok() {
            outcome = self.executor.execute(ctx);
        }
        let latency = start.elapsed();
        for middleware in self.middlewares[..entered].iter().rev() {
            middleware.after(ctx, latency);
        }

        outcome.map_err(|err| {
            warn!(
                executor = %self.executor.name(),
                error = %err,
                duration_us = latency.as_micros() as u64,
                "Executor chain failed"
            );
            RouterError::Execution(format!("{err:#}"))
        })
    }
}

impl fmt::Debug for MiddlewareExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareExecutor")
            .field("executor", &self.executor.name())
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Middleware for Recorder {
        fn before(&self, _ctx: &mut RequestContext) -> anyhow::Result<()> {
            self.log.lock().unwrap().push(format!("before:{}", self.tag));
            if self.fail {
                anyhow::bail!("{} refused", self.tag);
            }
            Ok(())
        }
        fn after(&self, _ctx: &mut RequestContext, _latency: Duration) {
            self.log.lock().unwrap().push(format!("after:{}", self.tag));
        }
    }

    fn recorder(tag: &'static str, log: &Arc<Mutex<Vec<String>>>, fail: bool) -> Arc<dyn Middleware> {
        Arc::new(Recorder {
            tag,
            log: Arc::clone(log),
            fail,
        })
    }

    #[test]
    fn test_chain_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let body_log = Arc::clone(&log);
        let exec = MiddlewareExecutor::new(Arc::new(FnExecutor::new("leaf", move |_| {
            body_log.lock().unwrap().push("exec".to_string());
            Ok(())
        })))
        .wrap(&[recorder("inner", &log, false)])
        .wrap(&[recorder("outer", &log, false)]);

        assert_eq!(exec.middleware_count(), 2);
        exec.execute(&mut RequestContext::new()).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "before:outer",
                "before:inner",
                "exec",
                "after:inner",
                "after:outer"
            ]
        );
    }

    #[test]
    fn test_failing_before_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let exec = MiddlewareExecutor::new(Arc::new(FnExecutor::new("leaf", |_| {
            panic!("executor must not run")
        })))
        .wrap(&[recorder("outer", &log, false), recorder("guard", &log, true)]);

        let err = exec.execute(&mut RequestContext::new()).unwrap_err();
        assert_eq!(err, RouterError::Execution("guard refused".to_string()));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["before:outer", "before:guard", "after:outer"]
        );
    }

    #[test]
    fn test_inspector() {
        let exec = FnExecutor::new("get", |_| Ok(()))
            .with_inspector(|ctx| ctx.get("method") == Some("GET"));
        assert!(exec.inspect(&RequestContext::new().with_attr("method", "GET")));
        assert!(!exec.inspect(&RequestContext::new().with_attr("method", "PUT")));
        assert!(FnExecutor::new("any", |_| Ok(())).inspect(&RequestContext::new()));
    }
}
