use std::fmt;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::children::Children;
use crate::container::Container;
use crate::context::RequestContext;
use crate::error::{Result, RouterError};
use crate::executor::MiddlewareExecutor;
use crate::handler::Handler;
use crate::runtime_config::RuntimeConfig;

use super::core::{CaptureIndex, RouteKind, Router, SEPARATOR};
use super::merge;

/// Node matching one segment against a compiled regular expression.
pub struct RegexpNode {
    handler: Handler,
    children: Children,
    /// Positions to read values from in the submatches.
    indices: Vec<CaptureIndex>,
    /// Expression source; `regexp` is always compiled from it.
    exp: String,
    regexp: Regex,
}

impl RegexpNode {
    /// Compile `exp` with the default [`RuntimeConfig`].
    pub fn new(exp: &str, indices: Vec<CaptureIndex>) -> Result<Self> {
        Self::compile(exp, indices, &RuntimeConfig::default())
    }

    /// Keys read submatches in order: `keys[0]` is group 1, and so on.
    pub fn with_keys(exp: &str, keys: &[&str]) -> Result<Self> {
        let indices = keys
            .iter()
            .enumerate()
            .map(|(i, key)| CaptureIndex::new(*key, i + 1))
            .collect();
        Self::new(exp, indices)
    }

    /// One capture per named group of `exp`, keyed by the group name.
    pub fn from_named_groups(exp: &str) -> Result<Self> {
        let regexp = build_regex(exp, &RuntimeConfig::default())?;
        let indices = regexp
            .capture_names()
            .enumerate()
            .filter_map(|(pos, name)| name.map(|name| CaptureIndex::new(name, pos)))
            .collect();
        Self::assemble(exp, regexp, indices)
    }

    /// Compile `exp` honoring the regex size limit from `config`.
    pub fn compile(exp: &str, indices: Vec<CaptureIndex>, config: &RuntimeConfig) -> Result<Self> {
        let regexp = build_regex(exp, config)?;
        Self::assemble(exp, regexp, indices)
    }

    fn assemble(exp: &str, regexp: Regex, indices: Vec<CaptureIndex>) -> Result<Self> {
        validate_indices(&indices, regexp.captures_len() - 1)?;
        Ok(Self {
            handler: Handler::new(),
            children: Children::new(),
            indices,
            exp: exp.to_owned(),
            regexp,
        })
    }

    #[must_use]
    pub fn indices(&self) -> &[CaptureIndex] {
        &self.indices
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut Handler {
        &mut self.handler
    }

    #[must_use]
    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// Absorb `other`, which must carry the same expression.
    pub fn merge(&mut self, other: RegexpNode) -> Result<()> {
        if self.exp != other.exp {
            return Err(RouterError::PatternMismatch {
                expected: self.exp.clone(),
                found: other.exp,
            });
        }
        merge::merge_components(
            &mut self.handler,
            &mut self.children,
            other.handler,
            other.children,
        )
    }

    pub fn check_merge(&self, other: &RegexpNode) -> Result<()> {
        if self.exp != other.exp {
            return Err(RouterError::PatternMismatch {
                expected: self.exp.clone(),
                found: other.exp.clone(),
            });
        }
        merge::check_components(&self.handler, &self.children, &other.handler, &other.children)
    }
}

impl Router for RegexpNode {
    fn kind(&self) -> RouteKind {
        RouteKind::Regexp
    }

    fn target(&self) -> &str {
        &self.exp
    }

    fn match_path(
        &self,
        ctx: &RequestContext,
        c: &mut dyn Container,
        path: &str,
    ) -> Result<MiddlewareExecutor> {
        let index = path.find(SEPARATOR).unwrap_or(path.len());
        let segment = &path[..index];
        let Some(result) = self.regexp.captures(segment) else {
            debug!(pattern = %self.exp, segment = %segment, "Regexp node did not match segment");
            return Err(RouterError::NotFound);
        };

        let executor = if index < path.len() {
            let downstream = self.children.match_path(ctx, c, &path[index..])?;
            self.handler.pack(downstream)?
        } else {
            self.handler.union_executor(ctx)?
        };

        // Downstream resolved: commit captures.
        for i in &self.indices {
            c.set(&i.key, result.get(i.position).map_or("", |m| m.as_str()));
        }
        Ok(executor)
    }
}

impl fmt::Debug for RegexpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexpNode")
            .field("exp", &self.exp)
            .field("indices", &self.indices)
            .field("children", &self.children.len())
            .finish()
    }
}

fn build_regex(exp: &str, config: &RuntimeConfig) -> Result<Regex> {
    RegexBuilder::new(exp)
        .size_limit(config.regex_size_limit)
        .build()
        .map_err(|err| RouterError::InvalidPattern {
            pattern: exp.to_owned(),
            reason: err.to_string(),
        })
}

fn validate_indices(indices: &[CaptureIndex], groups: usize) -> Result<()> {
    for (n, index) in indices.iter().enumerate() {
        let duplicate = indices[..n].iter().any(|prev| prev.key == index.key);
        if index.key.is_empty() || duplicate || index.position == 0 || index.position > groups {
            return Err(RouterError::InvalidCapture {
                key: index.key.clone(),
                position: index.position,
                groups,
            });
        }
    }
    Ok(())
}
