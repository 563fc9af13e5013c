//! # Error Module
//!
//! Every failure in the trie is a typed [`RouterError`] value. Nothing in
//! the matching or merge paths panics.
//!
//! ## Taxonomy
//!
//! - **Match-time**: [`RouterError::NotFound`], [`RouterError::NoExecutor`],
//!   [`RouterError::NoInspector`]. Ordinary control flow: an enclosing router
//!   may try a sibling or answer with a 404.
//! - **Build-time**: the mismatch variants, [`RouterError::InvalidPattern`],
//!   [`RouterError::InvalidCapture`] and [`RouterError::DuplicateExecutor`].
//!   These are programmer errors and should abort registration.
//! - **Run-time**: [`RouterError::Execution`] is produced when a resolved
//!   unit of work fails while running.
//!
//! Errors coming back from children or handler collaborators are passed
//! through unchanged.

use std::fmt;

use crate::router::RouteKind;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Errors produced while matching, merging or building router nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No rule at this node accepts the current segment.
    NotFound,
    /// The two nodes being merged are of a different concrete shape.
    ///
    /// Both shapes may report the same [`RouteKind`], so the shape names are
    /// carried alongside it for diagnostics.
    KindMismatch {
        /// Kind reported by the receiving node
        kind: RouteKind,
        /// Shape of the receiving node
        expected: &'static str,
        /// Shape of the absorbed node
        found: &'static str,
    },
    /// Two regexp nodes with different expressions.
    PatternMismatch {
        /// Expression of the receiving node
        expected: String,
        /// Expression of the absorbed node
        found: String,
    },
    /// Two full-match nodes capturing into different keys.
    KeyMismatch {
        /// Key of the receiving node
        expected: String,
        /// Key of the absorbed node
        found: String,
    },
    /// The expression could not be compiled.
    InvalidPattern {
        /// Source expression
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },
    /// A capture index does not fit the expression it belongs to.
    InvalidCapture {
        /// Offending key
        key: String,
        /// Offending submatch position
        position: usize,
        /// Number of capture groups in the expression (slot 0 excluded)
        groups: usize,
    },
    /// Terminal resolution reached a node without executors.
    NoExecutor,
    /// Executors exist but none of them accepts the request context.
    NoInspector,
    /// Handler merge found the same executor name on both sides.
    DuplicateExecutor {
        /// Name of the conflicting executor
        name: String,
    },
    /// The resolved unit of work failed while running.
    Execution(String),
}

impl RouterError {
    /// True for [`RouterError::NotFound`].
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouterError::NotFound)
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::NotFound => write!(f, "router not found"),
            RouterError::KindMismatch {
                kind,
                expected,
                found,
            } => write!(
                f,
                "can't merge {found} node into {expected} node (kind {kind})"
            ),
            RouterError::PatternMismatch { expected, found } => write!(
                f,
                "can't merge regexp nodes with different expressions: {expected} and {found}"
            ),
            RouterError::KeyMismatch { expected, found } => write!(
                f,
                "can't merge full-match nodes with different keys: {expected} and {found}"
            ),
            RouterError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid regexp '{pattern}': {reason}")
            }
            RouterError::InvalidCapture {
                key,
                position,
                groups,
            } => write!(
                f,
                "invalid capture '{key}' at position {position} (expression has {groups} groups)"
            ),
            RouterError::NoExecutor => write!(f, "no executor registered at matched node"),
            RouterError::NoInspector => {
                write!(f, "no executor at matched node accepts the request context")
            }
            RouterError::DuplicateExecutor { name } => {
                write!(f, "executor '{name}' is registered twice at the same node")
            }
            RouterError::Execution(msg) => write!(f, "execution failed: {msg}"),
        }
    }
}

impl std::error::Error for RouterError {}

