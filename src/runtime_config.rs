//! # Runtime Configuration Module
//!
//! Environment variable-based tuning for building and matching the trie.
//!
//! ## Environment Variables
//!
//! ### `TRIE_REGEX_SIZE_LIMIT`
//!
//! Upper bound, in bytes, on the compiled program of a single node
//! expression. Accepts values in:
//! - Decimal: `1048576` (1 MiB)
//! - Hexadecimal: `0x100000` (1 MiB)
//!
//! Default: `0x100000` (1 MiB). Expressions over the limit fail to build
//! with [`RouterError::InvalidPattern`](crate::error::RouterError::InvalidPattern).
//!
//! ### `TRIE_SLOW_MATCH_US`
//!
//! Matches taking longer than this many microseconds are logged at `warn`
//! instead of `info` by [`RouteTree::resolve`](crate::tree::RouteTree::resolve).
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use trierouter::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Regex size limit: {} bytes", config.regex_size_limit);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_REGEX_SIZE_LIMIT: usize = 0x10_0000;
const DEFAULT_SLOW_MATCH_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Compiled size limit per node expression in bytes (default: 1 MiB)
    pub regex_size_limit: usize,
    /// Threshold above which a match is reported as slow (default: 1 ms)
    pub slow_match_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let regex_size_limit = lookup("TRIE_REGEX_SIZE_LIMIT")
            .and_then(|val| parse_size(&val))
            .unwrap_or(DEFAULT_REGEX_SIZE_LIMIT);
        let slow_match_us = lookup("TRIE_SLOW_MATCH_US")
            .and_then(|val| val.trim().parse().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        RuntimeConfig {
            regex_size_limit,
            slow_match_threshold: Duration::from_micros(slow_match_us),
        }
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(RuntimeConfig::from_lookup(lookup(&[])), RuntimeConfig::default());
    }

    #[test]
    fn test_hex_and_decimal() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[
            ("TRIE_REGEX_SIZE_LIMIT", "0x8000"),
            ("TRIE_SLOW_MATCH_US", "250"),
        ]));
        assert_eq!(cfg.regex_size_limit, 0x8000);
        assert_eq!(cfg.slow_match_threshold, Duration::from_micros(250));

        let cfg = RuntimeConfig::from_lookup(lookup(&[("TRIE_REGEX_SIZE_LIMIT", "4096")]));
        assert_eq!(cfg.regex_size_limit, 4096);
    }

    #[test]
    fn test_garbage_falls_back() {
        let cfg = RuntimeConfig::from_lookup(lookup(&[
            ("TRIE_REGEX_SIZE_LIMIT", "lots"),
            ("TRIE_SLOW_MATCH_US", "-1"),
        ]));
        assert_eq!(cfg, RuntimeConfig::default());
    }
}
