//! Structured logging setup.
//!
//! The trie logs through `tracing`: per-node misses at `debug`, resolved
//! paths at `info` and misses or slow matches at `warn`. This module wires
//! a `tracing-subscriber` stack for binaries, tests and benches that want
//! to see those events.
//!
//! ## Environment Variables
//!
//! - `TRIE_LOG_LEVEL`: trace/debug/info/warn/error (default `info`)
//! - `TRIE_LOG_FORMAT`: json/pretty (default `json`)
//! - `TRIE_LOG_SAMPLING_MODE`: all/error-only/sampled (default `all`)
//! - `TRIE_LOG_SAMPLING_RATE`: 0.0-1.0 for `sampled` (default `0.1`)
//! - `TRIE_LOG_TARGET_FILTER`: extra comma-separated filter directives
//! - `TRIE_LOG_INCLUDE_LOCATION`: include file:line (default `false`)
//!
//! `RUST_LOG`, when set, takes precedence over `TRIE_LOG_LEVEL`.

use anyhow::{Context, Result};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::{Context as LayerContext, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Sampling mode: how to decide which logs to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Log everything
    All,
    /// Log only WARN and ERROR levels
    ErrorOnly,
    /// Sample info/debug events, log every warning and error
    Sampled,
}

impl SamplingMode {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error-only" | "error_only" => SamplingMode::ErrorOnly,
            "sampled" => SamplingMode::Sampled,
            _ => SamplingMode::All,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    pub sampling_mode: SamplingMode,
    /// Sampling rate (0.0-1.0) for Sampled mode
    pub sampling_rate: f64,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location (dev only)
    pub include_location: bool,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("TRIE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("TRIE_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            sampling_mode: SamplingMode::parse(
                &env::var("TRIE_LOG_SAMPLING_MODE").unwrap_or_else(|_| "all".to_string()),
            ),
            sampling_rate: env::var("TRIE_LOG_SAMPLING_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.1),
            target_filter: env::var("TRIE_LOG_TARGET_FILTER").ok(),
            include_location: env::var("TRIE_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Verbose pretty output, handy in tests
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            sampling_mode: SamplingMode::All,
            sampling_rate: 1.0,
            target_filter: None,
            include_location: true,
        }
    }
}

/// Drops a share of low-severity events according to [`SamplingMode`].
pub struct SamplingLayer {
    mode: SamplingMode,
    sampling_rate: f64,
    counter: AtomicU64,
}

impl SamplingLayer {
    #[must_use]
    pub fn new(mode: SamplingMode, sampling_rate: f64) -> Self {
        Self {
            mode,
            sampling_rate: sampling_rate.clamp(0.0, 1.0),
            counter: AtomicU64::new(0),
        }
    }

    fn should_sample(&self, metadata: &Metadata<'_>) -> bool {
        let severe = matches!(*metadata.level(), Level::WARN | Level::ERROR);
        match self.mode {
            SamplingMode::All => true,
            SamplingMode::ErrorOnly => severe,
            SamplingMode::Sampled => {
                if severe || metadata.is_span() {
                    return true;
                }
                if self.sampling_rate <= 0.0 {
                    return false;
                }
                let count = self.counter.fetch_add(1, Ordering::Relaxed);
                let interval = (1.0 / self.sampling_rate) as u64;
                interval > 0 && count % interval == 0
            }
        }
    }
}

impl<S> Layer<S> for SamplingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: LayerContext<'_, S>) -> bool {
        self.should_sample(metadata)
    }

    fn on_event(&self, _event: &Event<'_>, _ctx: LayerContext<'_, S>) {}
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
///
/// ```no_run
/// use trierouter::logging::{init_logging_with_config, LogConfig};
///
/// init_logging_with_config(&LogConfig::from_env()).expect("Failed to initialize logging");
/// ```
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let level = parse_level(&config.log_level);
    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if let Some(target_filter) = &config.target_filter {
        for filter in target_filter.split(',').map(str::trim) {
            if filter.is_empty() {
                continue;
            }
            let directive: Directive = filter
                .parse()
                .with_context(|| format!("Invalid log filter directive: {filter}"))?;
            env_filter = env_filter.add_directive(directive);
        }
    }

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_span_list(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(SamplingLayer::new(config.sampling_mode, config.sampling_rate))
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default_dev() {
        let config = LogConfig::default_dev();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.sampling_mode, SamplingMode::All);
        assert!(config.include_location);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Json);
    }

    #[test]
    fn test_sampling_mode_parse() {
        assert_eq!(SamplingMode::parse("all"), SamplingMode::All);
        assert_eq!(SamplingMode::parse("error-only"), SamplingMode::ErrorOnly);
        assert_eq!(SamplingMode::parse("error_only"), SamplingMode::ErrorOnly);
        assert_eq!(SamplingMode::parse("sampled"), SamplingMode::Sampled);
        assert_eq!(SamplingMode::parse("invalid"), SamplingMode::All);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("nonsense"), Level::INFO);
    }

    // ========================================================================
    // SamplingLayer Tests
    // ========================================================================

    fn metadata(level: Level, kind: tracing::metadata::Kind) -> Metadata<'static> {
        Metadata::new(
            "test",
            "trierouter::test",
            level,
            None,
            None,
            None,
            tracing::field::FieldSet::new(&[], tracing::callsite::Identifier(&CALLSITE)),
            kind,
        )
    }

    fn event(level: Level) -> Metadata<'static> {
        metadata(level, tracing::metadata::Kind::EVENT)
    }

    #[test]
    fn test_sampling_layer_all_mode() {
        let layer = SamplingLayer::new(SamplingMode::All, 0.0);
        assert!(layer.should_sample(&event(Level::DEBUG)));
        assert!(layer.should_sample(&event(Level::INFO)));
    }

    #[test]
    fn test_sampling_layer_error_only_mode() {
        let layer = SamplingLayer::new(SamplingMode::ErrorOnly, 1.0);
        assert!(!layer.should_sample(&event(Level::INFO)));
        assert!(!layer.should_sample(&event(Level::DEBUG)));
        assert!(layer.should_sample(&event(Level::WARN)));
        assert!(layer.should_sample(&event(Level::ERROR)));
    }

    #[test]
    fn test_sampling_layer_sampled_mode_always_logs_warnings() {
        let layer = SamplingLayer::new(SamplingMode::Sampled, 0.1);
        for _ in 0..100 {
            assert!(layer.should_sample(&event(Level::WARN)));
            assert!(layer.should_sample(&event(Level::ERROR)));
        }
    }

    #[test]
    fn test_sampling_layer_sampled_mode_respects_rate() {
        let layer = SamplingLayer::new(SamplingMode::Sampled, 0.5);
        let info = event(Level::INFO);
        let sampled_count = (0..100).filter(|_| layer.should_sample(&info)).count();
        // Every second low-severity event passes.
        assert_eq!(sampled_count, 50);
    }

    #[test]
    fn test_sampling_layer_zero_rate_drops_low_severity() {
        let layer = SamplingLayer::new(SamplingMode::Sampled, 0.0);
        for _ in 0..10 {
            assert!(!layer.should_sample(&event(Level::INFO)));
        }
        assert!(layer.should_sample(&event(Level::WARN)));
        // Spans are kept so sampled events still have their context.
        assert!(layer.should_sample(&metadata(Level::INFO, tracing::metadata::Kind::SPAN)));
    }

    #[test]
    fn test_sampling_rate_clamping() {
        let layer1 = SamplingLayer::new(SamplingMode::Sampled, -0.5);
        assert_eq!(layer1.sampling_rate, 0.0);

        let layer2 = SamplingLayer::new(SamplingMode::Sampled, 1.5);
        assert_eq!(layer2.sampling_rate, 1.0);

        let layer3 = SamplingLayer::new(SamplingMode::Sampled, 0.5);
        assert_eq!(layer3.sampling_rate, 0.5);
    }

    // ========================================================================
    // Initialization Tests
    // ========================================================================

    #[test]
    fn test_init_rejects_invalid_target_filter() {
        let config = LogConfig {
            target_filter: Some("trierouter=not_a_level".to_string()),
            ..LogConfig::default_dev()
        };
        let err = init_logging_with_config(&config).unwrap_err();
        assert!(err.to_string().contains("trierouter=not_a_level"));
    }

    #[test]
    fn test_init_twice_fails() {
        let config = LogConfig {
            log_level: "warn".to_string(),
            target_filter: Some(" , trierouter=warn".to_string()),
            ..LogConfig::default_dev()
        };
        // The first call may install the subscriber; a second one never can.
        let _first = init_logging_with_config(&config);
        assert!(init_logging_with_config(&config).is_err());
    }

    struct TestCallsite;
    impl tracing::callsite::Callsite for TestCallsite {
        fn set_interest(&self, _interest: tracing::subscriber::Interest) {}
        fn metadata(&self) -> &tracing::Metadata<'_> {
            unreachable!("not used in tests")
        }
    }
    static CALLSITE: TestCallsite = TestCallsite;
}
