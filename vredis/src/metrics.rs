//! Session metrics.
//!
//! Enable the `metrics` feature to record these through the [`metrics`] facade.
//! Without it every `record_*` function is an empty inline no-op.
//!
//! ## Naming Pattern
//!
//! All metrics follow the pattern `vredis_{subject}_{metric_type}`:
//!
//! - `vredis_commands_total`, `vredis_command_duration_seconds` - per verb
//! - `vredis_command_failures_total` - per failure class
//! - `vredis_script_cache_total` - `EVALSHA` outcomes (`hit` / `noscript`)
//! - `vredis_connects_total` - connection attempts (`ok` / `failed`)
//!
//! [`metrics`]: https://docs.rs/metrics

use std::time::Duration;

#[cfg(feature = "metrics")]
use std::time::Instant;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

/// Zero-cost timer for metrics collection.
///
/// When the `metrics` feature is enabled, this captures the start time.
/// When disabled, this is a zero-sized struct with no overhead.
pub struct Timer {
    #[cfg(feature = "metrics")]
    start: Instant,
}

impl Timer {
    /// Create a new timer, capturing the current instant if metrics enabled.
    #[inline]
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "metrics")]
            start: Instant::now(),
        }
    }

    /// Returns the elapsed time, or `Duration::ZERO` without metrics.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        #[cfg(feature = "metrics")]
        {
            self.start.elapsed()
        }
        #[cfg(not(feature = "metrics"))]
        {
            Duration::ZERO
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a command produced no usable reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The connection failed while sending or reading.
    Transport,
    /// No reply was read but the connection stayed healthy.
    NoReply,
    /// The server answered with an error reply.
    ErrorReply,
}

impl FailureClass {
    /// Label value for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureClass::Transport => "transport",
            FailureClass::NoReply => "no_reply",
            FailureClass::ErrorReply => "error_reply",
        }
    }
}

/// Outcome of an `EVALSHA` attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCache {
    /// The server knew the script; no `EVAL` was needed.
    Hit,
    /// The server answered `NOSCRIPT`; the full script was sent.
    NoScript,
}

impl ScriptCache {
    /// Label value for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptCache::Hit => "hit",
            ScriptCache::NoScript => "noscript",
        }
    }
}

#[cfg(feature = "metrics")]
lazy_static! {
    /// Metric name for executed commands counter.
    pub static ref COMMANDS_TOTAL: &'static str = {
        metrics::describe_counter!(
            "vredis_commands_total",
            "Total number of commands sent to Redis per verb."
        );
        "vredis_commands_total"
    };

    /// Metric name for command duration histogram.
    pub static ref COMMAND_DURATION: &'static str = {
        metrics::describe_histogram!(
            "vredis_command_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of command round trips in seconds, fallbacks included."
        );
        "vredis_command_duration_seconds"
    };

    /// Metric name for failed commands counter.
    pub static ref COMMAND_FAILURES: &'static str = {
        metrics::describe_counter!(
            "vredis_command_failures_total",
            "Total number of commands without a usable reply per failure class."
        );
        "vredis_command_failures_total"
    };

    /// Metric name for EVALSHA outcomes counter.
    pub static ref SCRIPT_CACHE: &'static str = {
        metrics::describe_counter!(
            "vredis_script_cache_total",
            "Total number of EVALSHA attempts per outcome."
        );
        "vredis_script_cache_total"
    };

    /// Metric name for connection attempts counter.
    pub static ref CONNECTS_TOTAL: &'static str = {
        metrics::describe_counter!(
            "vredis_connects_total",
            "Total number of connection attempts per result."
        );
        "vredis_connects_total"
    };
}

/// Record a command round trip.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_command(verb: &str, duration: Duration) {
    metrics::counter!(*COMMANDS_TOTAL, "verb" => verb.to_string()).increment(1);
    metrics::histogram!(*COMMAND_DURATION, "verb" => verb.to_string())
        .record(duration.as_secs_f64());
}

/// Record a command round trip (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_command(_verb: &str, _duration: Duration) {}

/// Record a command failure.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_failure(class: FailureClass) {
    metrics::counter!(*COMMAND_FAILURES, "class" => class.as_str()).increment(1);
}

/// Record a command failure (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_failure(_class: FailureClass) {}

/// Record an `EVALSHA` outcome.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_script_cache(outcome: ScriptCache) {
    metrics::counter!(*SCRIPT_CACHE, "outcome" => outcome.as_str()).increment(1);
}

/// Record an `EVALSHA` outcome (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_script_cache(_outcome: ScriptCache) {}

/// Record a connection attempt.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_connect(ok: bool) {
    let result = if ok { "ok" } else { "failed" };
    metrics::counter!(*CONNECTS_TOTAL, "result" => result).increment(1);
}

/// Record a connection attempt (no-op when `metrics` feature disabled).
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_connect(_ok: bool) {}
