//! Output tiers, routing policy, and byte-stream sinks.
//!
//! # Responsibilities
//! - Map severities onto logical output tiers
//! - Write one serialized record per line to the selected stream
//! - Provide an in-memory capture sink for tests
//!
//! # Design Decisions
//! - Four logical tiers; the production sink folds them onto two real
//!   streams (error/warning -> stderr, info/debug -> stdout)
//! - Tier mapping is a configurable policy, not hard-coded in the logger
//! - Write failures are discarded: a logging call must never interrupt
//!   the caller

use std::io::Write;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Logical output tier for an emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Error,
    Warning,
    Info,
    Debug,
}

/// Policy for mapping severities onto tiers.
///
/// `Tiered` is the active default. `Unified` sends every severity to the
/// info tier for hosts that collect a single stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingPolicy {
    Tiered,
    Unified,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        RoutingPolicy::Tiered
    }
}

impl Tier {
    /// Select the output tier for a severity under the given policy.
    pub fn for_severity(severity: Severity, policy: RoutingPolicy) -> Tier {
        match policy {
            RoutingPolicy::Unified => Tier::Info,
            RoutingPolicy::Tiered => match severity {
                Severity::Emergency | Severity::Alert | Severity::Critical | Severity::Error => {
                    Tier::Error
                }
                Severity::Warning => Tier::Warning,
                Severity::Notice | Severity::Info => Tier::Info,
                Severity::Debug => Tier::Debug,
            },
        }
    }
}

/// Destination for serialized log records.
pub trait LogSink: Send + Sync + std::fmt::Debug {
    /// Write one record as a single line. Must not panic or propagate
    /// failures back to the logging call.
    fn write_line(&self, tier: Tier, line: &str);
}

/// Production sink backed by the process stdio streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioSink;

impl LogSink for StdioSink {
    fn write_line(&self, tier: Tier, line: &str) {
        match tier {
            Tier::Error | Tier::Warning => {
                let _ = writeln!(std::io::stderr().lock(), "{}", line);
            }
            Tier::Info | Tier::Debug => {
                let _ = writeln!(std::io::stdout().lock(), "{}", line);
            }
        }
    }
}

/// Capture sink for tests: records every line with its tier.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Tier, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn lines(&self) -> Vec<(Tier, String)> {
        self.guard().clone()
    }

    /// Drain captured lines, leaving the sink empty.
    pub fn take(&self) -> Vec<(Tier, String)> {
        std::mem::take(&mut *self.guard())
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, Vec<(Tier, String)>> {
        // A poisoned lock only means a test thread panicked mid-write;
        // the captured lines are still usable.
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, tier: Tier, line: &str) {
        self.guard().push((tier, line.to_string()));
    }
}
