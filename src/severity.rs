//! Severity levels and their ordering.
//!
//! # Responsibilities
//! - Define the eight syslog-style severities (RFC 5424)
//! - Map each severity to a unique integer priority (0 = most severe)
//! - Recognize severity tokens from configuration input
//!
//! # Design Decisions
//! - Priorities are used only for comparison, never arithmetic
//! - Tokens are lower-case and case-sensitive
//! - Pure lookups: no side effects, no failure modes

use serde::{Deserialize, Serialize};

/// Syslog-style log severity, most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Error conditions.
    Error,
    /// Warning conditions.
    Warning,
    /// Normal but significant condition.
    Notice,
    /// Informational messages.
    Info,
    /// Debug-level messages.
    Debug,
}

impl Severity {
    /// All recognized severities, ordered most to least severe.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Numeric priority, strictly increasing from most severe (0) to
    /// least severe (7).
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// The configuration/wire token for this severity.
    pub fn as_token(self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Parse a severity token. Case-sensitive exact match.
    pub fn from_token(token: &str) -> Option<Severity> {
        match token {
            "emergency" => Some(Severity::Emergency),
            "alert" => Some(Severity::Alert),
            "critical" => Some(Severity::Critical),
            "error" => Some(Severity::Error),
            "warning" => Some(Severity::Warning),
            "notice" => Some(Severity::Notice),
            "info" => Some(Severity::Info),
            "debug" => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Returns true if the token names a recognized severity.
    pub fn is_recognized(token: &str) -> bool {
        Severity::from_token(token).is_some()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}
