//! The emitted log record.
//!
//! # Data Flow
//! ```text
//! Logger assembles:
//!     fixed identity fields (source, service, logId, executionId)
//!   + caller fields (message, data, metrics, error)
//!   + process snapshot (entry::process)
//!   + optional invocation metadata
//!     -> LogEntry -> serde_json -> one line on a sink tier
//! ```
//!
//! # Design Decisions
//! - Entries are assembled fresh per call and never mutated after emission
//! - JSON field names are fixed (camelCase) for downstream log processing
//! - Error detail is classified once at the boundary (entry::error_detail)

use std::collections::HashMap;

use serde::Serialize;

use crate::config::InvocationContext;
use crate::severity::Severity;

pub mod error_detail;
pub mod process;

pub use error_detail::{ErrorDetail, ErrorValue};
pub use process::ProcessSnapshot;

/// Fixed constant identifying the emitting platform.
pub const SOURCE: &str = "lambda";

/// Message used for metrics-only entries.
pub const METRIC_MESSAGE: &str = "Metric Log";

/// Status of an entry: a severity, or the distinct metric marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Severity(Severity),
    Metric,
}

impl Status {
    pub fn as_token(self) -> &'static str {
        match self {
            Status::Severity(severity) => severity.as_token(),
            Status::Metric => "metric",
        }
    }
}

impl Serialize for Status {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

/// One structured log record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// The technology from which the log originated.
    pub source: &'static str,

    /// Severity of this entry, or `"metric"` for metrics-only records.
    pub status: Status,

    /// The name of the application or service generating the log events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    /// The message for the log.
    pub message: String,

    /// Caller-supplied context. Values must be strings.
    pub data: HashMap<String, String>,

    /// Caller-supplied measurements. Values must be numeric.
    pub metrics: HashMap<String, f64>,

    /// Structured detail for a caller-supplied error, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,

    /// Unique id for this logger instance, distinguishing concurrent
    /// invocations that share one execution environment.
    pub log_id: String,

    /// Unique id for the execution environment, shared by every logger
    /// in the process.
    pub execution_id: String,

    /// Host process statistics at emission time.
    pub process: ProcessSnapshot,

    /// Platform invocation metadata, present only when a context is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_data: Option<AwsData>,
}

/// Wrapper reproducing the nested invocation-metadata object shape.
#[derive(Debug, Clone, Serialize)]
pub struct AwsData {
    pub context: InvocationContext,
}
