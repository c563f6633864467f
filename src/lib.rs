//! Structured JSON Logging for Short-Lived Serverless Functions

pub mod config;
pub mod entry;
pub mod logger;
pub mod severity;
pub mod sink;

pub use config::{InvocationContext, LoggerConfig};
pub use entry::{ErrorDetail, ErrorValue, LogEntry};
pub use logger::{LogOptions, Logger, MetricsOptions};
pub use severity::Severity;
pub use sink::{LogSink, MemorySink, RoutingPolicy, StdioSink, Tier};
