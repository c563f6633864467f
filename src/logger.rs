//! Filtering, assembly, and emission of log entries.
//!
//! # Responsibilities
//! - Gate each call against the configured minimum severity
//! - Assemble one self-contained entry per emitted call
//! - Route the serialized entry to the tier the policy selects
//! - Emit metrics-only entries that bypass the severity gate
//!
//! # Design Decisions
//! - One process-wide execution id (shared by all loggers), one log id
//!   per logger instance
//! - Loggers are injected explicitly; the only hidden process state is
//!   the execution id and the uptime baseline
//! - No emission path returns an error or panics

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use uuid::Uuid;

use crate::config::{InvocationContext, LoggerConfig};
use crate::entry::{
    AwsData, ErrorDetail, ErrorValue, LogEntry, ProcessSnapshot, Status, METRIC_MESSAGE, SOURCE,
};
use crate::severity::Severity;
use crate::sink::{LogSink, RoutingPolicy, StdioSink, Tier};

static EXECUTION_ID: OnceLock<String> = OnceLock::new();

/// Identifies the execution environment. Generated once per process so
/// sequential invocations reusing the environment share it.
fn execution_id() -> &'static str {
    EXECUTION_ID.get_or_init(|| Uuid::new_v4().to_string())
}

/// Optional per-call payload for the emission methods.
#[derive(Debug, Default)]
pub struct LogOptions {
    /// String context merged into the entry's `data` field.
    pub data: HashMap<String, String>,
    /// Numeric measurements merged into the entry's `metrics` field.
    pub metrics: HashMap<String, f64>,
    /// An error to unwrap into the entry's `error` field.
    pub error: Option<ErrorValue>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }

    /// Attach an already-classified error value (raw JSON, string, ...).
    pub fn with_error(mut self, error: impl Into<ErrorValue>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attach a standard error, capturing its type name and cause chain.
    pub fn with_error_from<E: std::error::Error>(mut self, error: &E) -> Self {
        self.error = Some(ErrorValue::from_error(error));
        self
    }
}

/// Options for metrics-only emission.
///
/// A bare string converts into a prefix-only options value, so both call
/// shapes are equivalent:
///
/// ```
/// # use std::collections::HashMap;
/// # use serverless_logger::{Logger, LoggerConfig, MetricsOptions};
/// # let logger = Logger::new(LoggerConfig::default());
/// # let measurements: HashMap<String, f64> = HashMap::new();
/// logger.metrics(measurements.clone(), "pablo");
/// logger.metrics(measurements, MetricsOptions {
///     prefix: Some("pablo".to_string()),
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetricsOptions {
    /// Namespace prepended to every metric and context key as `prefix.key`.
    pub prefix: Option<String>,
    /// String context carried under the entry's `data` field.
    pub context: HashMap<String, String>,
}

impl From<&str> for MetricsOptions {
    fn from(prefix: &str) -> Self {
        MetricsOptions {
            prefix: Some(prefix.to_string()),
            context: HashMap::new(),
        }
    }
}

impl From<String> for MetricsOptions {
    fn from(prefix: String) -> Self {
        MetricsOptions {
            prefix: Some(prefix),
            context: HashMap::new(),
        }
    }
}

/// Structured JSON logger for short-lived serverless functions.
///
/// Construct once per invocation with a fixed configuration and inject it
/// where it is needed. Emission methods never fail and never panic.
#[derive(Debug)]
pub struct Logger {
    min_severity: Severity,
    service: Option<String>,
    routing: RoutingPolicy,
    invocation_context: Option<InvocationContext>,
    log_id: String,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Build a logger writing to the process stdio streams.
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_sink(config, Arc::new(StdioSink))
    }

    /// Build a logger writing to an injected sink.
    pub fn with_sink(config: LoggerConfig, sink: Arc<dyn LogSink>) -> Self {
        // Pin the uptime baseline and execution id as early as possible
        crate::entry::process::process_start();
        execution_id();
        Self {
            min_severity: config.min_severity(),
            service: config.service,
            routing: config.routing,
            invocation_context: config.invocation_context,
            log_id: Uuid::new_v4().to_string(),
            sink,
        }
    }

    /// Effective minimum severity after token coercion.
    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    /// Replace the platform invocation context for subsequent entries.
    pub fn set_invocation_context(&mut self, context: InvocationContext) {
        self.invocation_context = Some(context);
    }

    /// Emergency: system is unusable.
    pub fn emergency(&self, message: &str, options: LogOptions) {
        self.write_log(Severity::Emergency, message, options);
    }

    /// Alert: action must be taken immediately.
    pub fn alert(&self, message: &str, options: LogOptions) {
        self.write_log(Severity::Alert, message, options);
    }

    /// Critical: critical conditions.
    pub fn critical(&self, message: &str, options: LogOptions) {
        self.write_log(Severity::Critical, message, options);
    }

    /// Error: error conditions.
    pub fn error(&self, message: &str, options: LogOptions) {
        self.write_log(Severity::Error, message, options);
    }

    /// Warning: warning conditions.
    pub fn warning(&self, message: &str, options: LogOptions) {
        self.write_log(Severity::Warning, message, options);
    }

    /// Notice: normal but significant condition.
    pub fn notice(&self, message: &str, options: LogOptions) {
        self.write_log(Severity::Notice, message, options);
    }

    /// Informational messages.
    pub fn info(&self, message: &str, options: LogOptions) {
        self.write_log(Severity::Info, message, options);
    }

    /// Debug-level messages.
    pub fn debug(&self, message: &str, options: LogOptions) {
        self.write_log(Severity::Debug, message, options);
    }

    /// Emit a metrics-only entry. Always emitted: metrics bypass the
    /// severity gate entirely.
    ///
    /// With a prefix, every metric key and every context key is rewritten
    /// as `prefix.key`.
    pub fn metrics(&self, metrics: HashMap<String, f64>, options: impl Into<MetricsOptions>) {
        let options = options.into();
        let (metrics, data) = match options.prefix {
            Some(prefix) => {
                let metrics = metrics
                    .into_iter()
                    .map(|(key, value)| (format!("{}.{}", prefix, key), value))
                    .collect();
                let data = options
                    .context
                    .into_iter()
                    .map(|(key, value)| (format!("{}.{}", prefix, key), value))
                    .collect();
                (metrics, data)
            }
            None => (metrics, options.context),
        };
        let entry = self.assemble(Status::Metric, METRIC_MESSAGE, data, metrics, None);
        self.emit(Tier::for_severity(Severity::Info, self.routing), &entry);
    }

    /// Shared gate-and-emit routine behind every severity method.
    fn write_log(&self, severity: Severity, message: &str, options: LogOptions) {
        // Strictly-less-severe requests are dropped with no side effect
        if severity.priority() > self.min_severity.priority() {
            return;
        }
        let error = options.error.and_then(ErrorDetail::from_value);
        let entry = self.assemble(
            Status::Severity(severity),
            message,
            options.data,
            options.metrics,
            error,
        );
        self.emit(Tier::for_severity(severity, self.routing), &entry);
    }

    fn assemble(
        &self,
        status: Status,
        message: &str,
        data: HashMap<String, String>,
        metrics: HashMap<String, f64>,
        error: Option<ErrorDetail>,
    ) -> LogEntry {
        LogEntry {
            source: SOURCE,
            status,
            service: self.service.clone(),
            message: message.to_string(),
            data,
            metrics,
            error,
            log_id: self.log_id.clone(),
            execution_id: execution_id().to_string(),
            process: ProcessSnapshot::capture(),
            aws_data: self
                .invocation_context
                .clone()
                .map(|context| AwsData { context }),
        }
    }

    fn emit(&self, tier: Tier, entry: &LogEntry) {
        // Serialization failure is swallowed: a logging call must never
        // interrupt the caller's execution path
        if let Ok(line) = serde_json::to_string(entry) {
            self.sink.write_line(tier, &line);
        }
    }
}
