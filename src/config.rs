//! Logger configuration schema.
//!
//! This module defines the construction-time configuration for the logger.
//! All types derive Serde traits so configuration can be embedded in a
//! host's own config files.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::sink::RoutingPolicy;

/// Construction-time logger configuration.
///
/// Immutable after the logger is built, except for the invocation context
/// which can be replaced through [`crate::Logger::set_invocation_context`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Name of the application or service generating the log events.
    pub service: Option<String>,

    /// Minimum severity token (one of the eight recognized levels).
    /// Unrecognized tokens silently fall back to `warning`.
    pub log_level: String,

    /// Severity-to-stream routing policy.
    pub routing: RoutingPolicy,

    /// Platform-supplied metadata for the current invocation.
    pub invocation_context: Option<InvocationContext>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            service: None,
            log_level: "warning".to_string(),
            routing: RoutingPolicy::default(),
            invocation_context: None,
        }
    }
}

impl LoggerConfig {
    /// Effective minimum severity. Invalid tokens never fail
    /// construction; they coerce to `warning`.
    pub fn min_severity(&self) -> Severity {
        Severity::from_token(&self.log_level).unwrap_or(Severity::Warning)
    }

    /// Build a configuration from the process environment.
    ///
    /// Reads `LOG_LEVEL` and `SERVICE_NAME`; anything unset keeps its
    /// default. An invalid `LOG_LEVEL` coerces to `warning` like any
    /// other unrecognized token.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }
        if let Ok(service) = std::env::var("SERVICE_NAME") {
            if !service.is_empty() {
                config.service = Some(service);
            }
        }
        config
    }
}

/// Platform invocation metadata attached to every entry while set.
///
/// Field names mirror the hosting platform's context object; all fields
/// are optional because the platform may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvocationContext {
    pub function_name: Option<String>,
    pub function_version: Option<String>,
    pub invoked_function_arn: Option<String>,
    pub memory_limit_in_mb: Option<String>,
    pub aws_request_id: Option<String>,
    pub log_group_name: Option<String>,
    pub log_stream_name: Option<String>,
}
