//! Shared utilities for emission tests.

use std::sync::Arc;

use serverless_logger::{Logger, LoggerConfig, MemorySink, Tier};

/// Build a logger wired to a capture sink at the given level.
pub fn capture_logger(log_level: &str) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let config = LoggerConfig {
        log_level: log_level.to_string(),
        ..Default::default()
    };
    (Logger::with_sink(config, sink.clone()), sink)
}

/// Parse the single captured line, asserting exactly one write happened.
#[allow(dead_code)]
pub fn single_entry(sink: &MemorySink) -> (Tier, serde_json::Value) {
    let mut lines = sink.take();
    assert_eq!(lines.len(), 1, "expected exactly one emitted line");
    let (tier, line) = lines.remove(0);
    let entry = serde_json::from_str(&line).expect("emitted line must be valid JSON");
    (tier, entry)
}
