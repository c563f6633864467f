//! End-to-end emission tests against the documented JSON record shape.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use serverless_logger::{
    InvocationContext, LogOptions, Logger, LoggerConfig, MemorySink, Severity, Tier,
};

mod common;

#[test]
fn test_error_threshold_scenario() {
    // minimumSeverity = "error": notice is dropped, critical lands on
    // the error tier
    let (logger, sink) = common::capture_logger("error");

    logger.notice("x", LogOptions::default());
    assert!(sink.is_empty());

    logger.critical("y", LogOptions::default());
    let (tier, entry) = common::single_entry(&sink);
    assert_eq!(tier, Tier::Error);
    assert_eq!(entry["status"], "critical");
    assert_eq!(entry["message"], "y");
}

#[test]
fn test_debug_threshold_round_trips_options() {
    let (logger, sink) = common::capture_logger("debug");

    logger.debug(
        "z",
        LogOptions::new().with_data("k", "v").with_metric("m", 1.0),
    );
    let (tier, entry) = common::single_entry(&sink);
    assert_eq!(tier, Tier::Debug);
    assert_eq!(entry["status"], "debug");
    assert_eq!(entry["data"]["k"], "v");
    assert_eq!(entry["metrics"]["m"], 1.0);
}

#[test]
fn test_every_severity_filters_against_threshold() {
    for minimum in Severity::ALL {
        let (logger, sink) = common::capture_logger(minimum.as_token());
        logger.emergency("m", LogOptions::default());
        logger.alert("m", LogOptions::default());
        logger.critical("m", LogOptions::default());
        logger.error("m", LogOptions::default());
        logger.warning("m", LogOptions::default());
        logger.notice("m", LogOptions::default());
        logger.info("m", LogOptions::default());
        logger.debug("m", LogOptions::default());

        let lines = sink.take();
        let expected = Severity::ALL
            .iter()
            .filter(|severity| severity.priority() <= minimum.priority())
            .count();
        assert_eq!(lines.len(), expected, "threshold {}", minimum);

        for ((_, line), severity) in lines.iter().zip(Severity::ALL) {
            let entry: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(entry["status"], severity.as_token());
        }
    }
}

#[test]
fn test_fixed_identity_fields() {
    let config = LoggerConfig {
        service: Some("pablo".to_string()),
        log_level: "info".to_string(),
        ..Default::default()
    };
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::with_sink(config, sink.clone());

    logger.info("hello", LogOptions::default());
    let (_, entry) = common::single_entry(&sink);
    assert_eq!(entry["source"], "lambda");
    assert_eq!(entry["service"], "pablo");
    assert!(entry["logId"].is_string());
    assert!(entry["executionId"].is_string());
    assert!(entry["process"]["pid"].is_u64());
    assert!(entry["process"]["memoryUsage"].is_object());
    assert!(entry["process"]["uptime"].is_number());
    assert!(entry["process"]["versions"].is_object());
}

#[test]
fn test_standard_error_unwrapping() {
    let (logger, sink) = common::capture_logger("error");

    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing object");
    logger.error("upload failed", LogOptions::new().with_error_from(&io_error));

    let (_, entry) = common::single_entry(&sink);
    assert_eq!(entry["error"]["message"], "missing object");
    assert!(entry["error"]["name"].as_str().unwrap().contains("Error"));
    // No cause chain on a leaf error, so no stack field
    assert!(entry["error"].get("stack").is_none());
}

#[test]
fn test_third_party_error_unwrapping() {
    let (logger, sink) = common::capture_logger("error");

    logger.error(
        "graph call failed",
        LogOptions::new().with_error(json!({
            "fbtrace_id": "AqHz",
            "code": 4,
            "is_transient": true,
            "error_subcode": 1349174,
            "message": "rate limited",
            "type": "ApplicationLimit"
        })),
    );

    let (_, entry) = common::single_entry(&sink);
    let facebook = &entry["error"]["facebook"];
    assert_eq!(facebook["fbtrace_id"], "AqHz");
    assert_eq!(facebook["code"], "4");
    assert_eq!(facebook["is_transient"], "true");
    assert_eq!(facebook["error_subcode"], "1349174");
    assert_eq!(facebook["message"], "rate limited");
    assert_eq!(facebook["type"], "ApplicationLimit");
}

#[test]
fn test_opaque_error_truncated_raw() {
    let (logger, sink) = common::capture_logger("error");

    logger.error(
        "odd failure",
        LogOptions::new().with_error(json!({ "payload": "x".repeat(5000) })),
    );

    let (_, entry) = common::single_entry(&sink);
    let raw = entry["error"]["raw"].as_str().unwrap();
    assert!(raw.len() <= 512);
}

#[test]
fn test_no_error_option_omits_error_field() {
    let (logger, sink) = common::capture_logger("error");
    logger.error("plain", LogOptions::default());
    let (_, entry) = common::single_entry(&sink);
    assert!(entry.get("error").is_none());
}

#[test]
fn test_metrics_namespace_prefix() {
    let (logger, sink) = common::capture_logger("warning");

    logger.metrics(HashMap::from([("a".to_string(), 1.0)]), "ns");
    let (tier, entry) = common::single_entry(&sink);
    assert_eq!(tier, Tier::Info);
    assert_eq!(entry["status"], "metric");
    assert_eq!(entry["metrics"]["ns.a"], 1.0);
}

#[test]
fn test_metrics_exempt_from_most_restrictive_threshold() {
    let (logger, sink) = common::capture_logger("emergency");

    logger.info("suppressed", LogOptions::default());
    assert!(sink.is_empty());

    logger.metrics(
        HashMap::from([("image_saved".to_string(), 5.0), ("image_failed".to_string(), 0.0)]),
        "pablo",
    );
    let (_, entry) = common::single_entry(&sink);
    assert_eq!(entry["metrics"]["pablo.image_saved"], 5.0);
    assert_eq!(entry["metrics"]["pablo.image_failed"], 0.0);
}

#[test]
fn test_invocation_context_round_trip() {
    let config = LoggerConfig {
        log_level: "info".to_string(),
        invocation_context: Some(InvocationContext {
            function_name: Some("resize-image".to_string()),
            function_version: Some("$LATEST".to_string()),
            aws_request_id: Some("req-42".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::with_sink(config, sink.clone());

    logger.info("invoked", LogOptions::default());
    let (_, entry) = common::single_entry(&sink);
    let context = &entry["awsData"]["context"];
    assert_eq!(context["functionName"], "resize-image");
    assert_eq!(context["functionVersion"], "$LATEST");
    assert_eq!(context["awsRequestId"], "req-42");
}

#[test]
fn test_warning_and_info_tier_routing() {
    let (logger, sink) = common::capture_logger("debug");

    logger.warning("w", LogOptions::default());
    logger.notice("n", LogOptions::default());
    logger.info("i", LogOptions::default());

    let lines = sink.take();
    assert_eq!(lines[0].0, Tier::Warning);
    assert_eq!(lines[1].0, Tier::Info);
    assert_eq!(lines[2].0, Tier::Info);
}
