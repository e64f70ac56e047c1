//! Tests for error payload construction and serialisation.

use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "bad");
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::InvalidRequest, message);
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let err = Error::new(ErrorCode::InternalError, " ");
    assert_eq!(err.message(), "Unexpected error");
}

#[rstest]
fn rate_limited_carries_retry_after() {
    let err = Error::rate_limited("slow down", Duration::from_secs(60));
    assert_eq!(err.code(), ErrorCode::RateLimited);
    assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("fixture is a UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
fn serialises_with_camel_case_keys(expected_trace_id: String) {
    let err = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "field": "barcode" }));
    let value = serde_json::to_value(&err).expect("error serialises");

    assert_eq!(value.get("code").and_then(Value::as_str), Some("invalid_request"));
    assert_eq!(
        value.get("traceId").and_then(Value::as_str),
        Some(expected_trace_id.as_str())
    );
    assert!(value.get("retryAfter").is_none());
}

#[rstest]
#[case("forbidden")]
#[case("not_found")]
#[case("service_unavailable")]
fn deserialising_unknown_code_fails(#[case] code: &str) {
    let payload = json!({ "code": code, "message": "nope" });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({ "code": "invalid_request", "message": "  " });
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("fixture is a UUID");
    let payload = json!({ "code": "rate_limited", "message": "slow down" });
    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("payload deserialises")
    })
    .await;
    assert!(error.trace_id().is_none());
}
