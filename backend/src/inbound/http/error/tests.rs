//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error() -> Error {
    Error::internal("connection string leaked: postgres://secret")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn render(error: &Error) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    (
        status,
        trace_id,
        serde_json::from_slice(&bytes).expect("error JSON"),
    )
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(internal_error: Error) {
    let (status, trace_id, body) = render(&internal_error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_id.as_deref(), Some(TRACE_ID));
    assert_eq!(
        body,
        json!({
            "code": "internal_error",
            "message": "Internal server error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details() {
    let err = Error::conflict("slug is already in use: rose-oil")
        .with_details(json!({"slug": "rose-oil", "code": "duplicate_slug"}));
    let (status, trace_id, body) = render(&err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(trace_id.is_none());
    assert_eq!(body["message"], "slug is already in use: rose-oil");
    assert_eq!(body["details"]["slug"], "rose-oil");
}

#[rstest]
#[actix_web::test]
async fn unavailable_store_keeps_message_and_trace_id() {
    let err = Error::service_unavailable("product store unavailable").with_trace_id(TRACE_ID);
    let (status, trace_id, body) = render(&err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(trace_id.as_deref(), Some(TRACE_ID));
    assert_eq!(body["code"], "service_unavailable");
    assert_eq!(body["message"], "product store unavailable");
}

#[rstest]
fn framework_errors_become_generic_internal_errors() {
    let framework = actix_web::error::ErrorBadGateway("upstream detail");
    let err = Error::from(framework);

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_MESSAGE);
}
