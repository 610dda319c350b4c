//! HTTP rendering of storefront errors.
//!
//! Purpose: Turn catalogue and storefront failures into JSON error bodies with
//! a matching status and the request's `trace-id` header. Internal failures
//! are logged in full and reach clients only as a generic message.

use std::borrow::Cow;

use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by the storefront handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

const fn http_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent to the client for `error`.
fn client_view(error: &Error) -> Cow<'_, Error> {
    match error.code() {
        ErrorCode::InternalError => {
            error!(
                trace_id = error.trace_id(),
                message = error.message(),
                "internal storefront error"
            );
            let generic = Error::internal(INTERNAL_MESSAGE);
            Cow::Owned(match error.trace_id() {
                Some(id) => generic.with_trace_id(id),
                None => generic,
            })
        }
        ErrorCode::ServiceUnavailable => {
            warn!(
                trace_id = error.trace_id(),
                message = error.message(),
                "storefront backing store unavailable"
            );
            Cow::Borrowed(error)
        }
        _ => Cow::Borrowed(error),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        http_status(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id));
        }
        response.json(&*client_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced to a storefront handler");
        Error::internal(INTERNAL_MESSAGE)
    }
}

/// Render malformed JSON bodies as `invalid_request` errors.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("request body is not valid JSON for this endpoint")
        .with_details(json!({ "reason": err.to_string() }))
        .into()
}

#[cfg(test)]
mod tests;
