use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use mn_core::{Error, ErrorCode};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub code: ErrorCode,
    pub details: String,
    pub timestamp: String,
}

/// Converts pipeline errors into JSON error responses.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let Some(code) = err.code() else {
            let message = match &err {
                Error::Validation(message) => message.clone(),
                other => other.to_string(),
            };
            warn!("Rejected request: {}", message);
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response();
        };

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        error!(
            code = %code,
            timestamp = %timestamp,
            error = ?err,
            "Request failed: {}",
            err
        );

        let body = ErrorBody {
            error: "Internal Server Error",
            code,
            details: err.details(),
            timestamp,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
