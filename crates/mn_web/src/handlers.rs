use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mn_core::{Error, MeetingRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

pub const TEXT_REQUIRED: &str = "Text content is required";
pub const SUCCESS_MESSAGE: &str = "Successfully processed and saved to Notion";

#[derive(Debug, Deserialize)]
pub struct ProcessNoteRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessNoteResponse {
    pub success: bool,
    pub message: String,
    pub data: MeetingRecord,
    pub notion_url: String,
}

/// `POST /api/process-note`: interpret the note, publish it, echo the record.
pub async fn process_note(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProcessNoteRequest>, JsonRejection>,
) -> Result<Json<ProcessNoteResponse>, ApiError> {
    state.ensure_configured()?;

    let text = match body {
        Ok(Json(request)) => request.text,
        Err(rejection) => {
            warn!("Unreadable request body: {}", rejection);
            None
        }
    };
    let text = text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| Error::Validation(TEXT_REQUIRED.to_string()))?;

    info!(chars = text.chars().count(), "Processing meeting note");
    let record = state.interpreter.interpret(&text).await?;
    let published = state.publisher.publish(&record).await?;

    Ok(Json(ProcessNoteResponse {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        data: record,
        notion_url: published.url,
    }))
}

pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
