use std::sync::Arc;

use mn_core::{CompletionModel, CompletionRequest, Error, MeetingRecord, Result};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::extract::{excerpt, extract_json_object};
use crate::prompt::SYSTEM_PROMPT;

const EXCERPT_CHARS: usize = 100;

/// Turns free-form meeting notes into a [`MeetingRecord`] via a completion model.
#[derive(Debug, Clone)]
pub struct NoteInterpreter {
    model: Arc<dyn CompletionModel>,
}

impl NoteInterpreter {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Arc<dyn CompletionModel> {
        &self.model
    }

    pub async fn interpret(&self, raw_text: &str) -> Result<MeetingRecord> {
        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: raw_text.to_string(),
            json_object: true,
        };

        info!("Interpreting notes with {}", self.model.name());
        let reply = self.model.complete(&request).await?;
        debug!(model = self.model.name(), "Raw model output: {}", reply);

        let record = parse_record(&reply)?;
        if record.is_empty() {
            warn!("Model reply parsed but contains nothing to render");
        }
        Ok(record)
    }
}

/// Extracts and parses the JSON object in a model reply.
///
/// Only JSON syntax is checked here; fields of the wrong shape are dropped
/// by the record's own deserializer.
pub fn parse_record(reply: &str) -> Result<MeetingRecord> {
    let candidate = extract_json_object(reply);

    let value: Value = serde_json::from_str(&candidate).map_err(|e| {
        error!("Failed to parse JSON from model reply: {}", candidate);
        Error::Interpretation {
            message: format!("Model returned invalid JSON ({})", e),
            excerpt: Some(excerpt(&candidate, EXCERPT_CHARS)),
        }
    })?;

    if !value.is_object() {
        return Err(Error::Interpretation {
            message: "Model reply is not a JSON object".to_string(),
            excerpt: Some(excerpt(&candidate, EXCERPT_CHARS)),
        });
    }

    MeetingRecord::from_value(value).map_err(|e| {
        error!("Failed to read meeting record from model reply: {}", e);
        Error::Interpretation {
            message: format!("Model reply has an unreadable shape ({})", e),
            excerpt: Some(excerpt(&candidate, EXCERPT_CHARS)),
        }
    })
}
