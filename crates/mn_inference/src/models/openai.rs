use std::fmt;

use async_trait::async_trait;
use mn_core::{CompletionModel, CompletionRequest, Error, Provider, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::Config;

/// Models tried by [`probe`] when none are given.
pub const PROBE_CANDIDATES: &[&str] = &["gpt-4o", "gpt-4o-mini", "gpt-4.1", "gpt-4.1-mini"];

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Chat-completions client for OpenAI and compatible endpoints.
pub struct OpenAiModel {
    client: Client,
    config: Config,
}

impl OpenAiModel {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.config.model_name
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::configuration(Provider::OpenAi, "OPENAI_API_KEY is missing"))
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl CompletionModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    #[instrument(skip(self, request), fields(model = %self.config.model_name))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let api_key = self.api_key()?;

        let body = ChatRequest {
            model: &self.config.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: request.json_object.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!(
            input_chars = request.user.chars().count(),
            json_object = request.json_object,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "OpenAI request failed");
                Error::interpretation(format!("OpenAI request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            error!(status = %status, error = %message, "OpenAI API error");
            return Err(Error::interpretation(format!(
                "OpenAI API error (status {}): {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            Error::interpretation(format!("Failed to parse OpenAI response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::interpretation("OpenAI returned non-text content"))
    }
}

/// Result of asking one model for a trivial reply.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub model: String,
    pub result: std::result::Result<String, String>,
}

/// Sends a one-word prompt to each candidate model and records what came back.
pub async fn probe(config: &Config, candidates: &[String]) -> Vec<ProbeOutcome> {
    let request = CompletionRequest {
        system: String::new(),
        user: "Hi".to_string(),
        json_object: false,
    };

    let mut outcomes = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let model = OpenAiModel::new(Config {
            model_name: candidate.clone(),
            max_tokens: 16,
            ..config.clone()
        });
        let result = model
            .complete(&request)
            .await
            .map(|reply| reply.trim().to_string())
            .map_err(|e| e.to_string());
        outcomes.push(ProbeOutcome {
            model: candidate.clone(),
            result,
        });
    }
    outcomes
}
