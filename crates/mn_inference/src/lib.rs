use std::fmt;

pub mod extract;
pub mod interpreter;
pub mod models;
pub mod prompt;

pub use interpreter::NoteInterpreter;
pub use models::create_model;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_TOKENS: u32 = 16000;

/// Settings for the chat-completions provider.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: String,
    pub base_url: String,
    /// Kept low so the reply's structure drifts less between calls.
    pub temperature: f32,
    /// Generous enough for long transcripts.
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::{Config, NoteInterpreter};
    pub use mn_core::{Error, MeetingRecord, Result};
}
