use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The external service an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Notion,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => f.write_str("OpenAI"),
            Provider::Notion => f.write_str("Notion"),
        }
    }
}

/// Machine-readable failure class reported to HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    OpenaiConfig,
    NotionConfig,
    OpenaiApi,
    NotionApi,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::OpenaiConfig => "OPENAI_CONFIG",
            ErrorCode::NotionConfig => "NOTION_CONFIG",
            ErrorCode::OpenaiApi => "OPENAI_API",
            ErrorCode::NotionApi => "NOTION_API",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{provider} configuration error: {message}")]
    Configuration { provider: Provider, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// The language model call failed or its reply could not be read as a record.
    #[error("Interpretation error: {message}")]
    Interpretation {
        message: String,
        excerpt: Option<String>,
    },

    /// The document store rejected the page or could not be reached.
    #[error("Publication error: {message}")]
    Publication {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn configuration(provider: Provider, message: impl Into<String>) -> Self {
        Error::Configuration {
            provider,
            message: message.into(),
        }
    }

    pub fn interpretation(message: impl Into<String>) -> Self {
        Error::Interpretation {
            message: message.into(),
            excerpt: None,
        }
    }

    pub fn publication(message: impl Into<String>) -> Self {
        Error::Publication {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// Classifies the error by the variant raised at the failing call site.
    ///
    /// Validation failures have no code: they are reported as 400s.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Configuration {
                provider: Provider::OpenAi,
                ..
            } => Some(ErrorCode::OpenaiConfig),
            Error::Configuration {
                provider: Provider::Notion,
                ..
            } => Some(ErrorCode::NotionConfig),
            Error::Validation(_) => None,
            Error::Interpretation { .. } => Some(ErrorCode::OpenaiApi),
            Error::Publication { .. } => Some(ErrorCode::NotionApi),
            Error::Serialization(_) | Error::Io(_) | Error::External(_) => {
                Some(ErrorCode::Unknown)
            }
        }
    }

    /// Human-readable detail, including the diagnostic excerpt when one was captured.
    pub fn details(&self) -> String {
        match self {
            Error::Interpretation {
                message,
                excerpt: Some(excerpt),
            } => format!("{}: {}", message, excerpt),
            Error::Publication {
                status: Some(status),
                code,
                message,
            } => match code {
                Some(code) => format!("{} ({} {})", message, status, code),
                None => format!("{} ({})", message, status),
            },
            other => other.to_string(),
        }
    }
}
