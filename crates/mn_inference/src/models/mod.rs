use std::sync::Arc;

use anyhow::anyhow;
use mn_core::{CompletionModel, Error, Result};

use crate::Config;

pub mod openai;
pub mod static_model;

pub use openai::OpenAiModel;
pub use static_model::StaticModel;

/// Builds the completion model named by `kind` (`openai` or `static`).
pub fn create_model(kind: &str, config: Config) -> Result<Arc<dyn CompletionModel>> {
    match kind.to_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAiModel::new(config))),
        "static" => Ok(Arc::new(StaticModel::default())),
        other => Err(Error::External(anyhow!(
            "Unknown model '{}'. Available models: openai (default), static",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_model() {
        assert_eq!(create_model("openai", Config::default()).unwrap().name(), "OpenAI");
        assert_eq!(create_model("Static", Config::default()).unwrap().name(), "Static");
        assert!(create_model("ollama", Config::default()).is_err());
    }
}
