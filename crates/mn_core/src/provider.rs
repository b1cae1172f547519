use std::fmt;

use async_trait::async_trait;

use crate::page::{NewPage, PublishedPage};
use crate::Result;

/// One chat-style exchange: a fixed instruction plus the user's text.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    /// Ask the provider to constrain the reply to a JSON object. Best effort only.
    pub json_object: bool,
}

#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Checks that credentials are present. Performs no I/O.
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Returns the raw text of the model's reply.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

#[async_trait]
pub trait PageStore: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Checks that credentials and the target collection are present. Performs no I/O.
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Creates the page in a single request. There is no update path.
    async fn create_page(&self, page: &NewPage) -> Result<PublishedPage>;
}
