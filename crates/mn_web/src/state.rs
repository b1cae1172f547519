use std::sync::Arc;

use mn_core::{CompletionModel, PageStore, Result};
use mn_inference::NoteInterpreter;
use mn_storage::RecordPublisher;

#[derive(Debug, Clone)]
pub struct AppState {
    pub interpreter: NoteInterpreter,
    pub publisher: RecordPublisher,
}

impl AppState {
    pub fn new(model: Arc<dyn CompletionModel>, store: Arc<dyn PageStore>) -> Self {
        Self {
            interpreter: NoteInterpreter::new(model),
            publisher: RecordPublisher::new(store),
        }
    }

    /// Fails on the first provider with missing credentials, model first.
    pub fn ensure_configured(&self) -> Result<()> {
        self.interpreter.model().ensure_configured()?;
        self.publisher.store().ensure_configured()
    }
}
