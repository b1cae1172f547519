use std::sync::Arc;

use chrono::Utc;
use mn_core::{MeetingRecord, PageStore, PublishedPage, Result, Summary};
use tracing::info;

use crate::blocks::render_page;

/// Title of the page created by [`smoke_test_record`].
pub const SMOKE_TEST_TITLE: &str = "Integration Test (You can delete this)";

/// Writes meeting records to a page store, one page per record.
#[derive(Debug, Clone)]
pub struct RecordPublisher {
    store: Arc<dyn PageStore>,
}

impl RecordPublisher {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn PageStore> {
        &self.store
    }

    /// Renders the record and creates the page in a single request. Not retried.
    pub async fn publish(&self, record: &MeetingRecord) -> Result<PublishedPage> {
        let page = render_page(record);
        info!(
            store = self.store.name(),
            blocks = page.blocks.len(),
            "Publishing page \"{}\"",
            page.title
        );

        let published = self.store.create_page(&page).await?;
        info!(id = %published.id, "Page created at {}", published.url);
        Ok(published)
    }
}

/// Minimal record used to check store connectivity end to end.
pub fn smoke_test_record() -> MeetingRecord {
    MeetingRecord {
        title: Some(SMOKE_TEST_TITLE.to_string()),
        executive_summary: Some(Summary::Text(
            "If you see this, the Notion connectivity is working.".to_string(),
        )),
        date: Some(Utc::now().format("%Y-%m-%d").to_string()),
        participants: vec!["Bot".to_string()],
        tags: vec!["Test".to_string(), "API".to_string()],
        ..Default::default()
    }
}
