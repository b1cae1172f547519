use std::collections::VecDeque;

use async_trait::async_trait;
use mn_core::{NewPage, PageStore, PublishedPage, Result};
use tokio::sync::RwLock;

/// Pages kept by [`InMemoryStore::new`].
pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug, Default)]
struct Pages {
    created: usize,
    recent: VecDeque<NewPage>,
}

/// Keeps the most recently created pages in process memory. Meant for dry
/// runs and tests; once `capacity` is reached the oldest page is evicted.
#[derive(Debug)]
pub struct InMemoryStore {
    capacity: usize,
    pages: RwLock<Pages>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            pages: RwLock::new(Pages::default()),
        }
    }

    /// Retained pages, oldest first.
    pub async fn pages(&self) -> Vec<NewPage> {
        self.pages.read().await.recent.iter().cloned().collect()
    }
}

#[async_trait]
impl PageStore for InMemoryStore {
    fn name(&self) -> &str {
        "Memory"
    }

    async fn create_page(&self, page: &NewPage) -> Result<PublishedPage> {
        let mut pages = self.pages.write().await;
        if pages.recent.len() == self.capacity {
            pages.recent.pop_front();
        }
        pages.recent.push_back(page.clone());
        pages.created += 1;

        let number = pages.created;
        Ok(PublishedPage {
            id: format!("page-{}", number),
            url: format!("memory://pages/{}", number),
        })
    }
}
