use std::sync::Arc;

use anyhow::anyhow;
use mn_core::{Error, PageStore, Result};

pub mod backends;
pub mod blocks;
pub mod publisher;

pub use backends::*;
pub use publisher::RecordPublisher;

/// Builds the page store named by `kind` (`notion` or `memory`).
pub fn create_store(kind: &str, config: NotionConfig) -> Result<Arc<dyn PageStore>> {
    match kind.to_lowercase().as_str() {
        "notion" => Ok(Arc::new(NotionStore::new(config))),
        "memory" => Ok(Arc::new(InMemoryStore::new())),
        other => Err(Error::External(anyhow!(
            "Unknown store '{}'. Available stores: notion (default), memory",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::blocks::{build_blocks, render_page};
    pub use super::{create_store, RecordPublisher};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_store() {
        assert_eq!(create_store("notion", NotionConfig::default()).unwrap().name(), "Notion");
        assert_eq!(create_store("MEMORY", NotionConfig::default()).unwrap().name(), "Memory");
        assert!(create_store("sqlite", NotionConfig::default()).is_err());
    }
}
