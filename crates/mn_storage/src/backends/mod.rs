pub mod memory;
pub mod notion;

pub use memory::InMemoryStore;
pub use notion::{NotionConfig, NotionStore};
