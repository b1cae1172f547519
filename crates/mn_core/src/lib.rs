pub mod error;
pub mod page;
pub mod provider;
pub mod types;

pub use error::{Error, ErrorCode, Provider};
pub use page::{Block, NewPage, PublishedPage};
pub use provider::{CompletionModel, CompletionRequest, PageStore};
pub use types::{DiscussionPoint, Details, MeetingRecord, NextAction, Summary};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{
        Block, CompletionModel, CompletionRequest, Error, MeetingRecord, NewPage, PageStore,
        PublishedPage, Result,
    };
}
