//! Store-neutral page content produced from a [`MeetingRecord`](crate::MeetingRecord).

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading2(String),
    Heading3(String),
    Paragraph(String),
    BulletedListItem(String),
    ToDo { text: String, checked: bool },
    Divider,
}

impl Block {
    /// Text carried by the block, `None` for dividers.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading2(text)
            | Block::Heading3(text)
            | Block::Paragraph(text)
            | Block::BulletedListItem(text)
            | Block::ToDo { text, .. } => Some(text),
            Block::Divider => None,
        }
    }
}

/// A page to be created in the target collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPage {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// Locator of a page the store accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPage {
    pub id: String,
    pub url: String,
}
