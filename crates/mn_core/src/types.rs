use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

// (canonical key, accepted alias)
const RECORD_ALIASES: &[(&str, &str)] = &[
    ("executive_summary", "executiveSummary"),
    ("meeting_overview", "meetingOverview"),
    ("discussion_points", "discussionPoints"),
    ("next_actions", "nextActions"),
];
const ACTION_ALIASES: &[(&str, &str)] = &[("due_date", "dueDate")];

/// Structured summary of one meeting, as returned by the language model.
///
/// Every field is optional. Absent keys, `null`, and values of the wrong
/// shape all deserialize to the field's empty value, and malformed list
/// entries are dropped one by one, so any JSON object can be read as a
/// record and rendering decides what to skip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(
        default,
        alias = "executiveSummary",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub executive_summary: Option<Summary>,

    #[serde(
        default,
        alias = "meetingOverview",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub meeting_overview: Option<String>,

    #[serde(default, alias = "discussionPoints", deserialize_with = "lenient_list")]
    pub discussion_points: Vec<DiscussionPoint>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub decisions: Vec<String>,

    #[serde(default, alias = "nextActions", deserialize_with = "lenient_list")]
    pub next_actions: Vec<NextAction>,

    /// `YYYY-MM-DD`, not checked against a calendar.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub participants: Vec<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
}

/// Executive summary: one paragraph, or a list of bullet lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Text(String),
    Bullets(Vec<String>),
}

impl Summary {
    pub fn is_blank(&self) -> bool {
        match self {
            Summary::Text(text) => text.trim().is_empty(),
            Summary::Bullets(lines) => lines.iter().all(|line| line.trim().is_empty()),
        }
    }
}

/// Body of a discussion topic: a single paragraph or discrete items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Details {
    Paragraph(String),
    Items(Vec<String>),
}

impl Details {
    pub fn is_blank(&self) -> bool {
        match self {
            Details::Paragraph(text) => text.trim().is_empty(),
            Details::Items(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

impl<'de> Deserialize<'de> for Summary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Summary::Text(text)),
            Value::Array(items) => Ok(Summary::Bullets(string_items(items))),
            other => Err(D::Error::custom(format!(
                "expected a string or a list of strings, found {}",
                other
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Details {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Details::Paragraph(text)),
            Value::Array(items) => Ok(Details::Items(string_items(items))),
            other => Err(D::Error::custom(format!(
                "expected a string or a list of strings, found {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscussionPoint {
    #[serde(default, deserialize_with = "lenient")]
    pub heading: String,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextAction {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub task: String,

    #[serde(
        default,
        alias = "dueDate",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
}

impl NextAction {
    pub fn assignee(&self) -> Option<&str> {
        non_blank(&self.assignee)
    }

    pub fn due_date(&self) -> Option<&str> {
        non_blank(&self.due_date)
    }
}

impl MeetingRecord {
    /// Reads a record from model output.
    ///
    /// When a field appears under both its snake_case key and its camelCase
    /// alias, the snake_case value wins and the alias is discarded.
    pub fn from_value(mut value: Value) -> serde_json::Result<Self> {
        if let Value::Object(map) = &mut value {
            drop_shadowed_aliases(map, RECORD_ALIASES);
            for key in ["next_actions", "nextActions"] {
                if let Some(Value::Array(actions)) = map.get_mut(key) {
                    for action in actions.iter_mut().filter_map(Value::as_object_mut) {
                        drop_shadowed_aliases(action, ACTION_ALIASES);
                    }
                }
            }
        }
        serde_json::from_value(value)
    }

    pub fn title(&self) -> Option<&str> {
        non_blank(&self.title)
    }

    pub fn meeting_overview(&self) -> Option<&str> {
        non_blank(&self.meeting_overview)
    }

    pub fn executive_summary(&self) -> Option<&Summary> {
        self.executive_summary
            .as_ref()
            .filter(|summary| !summary.is_blank())
    }

    /// True when no section of the record would produce page content.
    pub fn is_empty(&self) -> bool {
        self.executive_summary().is_none()
            && self.meeting_overview().is_none()
            && self.discussion_points.is_empty()
            && self.decisions.iter().all(|d| d.trim().is_empty())
            && self.next_actions.is_empty()
    }
}

/// Returns the string when it holds something other than whitespace.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!(
                "Dropping malformed {} field: {}",
                std::any::type_name::<T>(),
                e
            );
            Ok(T::default())
        }
    }
}

/// Like [`lenient`] for lists, but keeps every entry that converts and drops
/// the rest individually.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            warn!(
                "Dropping malformed {} field: expected a list, found {}",
                std::any::type_name::<T>(),
                other
            );
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(
                    "Dropping malformed {} entry at index {}: {}",
                    std::any::type_name::<T>(),
                    index,
                    e
                );
                None
            }
        })
        .collect())
}

fn string_items(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::String(text) => Some(text),
            other => {
                warn!("Dropping non-text list entry at index {}: {}", index, other);
                None
            }
        })
        .collect()
}

fn drop_shadowed_aliases(map: &mut Map<String, Value>, aliases: &[(&str, &str)]) {
    for (name, alias) in aliases {
        if map.contains_key(*name) && map.remove(*alias).is_some() {
            warn!("Ignoring '{}' because '{}' is also present", alias, name);
        }
    }
}
