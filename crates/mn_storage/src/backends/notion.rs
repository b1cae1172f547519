use std::fmt;

use async_trait::async_trait;
use mn_core::{Block, Error, NewPage, PageStore, Provider, PublishedPage, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";
pub const DEFAULT_TITLE_PROPERTY: &str = "Name";

/// Notion rejects rich-text objects whose content exceeds this many characters.
pub const MAX_TEXT_CHARS: usize = 2000;

#[derive(Clone)]
pub struct NotionConfig {
    pub api_key: Option<String>,
    /// Database the pages are created in.
    pub database_id: Option<String>,
    pub base_url: String,
    pub notion_version: String,
    /// Name of the database's title property.
    pub title_property: String,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            database_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            title_property: DEFAULT_TITLE_PROPERTY.to_string(),
        }
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("notion_version", &self.notion_version)
            .field("title_property", &self.title_property)
            .finish()
    }
}

#[derive(Deserialize)]
struct CreatedPage {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct NotionStore {
    client: Client,
    config: NotionConfig,
}

impl NotionStore {
    pub fn new(config: NotionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        let api_key = present(&self.config.api_key)
            .ok_or_else(|| Error::configuration(Provider::Notion, "NOTION_API_KEY is missing"))?;
        let database_id = present(&self.config.database_id).ok_or_else(|| {
            Error::configuration(Provider::Notion, "NOTION_DATABASE_ID is missing")
        })?;
        Ok((api_key, database_id))
    }

    /// Request body for `POST /pages`: the title property plus the page's blocks as children.
    pub fn page_body(&self, database_id: &str, page: &NewPage) -> Value {
        let mut properties = Map::new();
        properties.insert(
            self.config.title_property.clone(),
            json!({ "title": rich_text(&page.title) }),
        );

        json!({
            "parent": { "database_id": database_id },
            "properties": properties,
            "children": page.blocks.iter().map(block_json).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Debug for NotionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionStore")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl PageStore for NotionStore {
    fn name(&self) -> &str {
        "Notion"
    }

    fn ensure_configured(&self) -> Result<()> {
        self.credentials().map(|_| ())
    }

    #[instrument(skip(self, page), fields(blocks = page.blocks.len()))]
    async fn create_page(&self, page: &NewPage) -> Result<PublishedPage> {
        let (api_key, database_id) = self.credentials()?;
        let body = self.page_body(database_id, page);
        let endpoint = format!("{}/pages", self.config.base_url.trim_end_matches('/'));

        debug!(database_id, "Creating Notion page");
        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .header("Notion-Version", &self.config.notion_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Notion request failed");
                Error::publication(format!("Notion request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let parsed = serde_json::from_str::<NotionErrorBody>(&text).ok();
            let (code, message) = match parsed {
                Some(body) => (body.code, body.message.unwrap_or(text)),
                None => (None, text),
            };
            error!(status = %status, code = ?code, error = %message, "Notion API error");
            return Err(Error::Publication {
                status: Some(status.as_u16()),
                code,
                message: format!("Notion API error: {}", message),
            });
        }

        let created: CreatedPage = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Notion response");
            Error::publication(format!("Failed to parse Notion response: {}", e))
        })?;

        let url = created
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::publication("Notion response did not include a page URL"))?;
        Url::parse(&url).map_err(|e| {
            Error::publication(format!("Notion returned an invalid page URL '{}': {}", url, e))
        })?;

        Ok(PublishedPage {
            id: created.id,
            url,
        })
    }
}

/// Operator hint for well-known store rejections.
pub fn failure_hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::Publication {
            code: Some(code), ..
        } => match code.as_str() {
            "object_not_found" => {
                Some("The integration might not be shared with the target database yet.")
            }
            "unauthorized" => Some("The Notion API key was rejected; check NOTION_API_KEY."),
            "validation_error" => Some(
                "The database schema does not match; check NOTION_TITLE_PROPERTY and the page content.",
            ),
            _ => None,
        },
        _ => None,
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn block_json(block: &Block) -> Value {
    match block {
        Block::Heading2(text) => typed_block("heading_2", json!({ "rich_text": rich_text(text) })),
        Block::Heading3(text) => typed_block("heading_3", json!({ "rich_text": rich_text(text) })),
        Block::Paragraph(text) => typed_block("paragraph", json!({ "rich_text": rich_text(text) })),
        Block::BulletedListItem(text) => typed_block(
            "bulleted_list_item",
            json!({ "rich_text": rich_text(text) }),
        ),
        Block::ToDo { text, checked } => typed_block(
            "to_do",
            json!({ "rich_text": rich_text(text), "checked": checked }),
        ),
        Block::Divider => typed_block("divider", json!({})),
    }
}

fn typed_block(kind: &str, body: Value) -> Value {
    let mut block = Map::new();
    block.insert("object".to_string(), Value::from("block"));
    block.insert("type".to_string(), Value::from(kind));
    block.insert(kind.to_string(), body);
    Value::Object(block)
}

/// Splits text into consecutive text objects of at most [`MAX_TEXT_CHARS`] characters.
fn rich_text(text: &str) -> Value {
    let chars: Vec<char> = text.chars().collect();
    Value::Array(
        chars
            .chunks(MAX_TEXT_CHARS)
            .map(|chunk| {
                json!({
                    "type": "text",
                    "text": { "content": chunk.iter().collect::<String>() }
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> NotionStore {
        NotionStore::new(NotionConfig {
            api_key: Some("secret_test".to_string()),
            database_id: Some("db-123".to_string()),
            ..NotionConfig::default()
        })
    }

    #[test]
    fn test_missing_credentials_are_configuration_errors() {
        let store = NotionStore::new(NotionConfig::default());
        let err = store.ensure_configured().unwrap_err();
        assert!(err.to_string().contains("NOTION_API_KEY"));

        let store = NotionStore::new(NotionConfig {
            api_key: Some("secret_test".to_string()),
            database_id: Some(" ".to_string()),
            ..NotionConfig::default()
        });
        let err = store.ensure_configured().unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration {
                provider: Provider::Notion,
                ..
            }
        ));
        assert!(err.to_string().contains("NOTION_DATABASE_ID"));

        assert!(configured().ensure_configured().is_ok());
    }

    #[test]
    fn test_page_body_shape() {
        let page = NewPage {
            title: "20240105_기획".to_string(),
            blocks: vec![
                Block::Heading2("4. 결정 사항".to_string()),
                Block::BulletedListItem("결정".to_string()),
                Block::Divider,
                Block::ToDo {
                    text: "[담당자 미정] 공유 (기한: 미정)".to_string(),
                    checked: false,
                },
            ],
        };
        let body = configured().page_body("db-123", &page);

        assert_eq!(body["parent"]["database_id"], "db-123");
        assert_eq!(
            body["properties"]["Name"]["title"][0]["text"]["content"],
            "20240105_기획"
        );
        let children = body["children"].as_array().unwrap();
        assert_eq!(children.len(), 4);
        assert_eq!(children[0]["type"], "heading_2");
        assert_eq!(
            children[0]["heading_2"]["rich_text"][0]["text"]["content"],
            "4. 결정 사항"
        );
        assert_eq!(children[1]["type"], "bulleted_list_item");
        assert_eq!(children[2], json!({ "object": "block", "type": "divider", "divider": {} }));
        assert_eq!(children[3]["to_do"]["checked"], false);
    }

    #[test]
    fn test_custom_title_property() {
        let store = NotionStore::new(NotionConfig {
            title_property: "회의명".to_string(),
            ..NotionConfig::default()
        });
        let body = store.page_body(
            "db",
            &NewPage {
                title: "t".to_string(),
                blocks: vec![],
            },
        );
        assert_eq!(body["properties"]["회의명"]["title"][0]["text"]["content"], "t");
        assert!(body["properties"].get("Name").is_none());
    }

    #[test]
    fn test_long_text_is_split_into_chunks() {
        let text = "가".repeat(MAX_TEXT_CHARS * 2 + 5);
        let value = rich_text(&text);
        let parts = value.as_array().unwrap();

        assert_eq!(parts.len(), 3);
        let lengths: Vec<usize> = parts
            .iter()
            .map(|p| p["text"]["content"].as_str().unwrap().chars().count())
            .collect();
        assert_eq!(lengths, vec![MAX_TEXT_CHARS, MAX_TEXT_CHARS, 5]);
    }

    #[test]
    fn test_failure_hints() {
        let err = Error::Publication {
            status: Some(404),
            code: Some("object_not_found".to_string()),
            message: "Could not find database".to_string(),
        };
        assert!(failure_hint(&err).unwrap().contains("shared"));
        assert!(failure_hint(&Error::publication("timeout")).is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let printed = format!("{:?}", configured());
        assert!(!printed.contains("secret_test"));
    }
}
