use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use mn_core::{DiscussionPoint, Details, Error, MeetingRecord, NextAction};
use mn_storage::backends::notion::failure_hint;
use mn_storage::{NotionConfig, NotionStore, RecordPublisher};
use serde_json::{json, Value};

#[derive(Clone)]
struct Upstream {
    captured: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    status: StatusCode,
    reply: Value,
}

impl Upstream {
    fn new(status: StatusCode, reply: Value) -> Self {
        Self {
            captured: Arc::new(Mutex::new(Vec::new())),
            status,
            reply,
        }
    }

    fn requests(&self) -> Vec<(HeaderMap, Value)> {
        self.captured.lock().unwrap().clone()
    }
}

async fn create_page(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    upstream.captured.lock().unwrap().push((headers, body));
    (upstream.status, Json(upstream.reply.clone()))
}

async fn spawn_upstream(upstream: Upstream) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/v1/pages", post(create_page))
        .with_state(upstream);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn publisher(base_url: String) -> RecordPublisher {
    RecordPublisher::new(Arc::new(NotionStore::new(NotionConfig {
        api_key: Some("secret_test".to_string()),
        database_id: Some("db-123".to_string()),
        base_url,
        ..NotionConfig::default()
    })))
}

fn planning_record() -> MeetingRecord {
    MeetingRecord {
        title: Some("20240105_온보딩 기획".to_string()),
        executive_summary: Some(mn_core::Summary::Text("요약".to_string())),
        discussion_points: vec![DiscussionPoint {
            heading: "3.1 단계 축소".to_string(),
            details: Some(Details::Items(vec!["이탈률 42%".to_string()])),
        }],
        decisions: vec!["3단계로 축소".to_string(), "A/B 테스트".to_string()],
        next_actions: vec![NextAction {
            assignee: None,
            task: "와이어프레임".to_string(),
            due_date: None,
        }],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_publish_sends_single_create_request() {
    let upstream = Upstream::new(
        StatusCode::OK,
        json!({ "object": "page", "id": "page-abc", "url": "https://www.notion.so/page-abc" }),
    );
    let base_url = spawn_upstream(upstream.clone()).await;

    let published = publisher(base_url).publish(&planning_record()).await.unwrap();
    assert_eq!(published.id, "page-abc");
    assert_eq!(published.url, "https://www.notion.so/page-abc");

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    let (headers, body) = &requests[0];
    assert_eq!(headers["authorization"], "Bearer secret_test");
    assert_eq!(headers["notion-version"], "2022-06-28");
    assert_eq!(body["parent"]["database_id"], "db-123");
    assert_eq!(
        body["properties"]["Name"]["title"][0]["text"]["content"],
        "20240105_온보딩 기획"
    );

    let kinds: Vec<&str> = body["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|block| block["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading_2",
            "paragraph",
            "divider",
            "heading_2",
            "heading_3",
            "bulleted_list_item",
            "divider",
            "heading_2",
            "bulleted_list_item",
            "bulleted_list_item",
            "divider",
            "heading_2",
            "to_do",
        ]
    );
    assert_eq!(
        body["children"][4]["heading_3"]["rich_text"][0]["text"]["content"],
        "3.1 단계 축소"
    );
    assert_eq!(
        body["children"][12]["to_do"]["rich_text"][0]["text"]["content"],
        "[담당자 미정] 와이어프레임 (기한: 미정)"
    );
}

#[tokio::test]
async fn test_rejection_is_a_publication_error() {
    let upstream = Upstream::new(
        StatusCode::NOT_FOUND,
        json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find database with ID: db-123."
        }),
    );
    let base_url = spawn_upstream(upstream).await;

    let err = publisher(base_url).publish(&planning_record()).await.unwrap_err();
    match &err {
        Error::Publication {
            status,
            code,
            message,
        } => {
            assert_eq!(*status, Some(404));
            assert_eq!(code.as_deref(), Some("object_not_found"));
            assert!(message.contains("Could not find database"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(failure_hint(&err).is_some());
}

#[tokio::test]
async fn test_response_without_url_is_rejected() {
    let upstream = Upstream::new(StatusCode::OK, json!({ "object": "page", "id": "page-abc" }));
    let base_url = spawn_upstream(upstream).await;

    let err = publisher(base_url).publish(&planning_record()).await.unwrap_err();
    assert!(matches!(err, Error::Publication { .. }));
    assert!(err.to_string().contains("page URL"));
}

#[tokio::test]
async fn test_unconfigured_store_makes_no_request() {
    let upstream = Upstream::new(StatusCode::OK, json!({}));
    let base_url = spawn_upstream(upstream.clone()).await;
    let publisher = RecordPublisher::new(Arc::new(NotionStore::new(NotionConfig {
        api_key: Some("secret_test".to_string()),
        base_url,
        ..NotionConfig::default()
    })));

    let err = publisher.publish(&planning_record()).await.unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(upstream.requests().is_empty());
}
