use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mn_core::{CompletionModel, CompletionRequest, Result};

/// Canned reply used for dry runs: fenced, with commentary, like a chatty model.
pub const SAMPLE_REPLY: &str = r#"다음은 요청하신 회의록입니다.
```json
{
  "title": "20240105_신규 온보딩 플로우 기획 회의",
  "executive_summary": "신규 가입자 온보딩 단계를 5단계에서 3단계로 축소하고, 1분기 내 A/B 테스트를 진행하기로 결정함.",
  "meeting_overview": "가입 이탈률 증가에 대응하기 위해 기획, 디자인, 개발 담당자가 온보딩 개선 방향을 논의함.",
  "discussion_points": [
    {
      "heading": "온보딩 단계 축소",
      "details": ["현재 이탈률 42%, 3단계 진입 시점에 집중", "Q: 약관 동의 분리 가능 여부 -> A: 법무 검토 후 가능"]
    },
    {
      "heading": "측정 지표",
      "details": "완료율과 7일 재방문율을 핵심 지표로 사용"
    }
  ],
  "decisions": ["온보딩 3단계로 축소", "1분기 내 A/B 테스트 진행"],
  "next_actions": [
    { "assignee": "이영희", "task": "축소안 와이어프레임 작성", "due_date": "2024-01-19" }
  ],
  "date": "2024-01-05",
  "participants": ["김철수", "이영희", "박민수"],
  "tags": ["온보딩", "A/B 테스트", "이탈률", "UX", "기획"]
}
```"#;

/// Returns the same reply to every request and counts the calls it served.
pub struct StaticModel {
    reply: String,
    calls: AtomicUsize,
}

impl StaticModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for StaticModel {
    fn default() -> Self {
        Self::new(SAMPLE_REPLY)
    }
}

impl fmt::Debug for StaticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticModel")
            .field("reply_chars", &self.reply.chars().count())
            .field("calls", &self.calls())
            .finish()
    }
}

#[async_trait]
impl CompletionModel for StaticModel {
    fn name(&self) -> &str {
        "Static"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}
