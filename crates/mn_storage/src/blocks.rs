//! Deterministic mapping from a [`MeetingRecord`] to page blocks.
//!
//! Sections appear in a fixed order and only when their source field has
//! content: executive summary, overview, discussion, decisions, next actions.
//! Every section but the last is followed by a divider.

use mn_core::{Block, Details, MeetingRecord, NewPage, NextAction, Summary};

pub const EXECUTIVE_SUMMARY_HEADING: &str = "1. Executive Summary (핵심 요약)";
pub const OVERVIEW_HEADING: &str = "2. 미팅 개요";
pub const DISCUSSION_HEADING: &str = "3. 주요 논의 내용";
pub const DECISIONS_HEADING: &str = "4. 결정 사항";
pub const NEXT_ACTIONS_HEADING: &str = "5. Next Action";

pub const UNTITLED: &str = "제목 없는 회의";
pub const UNASSIGNED: &str = "담당자 미정";
pub const UNSPECIFIED_DUE: &str = "미정";

/// Section number used as the prefix of discussion sub-headings.
const DISCUSSION_SECTION: usize = 3;

pub fn build_blocks(record: &MeetingRecord) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(summary) = record.executive_summary() {
        blocks.push(Block::Heading2(EXECUTIVE_SUMMARY_HEADING.to_string()));
        match summary {
            Summary::Text(text) => blocks.push(Block::Paragraph(text.clone())),
            Summary::Bullets(lines) => blocks.extend(bullets(lines)),
        }
        blocks.push(Block::Divider);
    }

    if let Some(overview) = record.meeting_overview() {
        blocks.push(Block::Heading2(OVERVIEW_HEADING.to_string()));
        blocks.push(Block::Paragraph(overview.to_string()));
        blocks.push(Block::Divider);
    }

    if !record.discussion_points.is_empty() {
        blocks.push(Block::Heading2(DISCUSSION_HEADING.to_string()));
        for (index, point) in record.discussion_points.iter().enumerate() {
            blocks.push(Block::Heading3(discussion_heading(index, &point.heading)));
            match &point.details {
                Some(Details::Items(items)) => blocks.extend(bullets(items)),
                Some(Details::Paragraph(text)) if !text.trim().is_empty() => {
                    blocks.push(Block::Paragraph(text.clone()))
                }
                _ => {}
            }
        }
        blocks.push(Block::Divider);
    }

    let decisions: Vec<Block> = bullets(&record.decisions).collect();
    if !decisions.is_empty() {
        blocks.push(Block::Heading2(DECISIONS_HEADING.to_string()));
        blocks.extend(decisions);
        blocks.push(Block::Divider);
    }

    if !record.next_actions.is_empty() {
        blocks.push(Block::Heading2(NEXT_ACTIONS_HEADING.to_string()));
        blocks.extend(record.next_actions.iter().map(|action| Block::ToDo {
            text: action_item_text(action),
            checked: false,
        }));
    }

    blocks
}

/// Sub-heading for the discussion point at `index` (zero-based).
///
/// `3.{index+1} ` is prepended unless the heading is already numbered,
/// either as `3.{index+1}` or as a bare `{index+1}.`.
pub fn discussion_heading(index: usize, heading: &str) -> String {
    let heading = heading.trim();
    let number = (index + 1).to_string();
    let prefix = format!("{}.{}", DISCUSSION_SECTION, number);

    if is_numbered(heading, &prefix) || is_numbered(heading, &number) {
        heading.to_string()
    } else if heading.is_empty() {
        prefix
    } else {
        format!("{} {}", prefix, heading)
    }
}

// "3.1 x", "3.1. x" and "1) x" are numbered; "3.10 x", "1.5배" and "1분기" are not.
fn is_numbered(heading: &str, number: &str) -> bool {
    let Some(rest) = heading.strip_prefix(number) else {
        return false;
    };
    let mut chars = rest.chars();
    match chars.next() {
        None => true,
        Some('.') | Some(')') => !chars.next().is_some_and(|c| c.is_ascii_digit()),
        Some(c) => c.is_whitespace(),
    }
}

pub fn action_item_text(action: &NextAction) -> String {
    format!(
        "[{}] {} (기한: {})",
        action.assignee().unwrap_or(UNASSIGNED),
        action.task.trim(),
        action.due_date().unwrap_or(UNSPECIFIED_DUE)
    )
}

pub fn page_title(record: &MeetingRecord) -> String {
    record.title().unwrap_or(UNTITLED).trim().to_string()
}

pub fn render_page(record: &MeetingRecord) -> NewPage {
    NewPage {
        title: page_title(record),
        blocks: build_blocks(record),
    }
}

fn bullets(lines: &[String]) -> impl Iterator<Item = Block> + '_ {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Block::BulletedListItem(line.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mn_core::DiscussionPoint;

    fn point(heading: &str, details: Option<Details>) -> DiscussionPoint {
        DiscussionPoint {
            heading: heading.to_string(),
            details,
        }
    }

    #[test]
    fn test_empty_record_renders_nothing() {
        let page = render_page(&MeetingRecord::default());
        assert_eq!(page.title, UNTITLED);
        assert!(page.blocks.is_empty());
    }

    #[test]
    fn test_full_record_section_order() {
        let record = MeetingRecord {
            title: Some("20240105_기획".into()),
            executive_summary: Some(Summary::Text("요약".into())),
            meeting_overview: Some("개요".into()),
            discussion_points: vec![point("주제", Some(Details::Paragraph("내용".into())))],
            decisions: vec!["결정".into()],
            next_actions: vec![NextAction {
                assignee: Some("김철수".into()),
                task: "작성".into(),
                due_date: Some("2024-02-01".into()),
            }],
            ..Default::default()
        };

        assert_eq!(
            build_blocks(&record),
            vec![
                Block::Heading2(EXECUTIVE_SUMMARY_HEADING.into()),
                Block::Paragraph("요약".into()),
                Block::Divider,
                Block::Heading2(OVERVIEW_HEADING.into()),
                Block::Paragraph("개요".into()),
                Block::Divider,
                Block::Heading2(DISCUSSION_HEADING.into()),
                Block::Heading3("3.1 주제".into()),
                Block::Paragraph("내용".into()),
                Block::Divider,
                Block::Heading2(DECISIONS_HEADING.into()),
                Block::BulletedListItem("결정".into()),
                Block::Divider,
                Block::Heading2(NEXT_ACTIONS_HEADING.into()),
                Block::ToDo {
                    text: "[김철수] 작성 (기한: 2024-02-01)".into(),
                    checked: false,
                },
            ]
        );
        assert_eq!(page_title(&record), "20240105_기획");
    }

    #[test]
    fn test_discussion_heading_prefix() {
        assert_eq!(discussion_heading(0, "3.1 Topic"), "3.1 Topic");
        assert_eq!(discussion_heading(0, "Topic"), "3.1 Topic");
        assert_eq!(discussion_heading(1, "Topic"), "3.2 Topic");
        assert_eq!(discussion_heading(1, "2. Topic"), "2. Topic");
        assert_eq!(discussion_heading(0, "3.10 Topic"), "3.1 3.10 Topic");
        assert_eq!(discussion_heading(0, "1분기 계획"), "3.1 1분기 계획");
        assert_eq!(discussion_heading(2, "  "), "3.3");
    }

    #[test]
    fn test_details_list_versus_string() {
        let record = MeetingRecord {
            discussion_points: vec![
                point("목록", Some(Details::Items(vec!["a".into(), "b".into(), "c".into()]))),
                point("문단", Some(Details::Paragraph("하나의 문단".into()))),
                point("없음", None),
            ],
            ..Default::default()
        };
        let blocks = build_blocks(&record);

        let bulleted = blocks
            .iter()
            .filter(|b| matches!(b, Block::BulletedListItem(_)))
            .count();
        let paragraphs = blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .count();
        assert_eq!(bulleted, 3);
        assert_eq!(paragraphs, 1);
        assert_eq!(blocks[blocks.len() - 2], Block::Heading3("3.3 없음".into()));
        assert_eq!(blocks.last(), Some(&Block::Divider));
    }

    #[test]
    fn test_missing_assignee_and_due_date() {
        let action = NextAction {
            assignee: None,
            task: "회의록 공유".into(),
            due_date: None,
        };
        assert_eq!(action_item_text(&action), "[담당자 미정] 회의록 공유 (기한: 미정)");

        let blocks = build_blocks(&MeetingRecord {
            next_actions: vec![action],
            ..Default::default()
        });
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1], Block::ToDo { checked: false, .. }));
    }

    #[test]
    fn test_bulleted_summary_and_blank_entries() {
        let record = MeetingRecord {
            executive_summary: Some(Summary::Bullets(vec!["첫째".into(), " ".into(), "둘째".into()])),
            decisions: vec!["".into()],
            ..Default::default()
        };
        assert_eq!(
            build_blocks(&record),
            vec![
                Block::Heading2(EXECUTIVE_SUMMARY_HEADING.into()),
                Block::BulletedListItem("첫째".into()),
                Block::BulletedListItem("둘째".into()),
                Block::Divider,
            ]
        );
    }

    #[test]
    fn test_next_actions_section_has_no_trailing_divider() {
        let record = MeetingRecord {
            decisions: vec!["결정".into()],
            next_actions: vec![NextAction::default()],
            ..Default::default()
        };
        let blocks = build_blocks(&record);
        assert!(matches!(blocks.last(), Some(Block::ToDo { .. })));
    }
}
