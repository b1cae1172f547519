//! Recovering a JSON object from free-form model output.

const FENCE_WITH_TAG: &str = "```json";
const FENCE: &str = "```";

/// Removes every Markdown code-fence marker, tagged or not.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace(FENCE_WITH_TAG, "").replace(FENCE, "")
}

/// Returns the candidate JSON payload of a model reply.
///
/// Code fences are stripped first, then the span from the first `{` to the
/// last `}` (inclusive) is kept, discarding commentary around the object.
/// When no such span exists the stripped text is returned unchanged, so the
/// caller's parse fails and reports it.
///
/// This is a heuristic, not a parser. Commentary that itself contains a
/// brace (a `{` before the object or a `}` after it) widens the span and
/// the result will not parse.
pub fn extract_json_object(raw: &str) -> String {
    let cleaned = strip_code_fences(raw);
    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(open), Some(close)) if open < close => cleaned[open..=close].to_string(),
        _ => cleaned,
    }
}

/// Truncates `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
