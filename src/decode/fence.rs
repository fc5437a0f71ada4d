//! Code fence stripping for double-encoded payloads.
//!
//! Some model backends wrap their JSON answer in a markdown code block before
//! it is placed in the outer `response` field:
//!
//! ```text
//! {"response": "```json\n{\"response\": \"hi\", \"products\": []}\n```"}
//! ```

/// Remove a surrounding markdown code fence, if any.
///
/// Strips leading and trailing runs of backticks, an optional language tag
/// right after the opening fence, and surrounding whitespace. Text without a
/// fence is only trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let after_open = trimmed.trim_start_matches('`');
    let body = if after_open.len() != trimmed.len() {
        skip_language_tag(after_open)
    } else {
        after_open
    };

    body.trim_end_matches('`').trim()
}

/// Skip an info string like `json` directly after an opening fence.
fn skip_language_tag(text: &str) -> &str {
    let tag_len = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '+'))
        .unwrap_or(text.len());

    if tag_len == 0 {
        return text;
    }

    match text[tag_len..].chars().next() {
        Some(c) if c.is_whitespace() => &text[tag_len..],
        None => "",
        // Not a tag, e.g. `json{...` is left alone
        Some(_) => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_trimmed_only() {
        assert_eq!(strip_code_fence("  {\"a\":1} \n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("hello"), "hello");
    }

    #[test]
    fn test_bare_fence() {
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_fence_with_language_tag() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```JSON {\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_single_backticks() {
        assert_eq!(strip_code_fence("`{\"a\":1}`"), "{\"a\":1}");
    }

    #[test]
    fn test_only_backticks() {
        assert_eq!(strip_code_fence("``````"), "");
        assert_eq!(strip_code_fence("```json"), "");
    }

    #[test]
    fn test_glued_word_is_not_a_tag() {
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "json{\"a\":1}");
    }
}
