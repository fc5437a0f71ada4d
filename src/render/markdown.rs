//! Markdown-lite: the small, fixed set of formatting rules chat replies use.
//!
//! Rules are applied in order, each on the output of the previous one:
//! 1. `**bold**` becomes `<strong>bold</strong>`
//! 2. a line starting with `<digits>. ` becomes a numbered item paragraph
//! 3. two or more newlines become a paragraph break
//! 4. any remaining newline becomes a line break
//!
//! The result is trimmed. The input is not escaped here; callers decide
//! whether the text is trusted.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid bold regex pattern"));

static NUMBERED_ITEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(\d+\.[ \t]+)([^\n]+)").expect("Invalid numbered item regex pattern")
});

static PARAGRAPH_BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("Invalid paragraph break regex pattern"));

/// Apply the markdown-lite rules to `text`.
pub fn format_markdown_lite(text: &str) -> String {
    let text = BOLD_REGEX.replace_all(text, "<strong>$1</strong>");
    let text = NUMBERED_ITEM_REGEX.replace_all(&text, r#"<p class="numbered-item">$1$2</p>"#);
    let text = PARAGRAPH_BREAK_REGEX.replace_all(&text, "</p><p>");
    let text = text.replace('\n', "<br>");
    text.trim().to_string()
}
