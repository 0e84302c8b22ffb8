use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_]{3,}").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());
static LINE_EDGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?\n ?").unwrap());
static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strips markup and layout noise from a stored document.
///
/// Line breaks survive; runs of other whitespace become one space and at most
/// one blank line separates paragraphs. `clean(clean(x)) == clean(x)`.
///
/// Unlike a plain `\s+` collapse, newlines are kept on purpose: answers are
/// composed line by line from the cleaned text.
pub fn clean(text: &str) -> String {
    let text = TAG_RE.replace_all(text, "");
    let text = RULE_RE.replace_all(&text, "");
    let text = SPACE_RE.replace_all(&text, " ");
    let text = LINE_EDGE_RE.replace_all(&text, "\n");
    let text = BLANK_LINES_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}
