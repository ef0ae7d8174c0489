use std::sync::LazyLock;

use regex::Regex;

/// Cell value used when a field carries no data.
pub const PLACEHOLDER: &str = "-";

/// Inline replacement for a line break inside a table cell.
pub const LINE_BREAK: &str = "<br>";

/// Turns freeform text into a single-line cell value.
pub fn clean(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return PLACEHOLDER.to_string();
    }
    trimmed
        .replace("\r\n", LINE_BREAK)
        .replace(['\r', '\n'], LINE_BREAK)
}

/// Collects `@handle` mentions in order of appearance, duplicates included.
pub fn extract_mentions(text: &str) -> String {
    static MENTION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"@([A-Za-z0-9-]+)").expect("valid regex"));

    let mentions = MENTION_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect::<Vec<_>>();

    if mentions.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        mentions.join(", ")
    }
}

pub fn escape_cell(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut prev = None;
    for ch in value.chars() {
        if ch == '|' && prev != Some('\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
        prev = Some(ch);
    }
    escaped
}
