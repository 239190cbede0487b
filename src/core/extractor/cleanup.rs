//! Cleanup of text extracted from module handbook pages

use regex::Regex;
use std::sync::LazyLock;

/// Lines made of ten or more `=` characters (page separators)
static SEPARATOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*={10,}[ \t]*(?:\n|$)").expect("valid regex")
});

/// `PAGE 12` style page labels on their own line
static PAGE_LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*page[ \t]+\d+[ \t]*(?:\n|$)").expect("valid regex")
});

/// Running page header of the handbook followed by its page number
static HANDBOOK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Modulhandbuch B\. Sc\. Informatik\s*\n\s*\d+\s*\n?").expect("valid regex")
});

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Strip page boundaries and repeated headers, collapse runs of three or more
/// newlines to a blank line and trim the result.
///
/// Applying it twice yields the same string as applying it once.
#[must_use]
pub fn clean_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let mut text = text.replace("\r\n", "\n");
    // Removing one marker can join fragments of another, so strip to a fixpoint.
    loop {
        let stripped = strip_markers(&text);
        if stripped == text {
            break;
        }
        text = stripped;
    }
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

fn strip_markers(text: &str) -> String {
    let text = PAGE_LABEL_LINE.replace_all(text, "");
    let text = SEPARATOR_LINE.replace_all(&text, "");
    HANDBOOK_HEADER.replace_all(&text, "").into_owned()
}
