//! Inline emphasis and code spans.
//!
//! Only three span kinds are recognized: `**bold**`, `*italic*` and
//! `` `code` ``. Matching is non-greedy and leftmost; at a given position
//! bold is tried before italic, italic before code. Spans never nest and never
//! cross line boundaries.

use std::sync::LazyLock;

use regex::Regex;

static SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\*\*.*?\*\*|\*.*?\*|`.*?`)").unwrap());

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());

/// A fragment of inline text with its formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
}

impl Span {
    /// Text without delimiters.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Bold(text) | Self::Italic(text) | Self::Code(text) => text,
        }
    }

    fn from_match(fragment: &str) -> Self {
        if fragment.len() >= 4 && fragment.starts_with("**") && fragment.ends_with("**") {
            Self::Bold(fragment[2..fragment.len() - 2].to_owned())
        } else if fragment.starts_with('*') {
            Self::Italic(fragment[1..fragment.len() - 1].to_owned())
        } else {
            Self::Code(fragment[1..fragment.len() - 1].to_owned())
        }
    }
}

/// Split a line of text into spans.
///
/// Empty plain fragments (between adjacent spans, or at either end) are not
/// returned.
#[must_use]
pub fn split_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in SPAN_RE.find_iter(text) {
        if m.start() > last {
            spans.push(Span::Plain(text[last..m.start()].to_owned()));
        }
        spans.push(Span::from_match(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        spans.push(Span::Plain(text[last..].to_owned()));
    }
    spans
}

/// Remove bold, italic and code delimiters, keeping the enclosed text.
///
/// Used for table cells, which carry plain text only.
#[must_use]
pub fn strip_inline_markup(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = CODE_RE.replace_all(&text, "$1");
    text.trim().to_owned()
}
