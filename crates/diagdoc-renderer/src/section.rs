//! Splitting markdown text into a flat sequence of header-delimited sections.

use std::sync::LazyLock;

use regex::Regex;

/// ATX header: one to six `#`, whitespace, then the title.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

/// A header plus the body lines that follow it.
///
/// Text before the first header forms a section with level 0 and an empty
/// title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Header level (1-6), or 0 for preamble text.
    pub level: u8,
    pub title: String,
    /// Raw body lines, without line terminators.
    pub content: Vec<String>,
}

impl Section {
    fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Split markdown into sections, one per header line.
///
/// Lines that look like headers but are malformed (no whitespace after the
/// `#` run, more than six `#`) are kept as content.
#[must_use]
pub fn segment(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::default();

    for line in markdown.lines() {
        if let Some(caps) = HEADER_RE.captures(line) {
            // Capture is 1..=6 ASCII bytes
            #[allow(clippy::cast_possible_truncation)]
            let level = caps[1].len() as u8;
            let finished = std::mem::replace(
                &mut current,
                Section {
                    level,
                    title: caps[2].trim().to_owned(),
                    content: Vec::new(),
                },
            );
            if !finished.is_empty() {
                sections.push(finished);
            }
        } else {
            current.content.push(line.to_owned());
        }
    }

    if !current.is_empty() {
        sections.push(current);
    }
    sections
}
