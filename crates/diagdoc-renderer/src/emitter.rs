//! Section-to-document emission.
//!
//! Each section's lines are scanned once. Fenced code is buffered until its
//! closing fence, consecutive pipe lines are buffered until the table ends,
//! and every other line becomes one paragraph (or image) on its own.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use diagdoc_docx::{Alignment, Document, Paragraph, ParagraphStyle, Picture, Run, Typography};

use crate::inline::{Span, split_spans};
use crate::section::Section;
use crate::table::parse_table;

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!\[(.*?)\]\((.*?)\)").unwrap());
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3,}$").unwrap());
static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").unwrap());

const CODE_FENCE: &str = "```";

/// Emission settings that are not part of the document typography.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOptions {
    /// Display width of inserted images, in inches.
    pub image_width: f64,
    /// Add a `"<caption_label>: <alt>"` line under each inserted image.
    pub image_captions: bool,
    /// Label of the placeholder shown for missing images: `"[<label>: <alt>]"`.
    pub image_label: String,
    pub caption_label: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            image_width: 3.0,
            image_captions: false,
            image_label: "image".to_owned(),
            caption_label: "Figure".to_owned(),
        }
    }
}

/// Appends formatted blocks for markdown sections to a [`Document`].
///
/// Fonts and sizes come from the document's [`Typography`]; image paths are
/// resolved against the emitter's base directory.
#[derive(Debug, Clone)]
pub struct ContentEmitter {
    base_dir: PathBuf,
    options: EmitOptions,
}

/// Buffers of the line scanner for one section.
#[derive(Default)]
struct ScanState {
    in_code: bool,
    code_lines: Vec<String>,
    table_lines: Vec<String>,
}

impl ContentEmitter {
    /// Create an emitter resolving images relative to `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            options: EmitOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EmitOptions) -> Self {
        self.options = options;
        self
    }

    /// Emit every section in order.
    pub fn emit(&self, doc: &mut Document, sections: &[Section]) {
        for section in sections {
            self.emit_section(doc, section);
        }
    }

    fn emit_section(&self, doc: &mut Document, section: &Section) {
        if !section.title.is_empty() && section.level <= 5 {
            doc.add_paragraph(
                Paragraph::styled(ParagraphStyle::Heading(section.level.clamp(1, 5)))
                    .add_run(Run::text(section.title.as_str())),
            );
        }

        let mut state = ScanState::default();
        for raw in &section.content {
            if raw.trim().starts_with(CODE_FENCE) {
                if state.in_code {
                    Self::flush_code(doc, &mut state.code_lines);
                    state.in_code = false;
                } else {
                    Self::flush_table(doc, &mut state.table_lines);
                    state.in_code = true;
                }
                continue;
            }
            if state.in_code {
                state.code_lines.push(raw.clone());
                continue;
            }

            let line = raw.trim();
            if let Some(caps) = IMAGE_RE.captures(line) {
                Self::flush_table(doc, &mut state.table_lines);
                self.emit_image(doc, &caps[1], &caps[2]);
                continue;
            }
            if !line.is_empty() && line.contains('|') {
                state.table_lines.push(line.to_owned());
                continue;
            }
            Self::flush_table(doc, &mut state.table_lines);
            if line.is_empty() || RULE_RE.is_match(line) {
                continue;
            }
            Self::emit_paragraph(doc, line);
        }

        Self::flush_table(doc, &mut state.table_lines);
        Self::flush_code(doc, &mut state.code_lines);
    }

    fn flush_table(doc: &mut Document, lines: &mut Vec<String>) {
        if lines.is_empty() {
            return;
        }
        if let Some(table) = parse_table(lines) {
            doc.add_table(table);
        }
        lines.clear();
    }

    fn flush_code(doc: &mut Document, lines: &mut Vec<String>) {
        if lines.is_empty() {
            return;
        }
        let typography = doc.typography();
        let run = Run::text(lines.join("\n"))
            .font(typography.code_font.as_str())
            .size(typography.code_size);
        doc.add_paragraph(Paragraph::styled(ParagraphStyle::CodeBlock).add_run(run));
        lines.clear();
    }

    fn emit_image(&self, doc: &mut Document, alt: &str, target: &str) {
        let path = self.base_dir.join(target);
        let picture = if path.exists() {
            match Picture::from_file(&path, self.options.image_width) {
                Ok(picture) => Some(picture),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load image");
                    None
                }
            }
        } else {
            tracing::warn!(path = %path.display(), "Image not found");
            None
        };

        let Some(picture) = picture else {
            let placeholder = format!("[{}: {alt}]", self.options.image_label);
            doc.add_paragraph(
                Paragraph::new()
                    .align(Alignment::Center)
                    .add_run(Run::text(placeholder).italic()),
            );
            return;
        };

        doc.add_paragraph(
            Paragraph::new()
                .align(Alignment::Center)
                .add_run(Run::picture(picture)),
        );
        if self.options.image_captions {
            let caption = format!("{}: {alt}", self.options.caption_label);
            doc.add_paragraph(
                Paragraph::new()
                    .align(Alignment::Center)
                    .add_run(Run::text(caption).italic()),
            );
        }
    }

    fn emit_paragraph(doc: &mut Document, line: &str) {
        let (style, text) = if let Some(rest) = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
        {
            (ParagraphStyle::ListBullet, rest.trim())
        } else if let Some(m) = NUMBERED_RE.find(line) {
            (ParagraphStyle::ListNumber, &line[m.end()..])
        } else if let Some(rest) = line.strip_prefix('>') {
            (ParagraphStyle::Quote, rest.trim())
        } else {
            (ParagraphStyle::Normal, line)
        };

        let typography = doc.typography();
        let mut paragraph = Paragraph::styled(style);
        for span in split_spans(text) {
            paragraph = paragraph.add_run(span_run(&span, typography));
        }
        doc.add_paragraph(paragraph);
    }
}

/// Build the run for one inline span.
fn span_run(span: &Span, typography: &Typography) -> Run {
    let run = Run::text(span.text()).size(typography.body_size);
    match span {
        Span::Plain(_) => run.font(typography.body_font.as_str()),
        Span::Bold(_) => run.font(typography.body_font.as_str()).bold(),
        Span::Italic(_) => run.font(typography.body_font.as_str()).italic(),
        Span::Code(_) => run.font(typography.code_font.as_str()),
    }
}
