//! In-memory document model.
//!
//! A [`Document`] is an ordered list of [`Block`]s plus page furniture
//! (running header, page-number footer) and the [`Typography`] the style
//! sheet is generated from. Blocks before the first [`Block::SectionBreak`]
//! form the cover section, which never shows the header or footer.

use std::path::Path;

use crate::DocxError;
use crate::picture::Picture;

/// Paragraph styles known to the generated style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphStyle {
    #[default]
    Normal,
    Title,
    /// Heading level, clamped to 1..=5 when written.
    Heading(u8),
    CodeBlock,
    Quote,
    ListBullet,
    ListNumber,
}

impl ParagraphStyle {
    /// Style identifier referenced from `w:pStyle`.
    #[must_use]
    pub fn style_id(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Title => "Title",
            Self::Heading(level) => match level.clamp(1, 5) {
                1 => "Heading1",
                2 => "Heading2",
                3 => "Heading3",
                4 => "Heading4",
                _ => "Heading5",
            },
            Self::CodeBlock => "CodeBlock",
            Self::Quote => "Quote",
            Self::ListBullet => "ListBullet",
            Self::ListNumber => "ListNumber",
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Character formatting of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProps {
    pub bold: bool,
    pub italic: bool,
    /// Font family; `None` inherits from the paragraph style.
    pub font: Option<String>,
    /// Font size in points; `None` inherits from the paragraph style.
    pub size: Option<u32>,
}

/// What a run carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Text. Embedded `\n` become line breaks and `\t` become tabs.
    Text(String),
    Picture(Picture),
    /// `PAGE` field.
    PageNumber,
}

/// A span of uniformly formatted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub content: RunContent,
    pub props: RunProps,
}

impl Run {
    /// Text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(RunContent::Text(text.into()))
    }

    /// Picture run.
    #[must_use]
    pub fn picture(picture: Picture) -> Self {
        Self::with_content(RunContent::Picture(picture))
    }

    /// Page number field run.
    #[must_use]
    pub fn page_number() -> Self {
        Self::with_content(RunContent::PageNumber)
    }

    fn with_content(content: RunContent) -> Self {
        Self {
            content,
            props: RunProps::default(),
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.props.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.props.italic = true;
        self
    }

    #[must_use]
    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.props.font = Some(font.into());
        self
    }

    #[must_use]
    pub fn size(mut self, points: u32) -> Self {
        self.props.size = Some(points);
        self
    }

    /// Text of the run, empty for non-text content.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match &self.content {
            RunContent::Text(text) => text,
            _ => "",
        }
    }
}

/// A paragraph: style, layout and an ordered list of runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub alignment: Option<Alignment>,
    /// Space before, in points.
    pub space_before: Option<u32>,
    /// Space after, in points.
    pub space_after: Option<u32>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Empty `Normal` paragraph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty paragraph with the given style.
    #[must_use]
    pub fn styled(style: ParagraphStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    #[must_use]
    pub fn space_before(mut self, points: u32) -> Self {
        self.space_before = Some(points);
        self
    }

    #[must_use]
    pub fn space_after(mut self, points: u32) -> Self {
        self.space_after = Some(points);
        self
    }

    #[must_use]
    pub fn add_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    /// Concatenated text of all runs.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::as_text).collect()
    }
}

/// A grid of plain-text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Rows of cell text; all rows have the same length.
    pub rows: Vec<Vec<String>>,
    /// Render the first row as a bold, repeating header row.
    pub header_row: bool,
}

impl Table {
    /// Number of columns (width of the first row).
    #[must_use]
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// A top-level body element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    PageBreak,
    /// Ends the current section; the next one starts on a new page.
    SectionBreak,
    /// `TOC` field covering heading levels `from..=to`.
    TableOfContents { from: u8, to: u8 },
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Self::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}

/// Running header: logo (or placeholder text) on the left, title on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHeader {
    pub logo: Option<Picture>,
    /// Text shown when no logo is available.
    pub logo_placeholder: String,
    pub title: String,
}

/// Fonts and sizes used to generate the style sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typography {
    pub body_font: String,
    pub code_font: String,
    /// Body text size in points.
    pub body_size: u32,
    /// Code block size in points.
    pub code_size: u32,
    pub title_size: u32,
    pub table_size: u32,
    /// Sizes for heading levels 1 through 5.
    pub heading_sizes: [u32; 5],
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_owned(),
            code_font: "Courier New".to_owned(),
            body_size: 10,
            code_size: 8,
            title_size: 20,
            table_size: 9,
            heading_sizes: [16, 14, 12, 11, 10],
        }
    }
}

/// A document under construction.
#[derive(Debug, Clone, Default)]
pub struct Document {
    blocks: Vec<Block>,
    header: Option<PageHeader>,
    page_numbers: bool,
    title: Option<String>,
    typography: Typography,
}

impl Document {
    /// Empty document with default typography.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty document with the given typography.
    #[must_use]
    pub fn with_typography(typography: Typography) -> Self {
        Self {
            typography,
            ..Self::default()
        }
    }

    pub fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.push(paragraph);
    }

    pub fn add_table(&mut self, table: Table) {
        self.push(table);
    }

    pub fn add_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    pub fn add_section_break(&mut self) {
        self.blocks.push(Block::SectionBreak);
    }

    pub fn add_table_of_contents(&mut self, from: u8, to: u8) {
        self.blocks.push(Block::TableOfContents { from, to });
    }

    /// Set the running header of the content section.
    pub fn set_header(&mut self, header: PageHeader) {
        self.header = Some(header);
    }

    /// Show a centered page number in the footer of the content section.
    pub fn set_page_numbers(&mut self, enabled: bool) {
        self.page_numbers = enabled;
    }

    /// Set the document title stored in the package properties.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn header(&self) -> Option<&PageHeader> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn page_numbers(&self) -> bool {
        self.page_numbers
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn typography(&self) -> &Typography {
        &self.typography
    }

    /// Iterate over body paragraphs, skipping tables and breaks.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Serialize the document to `.docx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        crate::package::write_package(self)
    }

    /// Serialize the document and write it to `path`.
    pub fn save(&self, path: &Path) -> Result<(), DocxError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_style_ids_clamp() {
        assert_eq!(ParagraphStyle::Heading(1).style_id(), "Heading1");
        assert_eq!(ParagraphStyle::Heading(5).style_id(), "Heading5");
        assert_eq!(ParagraphStyle::Heading(9).style_id(), "Heading5");
        assert_eq!(ParagraphStyle::Heading(0).style_id(), "Heading1");
    }

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let paragraph = Paragraph::new()
            .add_run(Run::text("a "))
            .add_run(Run::page_number())
            .add_run(Run::text("b").bold());

        assert_eq!(paragraph.text(), "a b");
    }

    #[test]
    fn test_run_builders_set_props() {
        let run = Run::text("x").bold().italic().font("Courier New").size(9);

        assert_eq!(
            run.props,
            RunProps {
                bold: true,
                italic: true,
                font: Some("Courier New".to_owned()),
                size: Some(9),
            }
        );
    }

    #[test]
    fn test_table_columns_from_first_row() {
        let table = Table {
            rows: vec![vec!["A".to_owned(), "B".to_owned()]],
            header_row: true,
        };
        assert_eq!(table.columns(), 2);
        assert_eq!(Table::default().columns(), 0);
    }

    #[test]
    fn test_document_paragraphs_skip_other_blocks() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::new().add_run(Run::text("one")));
        doc.add_page_break();
        doc.add_table(Table::default());
        doc.add_paragraph(Paragraph::new().add_run(Run::text("two")));

        let texts: Vec<String> = doc.paragraphs().map(Paragraph::text).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(doc.blocks().len(), 4);
    }
}
