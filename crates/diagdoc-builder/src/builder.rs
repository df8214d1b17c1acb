//! Document assembly: cover page, page furniture, table of contents,
//! primary content and appendices.

use std::path::{Path, PathBuf};

use diagdoc_config::{AppendixConfig, DocumentProfile, TypographyConfig};
use diagdoc_docx::{
    Alignment, Document, PageHeader, Paragraph, ParagraphStyle, Picture, Run, Typography,
};
use diagdoc_renderer::{ContentEmitter, EmitOptions, segment};

use crate::BuildError;

/// Cover logo width in inches.
const COVER_LOGO_WIDTH: f64 = 4.0;
/// Header logo width in inches.
const PAGE_LOGO_WIDTH: f64 = 1.0;
const COVER_PLACEHOLDER_SIZE: u32 = 16;
const APPENDIX_TEXT_SIZE: u32 = 9;
const DESCRIPTION_SIZE: u32 = 9;

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Written `.docx` file.
    pub output: PathBuf,
    /// Titles of appendices included, in order.
    pub appendices_included: Vec<String>,
    /// Titles of appendices skipped because they were missing or unreadable.
    pub appendices_skipped: Vec<String>,
}

/// Builds one document from a [`DocumentProfile`].
pub struct DocumentBuilder<'a> {
    profile: &'a DocumentProfile,
}

impl<'a> DocumentBuilder<'a> {
    #[must_use]
    pub fn new(profile: &'a DocumentProfile) -> Self {
        Self { profile }
    }

    /// Assemble the document and write it to the profile's output path.
    ///
    /// Nothing is written when the primary file is missing or unreadable.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let (doc, report) = self.assemble()?;

        if let Some(parent) = report.output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        doc.save(&report.output)?;
        tracing::info!(path = %report.output.display(), "Document saved");
        Ok(report)
    }

    /// Assemble the document in memory.
    pub fn assemble(&self) -> Result<(Document, BuildReport), BuildError> {
        let profile = self.profile;
        let mut doc = Document::with_typography(typography(&profile.typography));
        doc.set_title(profile.title.as_str());

        self.add_cover(&mut doc);
        doc.add_section_break();
        self.add_page_furniture(&mut doc);
        self.add_table_of_contents(&mut doc);
        self.add_primary(&mut doc)?;

        let mut report = BuildReport {
            output: profile.output.clone(),
            appendices_included: Vec::new(),
            appendices_skipped: Vec::new(),
        };
        self.add_appendices(&mut doc, &mut report);

        Ok((doc, report))
    }

    fn add_cover(&self, doc: &mut Document) {
        let profile = self.profile;

        doc.add_paragraph(Paragraph::new().space_before(72));
        let logo = match load_picture(&profile.cover_logo, COVER_LOGO_WIDTH) {
            Some(picture) => Run::picture(picture),
            None => Run::text(profile.cover_logo_placeholder.as_str()).size(COVER_PLACEHOLDER_SIZE),
        };
        doc.add_paragraph(Paragraph::new().align(Alignment::Center).add_run(logo));
        doc.add_paragraph(Paragraph::new().space_before(36));

        doc.add_paragraph(
            Paragraph::styled(ParagraphStyle::Title).add_run(Run::text(profile.title.as_str())),
        );
        if !profile.subtitle.is_empty() {
            doc.add_paragraph(
                Paragraph::new().align(Alignment::Center).add_run(
                    Run::text(profile.subtitle.as_str()).size(profile.subtitle_size),
                ),
            );
        }
        if !profile.metadata.is_empty() {
            doc.add_paragraph(
                Paragraph::new()
                    .align(Alignment::Center)
                    .space_before(24)
                    .add_run(Run::text(profile.metadata.join("\n")).size(profile.metadata_size)),
            );
        }
    }

    fn add_page_furniture(&self, doc: &mut Document) {
        let profile = self.profile;
        doc.set_header(PageHeader {
            logo: load_picture(&profile.page_logo, PAGE_LOGO_WIDTH),
            logo_placeholder: profile.logo_placeholder.clone(),
            title: profile.header_title().to_owned(),
        });
        doc.set_page_numbers(true);
    }

    fn add_table_of_contents(&self, doc: &mut Document) {
        doc.add_paragraph(
            Paragraph::styled(ParagraphStyle::Heading(1))
                .add_run(Run::text(self.profile.toc_title.as_str())),
        );
        doc.add_table_of_contents(1, 3);
        doc.add_page_break();
    }

    fn add_primary(&self, doc: &mut Document) -> Result<(), BuildError> {
        let path = &self.profile.primary;
        if !path.exists() {
            return Err(BuildError::MissingPrimary(path.clone()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| BuildError::ReadPrimary {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "Processing primary file");
        self.emit_markdown(doc, &content, path);
        Ok(())
    }

    fn add_appendices(&self, doc: &mut Document, report: &mut BuildReport) {
        let appendices = &self.profile.appendices;
        if appendices.is_empty() {
            return;
        }

        doc.add_page_break();
        doc.add_paragraph(
            Paragraph::styled(ParagraphStyle::Heading(1))
                .add_run(Run::text(self.profile.appendix_heading.as_str())),
        );

        for (index, appendix) in appendices.iter().enumerate() {
            let Some(content) = read_appendix(appendix) else {
                report.appendices_skipped.push(appendix.title.clone());
                continue;
            };
            tracing::info!(path = %appendix.file.display(), "Processing appendix");

            doc.add_paragraph(
                Paragraph::styled(ParagraphStyle::Heading(2))
                    .add_run(Run::text(appendix.title.as_str())),
            );
            if let Some(description) = &appendix.description {
                let body_font = doc.typography().body_font.clone();
                doc.add_paragraph(
                    Paragraph::new().space_after(12).add_run(
                        Run::text(description.as_str())
                            .font(body_font)
                            .size(DESCRIPTION_SIZE)
                            .italic(),
                    ),
                );
            }

            if is_plain_text(&appendix.file) {
                add_plain_text(doc, &content);
            } else {
                self.emit_markdown(doc, &content, &appendix.file);
            }

            if index + 1 < appendices.len() {
                doc.add_page_break();
            }
            report.appendices_included.push(appendix.title.clone());
        }
    }

    /// Segment and emit markdown, resolving images next to `source`.
    fn emit_markdown(&self, doc: &mut Document, content: &str, source: &Path) {
        let profile = self.profile;
        let base_dir = source.parent().unwrap_or(Path::new("."));
        let options = EmitOptions {
            image_width: profile.image_width,
            image_captions: profile.image_captions,
            image_label: profile.image_label.clone(),
            caption_label: profile.caption_label.clone(),
        };
        ContentEmitter::new(base_dir)
            .with_options(options)
            .emit(doc, &segment(content));
    }
}

/// Convert configured typography into the document model's.
fn typography(config: &TypographyConfig) -> Typography {
    Typography {
        body_font: config.body_font.clone(),
        code_font: config.code_font.clone(),
        body_size: config.body_size,
        code_size: config.code_size,
        title_size: config.title_size,
        table_size: config.table_size,
        heading_sizes: config.heading_sizes,
    }
}

/// Load an optional image asset, logging why it is unavailable.
fn load_picture(path: &Path, width_inches: f64) -> Option<Picture> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Logo not found, using placeholder");
        return None;
    }
    match Picture::from_file(path, width_inches) {
        Ok(picture) => Some(picture),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load logo");
            None
        }
    }
}

fn read_appendix(appendix: &AppendixConfig) -> Option<String> {
    if !appendix.file.exists() {
        tracing::warn!(path = %appendix.file.display(), "Appendix not found, skipping");
        return None;
    }
    match std::fs::read_to_string(&appendix.file) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::warn!(path = %appendix.file.display(), error = %e, "Failed to read appendix, skipping");
            None
        }
    }
}

fn is_plain_text(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// Emit each non-blank line as a fixed-width paragraph.
fn add_plain_text(doc: &mut Document, content: &str) {
    let code_font = doc.typography().code_font.clone();
    for line in content.lines().filter(|line| !line.trim().is_empty()) {
        doc.add_paragraph(
            Paragraph::new().add_run(
                Run::text(line)
                    .font(code_font.as_str())
                    .size(APPENDIX_TEXT_SIZE),
            ),
        );
    }
}
