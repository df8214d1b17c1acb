//! WordprocessingML serialization of the document body, header and footer.
//!
//! Each part is written by a [`PartWriter`], which collects the part's
//! relationships (pictures) and registers picture bytes in the shared
//! [`MediaStore`].

use std::borrow::Cow;
use std::fmt::Write;

use crate::model::{
    Alignment, Block, Document, PageHeader, Paragraph, ParagraphStyle, Run, RunContent, RunProps,
    Table, Typography,
};
use crate::picture::{ImageKind, Picture};

/// Namespace declarations shared by document, header and footer parts.
pub(crate) const PART_NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#
);

pub(crate) const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Relationship id of the running header part.
pub(crate) const HEADER_REL_ID: &str = "rIdHeader1";
/// Relationship id of the footer part.
pub(crate) const FOOTER_REL_ID: &str = "rIdFooter1";

/// Usable text width of a Letter page with 1in margins, in twips.
const TEXT_WIDTH_TWIPS: usize = 9360;
const HEADER_LOGO_COL_TWIPS: usize = 2160;
const HEADER_TITLE_COL_TWIPS: usize = 7200;

/// A relationship from a part to another part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: &'static str,
    pub target: String,
}

/// A media file to be stored under `word/media/`.
#[derive(Debug)]
pub(crate) struct MediaEntry {
    /// File name inside `word/media/` (e.g. `image1.png`).
    pub file_name: String,
    pub data: Vec<u8>,
    pub kind: ImageKind,
}

/// Media registry shared by all parts of one package.
#[derive(Debug, Default)]
pub(crate) struct MediaStore {
    pub entries: Vec<MediaEntry>,
}

impl MediaStore {
    /// Register a picture and return its 1-based index.
    fn register(&mut self, picture: &Picture) -> usize {
        let index = self.entries.len() + 1;
        self.entries.push(MediaEntry {
            file_name: format!("image{index}.{}", picture.kind().extension()),
            data: picture.data().to_vec(),
            kind: picture.kind(),
        });
        index
    }
}

/// Serialized part with its relationships.
pub(crate) struct WrittenPart {
    pub xml: String,
    pub rels: Vec<Relationship>,
}

/// Writer for one XML part.
pub(crate) struct PartWriter<'a> {
    out: String,
    rels: Vec<Relationship>,
    media: &'a mut MediaStore,
    typography: &'a Typography,
}

impl<'a> PartWriter<'a> {
    pub(crate) fn new(media: &'a mut MediaStore, typography: &'a Typography) -> Self {
        Self {
            out: String::with_capacity(8192),
            rels: Vec::new(),
            media,
            typography,
        }
    }

    fn finish(self) -> WrittenPart {
        WrittenPart {
            xml: self.out,
            rels: self.rels,
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        self.out.push_str("<w:p>");
        let has_props = paragraph.style != ParagraphStyle::Normal
            || paragraph.alignment.is_some()
            || paragraph.space_before.is_some()
            || paragraph.space_after.is_some();
        if has_props {
            self.out.push_str("<w:pPr>");
            if paragraph.style != ParagraphStyle::Normal {
                write!(
                    self.out,
                    r#"<w:pStyle w:val="{}"/>"#,
                    paragraph.style.style_id()
                )
                .unwrap();
            }
            if paragraph.space_before.is_some() || paragraph.space_after.is_some() {
                self.out.push_str("<w:spacing");
                if let Some(before) = paragraph.space_before {
                    write!(self.out, r#" w:before="{}""#, before * 20).unwrap();
                }
                if let Some(after) = paragraph.space_after {
                    write!(self.out, r#" w:after="{}""#, after * 20).unwrap();
                }
                self.out.push_str("/>");
            }
            if let Some(alignment) = paragraph.alignment {
                write!(self.out, r#"<w:jc w:val="{}"/>"#, alignment.as_str()).unwrap();
            }
            self.out.push_str("</w:pPr>");
        }
        for run in &paragraph.runs {
            self.run(run);
        }
        self.out.push_str("</w:p>");
    }

    fn run(&mut self, run: &Run) {
        match &run.content {
            RunContent::Text(text) => {
                self.open_run(&run.props);
                write_text(&mut self.out, text);
                self.out.push_str("</w:r>");
            }
            RunContent::Picture(picture) => {
                self.open_run(&run.props);
                self.drawing(picture);
                self.out.push_str("</w:r>");
            }
            RunContent::PageNumber => self.field(&run.props, "PAGE"),
        }
    }

    fn open_run(&mut self, props: &RunProps) {
        self.out.push_str("<w:r>");
        write_run_props(&mut self.out, props);
    }

    /// Simple field: begin, instruction, end. The result is computed by the
    /// word processor.
    fn field(&mut self, props: &RunProps, instruction: &str) {
        self.open_run(props);
        self.out
            .push_str(r#"<w:fldChar w:fldCharType="begin"/></w:r>"#);
        self.open_run(props);
        write!(
            self.out,
            r#"<w:instrText xml:space="preserve">{}</w:instrText></w:r>"#,
            escape(instruction)
        )
        .unwrap();
        self.open_run(props);
        self.out.push_str(r#"<w:fldChar w:fldCharType="end"/></w:r>"#);
    }

    fn drawing(&mut self, picture: &Picture) {
        let index = self.media.register(picture);
        let rel_id = format!("rIdMedia{index}");
        let file_name = self.media.entries[index - 1].file_name.clone();
        self.rels.push(Relationship {
            id: rel_id.clone(),
            rel_type: REL_IMAGE,
            target: format!("media/{file_name}"),
        });

        let cx = picture.width_emu();
        let cy = picture.height_emu();
        write!(
            self.out,
            concat!(
                r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
                r#"<wp:docPr id="{index}" name="Picture {index}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
                r#"</a:graphicData></a:graphic></wp:inline></w:drawing>"#
            ),
            cx = cx,
            cy = cy,
            index = index,
            name = file_name,
            rel = rel_id,
        )
        .unwrap();
    }

    fn table(&mut self, table: &Table) {
        let columns = table.columns();
        if columns == 0 {
            return;
        }
        let col_width = TEXT_WIDTH_TWIPS / columns;

        self.out.push_str(concat!(
            r#"<w:tbl><w:tblPr><w:tblStyle w:val="GridTable"/>"#,
            r#"<w:tblW w:w="0" w:type="auto"/><w:jc w:val="center"/>"#,
            r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" "#,
            r#"w:lastColumn="0" w:noHBand="0" w:noVBand="1"/></w:tblPr><w:tblGrid>"#
        ));
        for _ in 0..columns {
            write!(self.out, r#"<w:gridCol w:w="{col_width}"/>"#).unwrap();
        }
        self.out.push_str("</w:tblGrid>");

        let typography = self.typography;
        for (row_index, row) in table.rows.iter().enumerate() {
            let is_header = table.header_row && row_index == 0;
            self.out.push_str("<w:tr>");
            if is_header {
                self.out.push_str("<w:trPr><w:tblHeader/></w:trPr>");
            }
            for cell in row.iter().take(columns) {
                write!(
                    self.out,
                    r#"<w:tc><w:tcPr><w:tcW w:w="{col_width}" w:type="dxa"/></w:tcPr>"#
                )
                .unwrap();
                let mut run = Run::text(cell.as_str())
                    .font(typography.body_font.as_str())
                    .size(typography.table_size);
                if is_header {
                    run = run.bold();
                }
                self.paragraph(&Paragraph::new().align(Alignment::Left).add_run(run));
                self.out.push_str("</w:tc>");
            }
            self.out.push_str("</w:tr>");
        }
        self.out.push_str("</w:tbl>");
    }

    fn page_break(&mut self) {
        self.out
            .push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
    }

    fn table_of_contents(&mut self, from: u8, to: u8) {
        self.out.push_str("<w:p>");
        self.field(
            &RunProps::default(),
            &format!(r#"TOC \o "{from}-{to}" \h \z \u"#),
        );
        self.out.push_str("</w:p>");
    }

    fn section_properties(&mut self, with_furniture: bool, title_page: bool, doc: &Document) {
        self.out.push_str("<w:sectPr>");
        if with_furniture {
            if doc.header().is_some() {
                write!(
                    self.out,
                    r#"<w:headerReference w:type="default" r:id="{HEADER_REL_ID}"/>"#
                )
                .unwrap();
            }
            if doc.page_numbers() {
                write!(
                    self.out,
                    r#"<w:footerReference w:type="default" r:id="{FOOTER_REL_ID}"/>"#
                )
                .unwrap();
            }
        }
        self.out.push_str(concat!(
            r#"<w:pgSz w:w="12240" w:h="15840"/>"#,
            r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" "#,
            r#"w:header="720" w:footer="720" w:gutter="0"/>"#
        ));
        if title_page {
            self.out.push_str("<w:titlePg/>");
        }
        self.out.push_str("</w:sectPr>");
    }
}

/// Serialize `word/document.xml`.
pub(crate) fn write_document(doc: &Document, media: &mut MediaStore) -> WrittenPart {
    let typography = doc.typography();
    let mut writer = PartWriter::new(media, typography);
    write!(
        writer.out,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {PART_NAMESPACES}><w:body>"#
    )
    .unwrap();

    let mut section_index = 0;
    for block in doc.blocks() {
        match block {
            Block::Paragraph(paragraph) => writer.paragraph(paragraph),
            Block::Table(table) => writer.table(table),
            Block::PageBreak => writer.page_break(),
            Block::TableOfContents { from, to } => writer.table_of_contents(*from, *to),
            Block::SectionBreak => {
                // The first section is the cover page: no header or footer.
                let is_cover = section_index == 0;
                writer.out.push_str("<w:p><w:pPr>");
                writer.section_properties(!is_cover, is_cover, doc);
                writer.out.push_str("</w:pPr></w:p>");
                section_index += 1;
            }
        }
    }

    writer.section_properties(true, false, doc);
    writer.out.push_str("</w:body></w:document>");
    writer.finish()
}

/// Serialize `word/header1.xml`.
pub(crate) fn write_header(
    header: &PageHeader,
    typography: &Typography,
    media: &mut MediaStore,
) -> WrittenPart {
    let mut writer = PartWriter::new(media, typography);
    write!(
        writer.out,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:hdr {PART_NAMESPACES}>"#
    )
    .unwrap();
    write!(
        writer.out,
        concat!(
            r#"<w:tbl><w:tblPr><w:tblW w:w="{total}" w:type="dxa"/><w:tblLayout w:type="fixed"/></w:tblPr>"#,
            r#"<w:tblGrid><w:gridCol w:w="{logo}"/><w:gridCol w:w="{title}"/></w:tblGrid><w:tr>"#
        ),
        total = TEXT_WIDTH_TWIPS,
        logo = HEADER_LOGO_COL_TWIPS,
        title = HEADER_TITLE_COL_TWIPS,
    )
    .unwrap();

    let logo_run = match &header.logo {
        Some(picture) => Run::picture(picture.clone()),
        None => Run::text(header.logo_placeholder.as_str()).size(8),
    };
    writer.borderless_cell(HEADER_LOGO_COL_TWIPS, &Paragraph::new().add_run(logo_run));

    let title_run = Run::text(header.title.as_str())
        .font(typography.body_font.as_str())
        .size(10)
        .bold();
    writer.borderless_cell(
        HEADER_TITLE_COL_TWIPS,
        &Paragraph::new().align(Alignment::Right).add_run(title_run),
    );

    writer.out.push_str("</w:tr></w:tbl><w:p/></w:hdr>");
    writer.finish()
}

/// Serialize `word/footer1.xml` with a centered page number.
pub(crate) fn write_footer(typography: &Typography, media: &mut MediaStore) -> WrittenPart {
    let mut writer = PartWriter::new(media, typography);
    write!(
        writer.out,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:ftr {PART_NAMESPACES}>"#
    )
    .unwrap();
    let run = Run::page_number()
        .font(typography.body_font.as_str())
        .size(10);
    writer.paragraph(&Paragraph::new().align(Alignment::Center).add_run(run));
    writer.out.push_str("</w:ftr>");
    writer.finish()
}

impl PartWriter<'_> {
    fn borderless_cell(&mut self, width: usize, paragraph: &Paragraph) {
        write!(
            self.out,
            concat!(
                r#"<w:tc><w:tcPr><w:tcW w:w="{width}" w:type="dxa"/><w:tcBorders>"#,
                r#"<w:top w:val="none"/><w:left w:val="none"/><w:bottom w:val="none"/><w:right w:val="none"/>"#,
                r#"</w:tcBorders></w:tcPr>"#
            ),
            width = width
        )
        .unwrap();
        self.paragraph(paragraph);
        self.out.push_str("</w:tc>");
    }
}

fn write_run_props(out: &mut String, props: &RunProps) {
    if props == &RunProps::default() {
        return;
    }
    out.push_str("<w:rPr>");
    if let Some(font) = &props.font {
        let font = escape(font);
        write!(
            out,
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
        )
        .unwrap();
    }
    if props.bold {
        out.push_str("<w:b/>");
    }
    if props.italic {
        out.push_str("<w:i/>");
    }
    if let Some(size) = props.size {
        let half_points = size * 2;
        write!(
            out,
            r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#
        )
        .unwrap();
    }
    out.push_str("</w:rPr>");
}

/// Write run text, turning `\n` into line breaks and `\t` into tabs.
fn write_text(out: &mut String, text: &str) {
    for (line_index, line) in text.split('\n').enumerate() {
        if line_index > 0 {
            out.push_str("<w:br/>");
        }
        for (piece_index, piece) in line.split('\t').enumerate() {
            if piece_index > 0 {
                out.push_str("<w:tab/>");
            }
            if !piece.is_empty() {
                write!(out, r#"<w:t xml:space="preserve">{}</w:t>"#, escape(piece)).unwrap();
            }
        }
    }
}

/// Escape text for XML, dropping characters XML 1.0 cannot carry.
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    if text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        let cleaned: String = text
            .chars()
            .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
            .collect();
        return Cow::Owned(quick_xml::escape::escape(cleaned.as_str()).into_owned());
    }
    quick_xml::escape::escape(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::tests::png_bytes;

    fn document_xml(doc: &Document) -> String {
        let mut media = MediaStore::default();
        write_document(doc, &mut media).xml
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape("bell\u{7}"), "bell");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_write_text_line_breaks_and_tabs() {
        let mut out = String::new();
        write_text(&mut out, "a\tb\nc");
        assert_eq!(
            out,
            concat!(
                r#"<w:t xml:space="preserve">a</w:t><w:tab/>"#,
                r#"<w:t xml:space="preserve">b</w:t><w:br/>"#,
                r#"<w:t xml:space="preserve">c</w:t>"#
            )
        );
    }

    #[test]
    fn test_paragraph_style_alignment_spacing() {
        let mut doc = Document::new();
        doc.add_paragraph(
            Paragraph::styled(ParagraphStyle::Heading(2))
                .align(Alignment::Center)
                .space_before(24)
                .add_run(Run::text("Title").bold().size(12)),
        );
        let xml = document_xml(&doc);

        assert!(xml.contains(concat!(
            r#"<w:pPr><w:pStyle w:val="Heading2"/><w:spacing w:before="480"/>"#,
            r#"<w:jc w:val="center"/></w:pPr>"#
        )));
        assert!(xml.contains(r#"<w:rPr><w:b/><w:sz w:val="24"/><w:szCs w:val="24"/></w:rPr>"#));
    }

    #[test]
    fn test_table_header_row_bold() {
        let mut doc = Document::new();
        doc.add_table(Table {
            rows: vec![
                vec!["A".to_owned(), "B".to_owned()],
                vec!["1".to_owned(), "2".to_owned()],
            ],
            header_row: true,
        });
        let xml = document_xml(&doc);

        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tc>").count(), 4);
        assert_eq!(xml.matches("<w:b/>").count(), 2);
        assert!(xml.contains("<w:tblHeader/>"));
        assert!(xml.contains(r#"<w:gridCol w:w="4680"/>"#));
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let mut doc = Document::new();
        doc.add_table(Table::default());
        assert!(!document_xml(&doc).contains("<w:tbl>"));
    }

    #[test]
    fn test_cover_section_has_title_page_and_no_header() {
        let mut doc = Document::new();
        doc.set_header(PageHeader {
            logo: None,
            logo_placeholder: "[Logo]".to_owned(),
            title: "Spec".to_owned(),
        });
        doc.set_page_numbers(true);
        doc.add_paragraph(Paragraph::new().add_run(Run::text("cover")));
        doc.add_section_break();
        doc.add_paragraph(Paragraph::new().add_run(Run::text("body")));
        let xml = document_xml(&doc);

        let cover_end = xml.find("<w:titlePg/>").unwrap();
        let first_header_ref = xml.find("w:headerReference").unwrap();
        assert!(first_header_ref > cover_end);
        assert_eq!(xml.matches("w:headerReference").count(), 1);
        assert_eq!(xml.matches("w:footerReference").count(), 1);
    }

    #[test]
    fn test_table_of_contents_field() {
        let mut doc = Document::new();
        doc.add_table_of_contents(1, 3);
        let xml = document_xml(&doc);

        assert!(xml.contains(r#"TOC \o &quot;1-3&quot; \h \z \u"#));
        assert!(xml.contains(r#"w:fldCharType="begin""#));
        assert!(xml.contains(r#"w:fldCharType="end""#));
    }

    #[test]
    fn test_picture_registers_media_and_relationship() {
        let picture = Picture::from_bytes(png_bytes(4, 2), 2.0).unwrap();
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::new().add_run(Run::picture(picture)));

        let mut media = MediaStore::default();
        let part = write_document(&doc, &mut media);

        assert_eq!(media.entries.len(), 1);
        assert_eq!(media.entries[0].file_name, "image1.png");
        assert_eq!(part.rels.len(), 1);
        assert_eq!(part.rels[0].target, "media/image1.png");
        assert!(part.xml.contains(r#"r:embed="rIdMedia1""#));
        assert!(part.xml.contains(r#"<wp:extent cx="1828800" cy="914400"/>"#));
    }

    #[test]
    fn test_header_placeholder_and_title() {
        let header = PageHeader {
            logo: None,
            logo_placeholder: "[Logo]".to_owned(),
            title: "MQTT Diagnostic".to_owned(),
        };
        let mut media = MediaStore::default();
        let part = write_header(&header, &Typography::default(), &mut media);

        assert!(part.xml.contains("[Logo]"));
        assert!(part.xml.contains("MQTT Diagnostic"));
        assert!(part.xml.contains(r#"<w:jc w:val="right"/>"#));
        assert!(part.rels.is_empty());
    }

    #[test]
    fn test_footer_page_field() {
        let mut media = MediaStore::default();
        let part = write_footer(&Typography::default(), &mut media);

        assert!(part.xml.contains(r#"<w:instrText xml:space="preserve">PAGE</w:instrText>"#));
        assert!(part.xml.contains(r#"<w:jc w:val="center"/>"#));
    }
}
