//! OPC packaging: collects every part of the document into a ZIP archive.
//!
//! Part layout:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! docProps/core.xml
//! word/document.xml
//! word/styles.xml
//! word/numbering.xml
//! word/settings.xml
//! word/header1.xml        (only with a running header)
//! word/footer1.xml        (only with page numbers)
//! word/media/imageN.ext
//! word/_rels/*.rels
//! ```

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::DocxError;
use crate::model::Document;
use crate::styles::{numbering_xml, styles_xml};
use crate::xml::{
    FOOTER_REL_ID, HEADER_REL_ID, MediaStore, Relationship, escape, write_document, write_footer,
    write_header,
};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_NUMBERING: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";
const CT_SETTINGS: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
const CT_HEADER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";
const CT_FOOTER: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
const REL_SETTINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
const REL_HEADER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
const REL_FOOTER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";

/// Serialize a document into `.docx` bytes.
pub fn write_package(doc: &Document) -> Result<Vec<u8>, DocxError> {
    let mut media = MediaStore::default();
    let typography = doc.typography();

    let body = write_document(doc, &mut media);
    let header = doc
        .header()
        .map(|header| write_header(header, typography, &mut media));
    let footer = doc
        .page_numbers()
        .then(|| write_footer(typography, &mut media));

    let mut document_rels = vec![
        relationship("rIdStyles", REL_STYLES, "styles.xml"),
        relationship("rIdNumbering", REL_NUMBERING, "numbering.xml"),
        relationship("rIdSettings", REL_SETTINGS, "settings.xml"),
    ];
    if header.is_some() {
        document_rels.push(relationship(HEADER_REL_ID, REL_HEADER, "header1.xml"));
    }
    if footer.is_some() {
        document_rels.push(relationship(FOOTER_REL_ID, REL_FOOTER, "footer1.xml"));
    }
    document_rels.extend(body.rels);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut add = |name: &str, data: &[u8]| -> Result<(), DocxError> {
        zip.start_file(name, options)?;
        zip.write_all(data)?;
        Ok(())
    };

    add(
        "[Content_Types].xml",
        content_types_xml(&media, header.is_some(), footer.is_some()).as_bytes(),
    )?;
    add(
        "_rels/.rels",
        relationships_xml(&[
            relationship("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
            relationship("rId2", REL_CORE, "docProps/core.xml"),
        ])
        .as_bytes(),
    )?;
    add("docProps/core.xml", core_xml(doc.title()).as_bytes())?;
    add("word/document.xml", body.xml.as_bytes())?;
    add(
        "word/_rels/document.xml.rels",
        relationships_xml(&document_rels).as_bytes(),
    )?;
    add("word/styles.xml", styles_xml(typography).as_bytes())?;
    add("word/numbering.xml", numbering_xml().as_bytes())?;
    add("word/settings.xml", settings_xml().as_bytes())?;

    if let Some(header) = header {
        add("word/header1.xml", header.xml.as_bytes())?;
        if !header.rels.is_empty() {
            add(
                "word/_rels/header1.xml.rels",
                relationships_xml(&header.rels).as_bytes(),
            )?;
        }
    }
    if let Some(footer) = footer {
        add("word/footer1.xml", footer.xml.as_bytes())?;
    }

    for entry in &media.entries {
        add(&format!("word/media/{}", entry.file_name), &entry.data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn relationship(id: &str, rel_type: &'static str, target: &str) -> Relationship {
    Relationship {
        id: id.to_owned(),
        rel_type,
        target: target.to_owned(),
    }
}

fn content_types_xml(media: &MediaStore, has_header: bool, has_footer: bool) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    write!(
        out,
        r#"<Default Extension="rels" ContentType="{CT_RELS}"/><Default Extension="xml" ContentType="application/xml"/>"#
    )
    .unwrap();

    let kinds: BTreeSet<_> = media
        .entries
        .iter()
        .map(|entry| (entry.kind.extension(), entry.kind.content_type()))
        .collect();
    for (extension, content_type) in kinds {
        write!(
            out,
            r#"<Default Extension="{extension}" ContentType="{content_type}"/>"#
        )
        .unwrap();
    }

    let mut overrides = vec![
        ("/word/document.xml", CT_DOCUMENT),
        ("/word/styles.xml", CT_STYLES),
        ("/word/numbering.xml", CT_NUMBERING),
        ("/word/settings.xml", CT_SETTINGS),
        ("/docProps/core.xml", CT_CORE),
    ];
    if has_header {
        overrides.push(("/word/header1.xml", CT_HEADER));
    }
    if has_footer {
        overrides.push(("/word/footer1.xml", CT_FOOTER));
    }
    for (part, content_type) in overrides {
        write!(
            out,
            r#"<Override PartName="{part}" ContentType="{content_type}"/>"#
        )
        .unwrap();
    }
    out.push_str("</Types>");
    out
}

fn relationships_xml(rels: &[Relationship]) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for rel in rels {
        write!(
            out,
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            rel.id,
            rel.rel_type,
            escape(&rel.target)
        )
        .unwrap();
    }
    out.push_str("</Relationships>");
    out
}

fn core_xml(title: Option<&str>) -> String {
    let mut out = String::from(XML_DECL);
    out.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#
    ));
    if let Some(title) = title {
        write!(out, "<dc:title>{}</dc:title>", escape(title)).unwrap();
    }
    out.push_str("<dc:creator>diagdoc</dc:creator></cp:coreProperties>");
    out
}

/// Ask the word processor to refresh fields (the table of contents) on open.
fn settings_xml() -> String {
    format!(
        r#"{XML_DECL}<w:settings xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:updateFields w:val="true"/></w:settings>"#
    )
}
