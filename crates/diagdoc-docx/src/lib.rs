//! Minimal word-processor document model with an OOXML (`.docx`) writer.
//!
//! The crate covers exactly what the diagdoc emitters need: styled
//! paragraphs made of runs, grid tables, inline pictures, page and section
//! breaks, a table-of-contents field, a running header and a page-numbered
//! footer.
//!
//! # Architecture
//!
//! - [`model`]: In-memory document ([`Document`], [`Block`], [`Paragraph`], [`Run`], [`Table`])
//! - [`picture`]: Image loading and sizing ([`Picture`])
//! - [`package`]: ZIP packaging of all document parts
//! - `xml`, `styles`: WordprocessingML serialization of the body, header,
//!   footer, style sheet and numbering definitions
//!
//! # Example
//!
//! ```
//! use diagdoc_docx::{Document, Paragraph, ParagraphStyle, Run};
//!
//! let mut doc = Document::new();
//! doc.add_paragraph(Paragraph::styled(ParagraphStyle::Heading(1)).add_run(Run::text("Overview")));
//! doc.add_paragraph(Paragraph::new().add_run(Run::text("Hello ")).add_run(Run::text("world").bold()));
//!
//! let bytes = doc.to_bytes().unwrap();
//! assert!(bytes.starts_with(b"PK"));
//! ```

mod error;
pub mod model;
pub mod package;
pub mod picture;
mod styles;
mod xml;

pub use error::DocxError;
pub use model::{
    Alignment, Block, Document, PageHeader, Paragraph, ParagraphStyle, Run, RunContent, RunProps,
    Table, Typography,
};
pub use picture::{EMU_PER_INCH, ImageKind, Picture};
