//! Line-oriented markdown to document conversion.
//!
//! This is not a CommonMark parser. Markdown is processed line by line with a
//! handful of regular expressions, which is enough for specification-style
//! documents: headers, pipe tables, fenced code, images, lists, quotes and
//! bold/italic/code spans.
//!
//! # Architecture
//!
//! - [`segment`]: split text into header-delimited [`Section`]s
//! - [`ContentEmitter`]: turn sections into blocks of a [`diagdoc_docx::Document`]
//! - [`split_spans`]: inline emphasis and code spans
//! - [`parse_table`]: pipe tables
//!
//! # Example
//!
//! ```
//! use diagdoc_docx::Document;
//! use diagdoc_renderer::{ContentEmitter, segment};
//!
//! let sections = segment("# Topics\n\n- `cmd/req`\n- `cmd/res`");
//! let mut doc = Document::new();
//! ContentEmitter::new(".").emit(&mut doc, &sections);
//! assert_eq!(doc.paragraphs().count(), 3);
//! ```

mod emitter;
mod inline;
mod section;
mod table;

pub use emitter::{ContentEmitter, EmitOptions};
pub use inline::{Span, split_spans, strip_inline_markup};
pub use section::{Section, segment};
pub use table::{is_separator_row, parse_row, parse_table};
