//! Specification document assembly.
//!
//! [`DocumentBuilder`] turns a [`DocumentProfile`](diagdoc_config::DocumentProfile)
//! into a `.docx` file:
//!
//! 1. Cover page (logo or placeholder, title, subtitle, metadata block)
//! 2. Section break; content pages get a logo/title header and a page number footer
//! 3. Table of contents field, refreshed by the word processor
//! 4. Primary markdown file
//! 5. Appendices in configured order, each with a caption and optional description
//!
//! A missing primary file aborts the build. Missing appendices and logos are
//! logged and skipped or replaced by placeholders.

mod builder;

use std::path::PathBuf;

pub use builder::{BuildReport, DocumentBuilder};

/// Error returned by [`DocumentBuilder`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Primary markdown file does not exist.
    #[error("Primary file not found: {}", .0.display())]
    MissingPrimary(PathBuf),

    /// Primary markdown file exists but cannot be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadPrimary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document serialization failed.
    #[error("Failed to write document: {0}")]
    Docx(#[from] diagdoc_docx::DocxError),
}
