//! Error types for diagram and logo generation.

use std::path::PathBuf;

/// Error while writing diagram sources or rasterizing the logo.
///
/// Renderer failures are not errors: they are collected in a
/// [`RenderReport`](crate::RenderReport) so the remaining diagrams still render.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// Output directory could not be created.
    #[error("Failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Diagram source or image could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Logo SVG could not be read.
    #[error("Failed to read logo {}: {source}", path.display())]
    ReadLogo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Logo SVG could not be parsed.
    #[error("Invalid SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    /// Rasterized logo has no area.
    #[error("Cannot rasterize logo to {width}x{height}")]
    EmptyLogo {
        /// Target pixel width.
        width: u32,
        /// Target pixel height.
        height: u32,
    },

    /// PNG encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
