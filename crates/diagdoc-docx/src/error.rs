//! Error types for document writing.

/// Error while loading pictures or writing a document package.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DocxError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP packaging error.
    #[error("package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Image format that cannot be embedded.
    #[error("unsupported image format: {0}")]
    UnsupportedImage(String),

    /// Picture width that is not a positive, finite size a page can hold.
    #[error("invalid picture width: {0} in")]
    InvalidWidth(f64),

    /// Image with a zero dimension.
    #[error("image has no area ({width}x{height})")]
    EmptyImage {
        /// Pixel width.
        width: u32,
        /// Pixel height.
        height: u32,
    },
}
