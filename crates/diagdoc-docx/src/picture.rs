//! Inline pictures.
//!
//! A [`Picture`] owns the encoded image bytes and its display size in EMU
//! (English Metric Units, 914 400 per inch). The display height is derived
//! from the requested width and the pixel aspect ratio.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use crate::DocxError;

/// EMU per inch.
pub const EMU_PER_INCH: u64 = 914_400;

/// Widest picture accepted, in inches (the largest page Word supports).
pub const MAX_WIDTH_INCHES: f64 = 22.0;

/// Embeddable image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
}

impl ImageKind {
    /// File extension used for the media part.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }

    /// MIME type registered in `[Content_Types].xml`.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }

    fn from_format(format: ImageFormat) -> Result<Self, DocxError> {
        match format {
            ImageFormat::Png => Ok(Self::Png),
            ImageFormat::Jpeg => Ok(Self::Jpeg),
            ImageFormat::Gif => Ok(Self::Gif),
            other => Err(DocxError::UnsupportedImage(format!("{other:?}"))),
        }
    }
}

/// An encoded image with its display size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    data: Vec<u8>,
    kind: ImageKind,
    width_emu: u64,
    height_emu: u64,
}

impl Picture {
    /// Load an image file and size it to `width_inches`, keeping the aspect ratio.
    pub fn from_file(path: &Path, width_inches: f64) -> Result<Self, DocxError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, width_inches)
    }

    /// Build a picture from encoded bytes, sized to `width_inches`.
    pub fn from_bytes(data: Vec<u8>, width_inches: f64) -> Result<Self, DocxError> {
        if !width_inches.is_finite() || width_inches <= 0.0 || width_inches > MAX_WIDTH_INCHES {
            return Err(DocxError::InvalidWidth(width_inches));
        }
        let reader = ImageReader::new(Cursor::new(&data)).with_guessed_format()?;
        let format = reader
            .format()
            .ok_or_else(|| DocxError::UnsupportedImage("unknown".to_owned()))?;
        let kind = ImageKind::from_format(format)?;
        let (width, height) = reader.into_dimensions()?;
        if width == 0 || height == 0 {
            return Err(DocxError::EmptyImage { width, height });
        }

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss
        )]
        let width_emu = (width_inches * EMU_PER_INCH as f64).round() as u64;
        let height_emu = width_emu
            .checked_mul(u64::from(height))
            .ok_or(DocxError::InvalidWidth(width_inches))?
            / u64::from(width);

        Ok(Self {
            data,
            kind,
            width_emu,
            height_emu,
        })
    }

    /// Encoded image bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Image encoding.
    #[must_use]
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Display width in EMU.
    #[must_use]
    pub fn width_emu(&self) -> u64 {
        self.width_emu
    }

    /// Display height in EMU.
    #[must_use]
    pub fn height_emu(&self) -> u64 {
        self.height_emu
    }
}
