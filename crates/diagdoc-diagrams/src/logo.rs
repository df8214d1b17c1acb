//! SVG logo rasterization for the page header.

use std::path::Path;
use std::sync::Arc;

use resvg::usvg::{self, fontdb};

use crate::DiagramError;

/// Render `svg_path` to a PNG at `png_path` that fits in `max_width`×`max_height`.
///
/// The aspect ratio is preserved and the background stays transparent.
/// Returns the pixel size of the written image.
pub fn rasterize_logo(
    svg_path: &Path,
    png_path: &Path,
    max_width: u32,
    max_height: u32,
) -> Result<(u32, u32), DiagramError> {
    let data = std::fs::read(svg_path).map_err(|source| DiagramError::ReadLogo {
        path: svg_path.to_path_buf(),
        source,
    })?;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let opts = usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(&data, &opts)?;

    let (width, height, scale) = fit(tree.size(), max_width, max_height);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(DiagramError::EmptyLogo { width, height })?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // Pixmap data is premultiplied; PNG expects straight alpha
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or(DiagramError::EmptyLogo { width, height })?;

    if let Some(parent) = png_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DiagramError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    img.save_with_format(png_path, image::ImageFormat::Png)?;

    tracing::info!(
        svg = %svg_path.display(),
        png = %png_path.display(),
        width,
        height,
        "Rasterized logo"
    );
    Ok((width, height))
}

/// Pixel size and scale factor fitting `size` into the box.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn fit(size: usvg::Size, max_width: u32, max_height: u32) -> (u32, u32, f32) {
    let scale = (max_width as f32 / size.width()).min(max_height as f32 / size.height());
    let width = (size.width() * scale).round().min(max_width as f32) as u32;
    let height = (size.height() * scale).round().min(max_height as f32) as u32;
    (width, height, scale)
}
