//! PNG rasterization of the rendered SVG.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Failed to parse SVG: {0}")]
    Parse(String),

    #[error("Invalid output size at scale {0}")]
    InvalidSize(f32),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Options for rasterizing a heat map.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Output pixels per SVG unit
    pub scale: f32,
    /// Load system fonts so axis labels and legend text are drawn
    pub load_system_fonts: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            load_system_fonts: true,
        }
    }
}

/// Rasterize an SVG document to PNG bytes.
///
/// The canvas is filled white first so the image has no transparent
/// regions. Without fonts, text elements are skipped.
pub fn render_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>, RasterError> {
    if !(options.scale.is_finite() && options.scale > 0.0) {
        return Err(RasterError::InvalidSize(options.scale));
    }

    let mut opt = usvg::Options::default();
    if options.load_system_fonts {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        opt.fontdb = Arc::new(fontdb);
    }

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| RasterError::Parse(e.to_string()))?;

    let size = tree
        .size()
        .to_int_size()
        .scale_by(options.scale)
        .ok_or(RasterError::InvalidSize(options.scale))?;

    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or(RasterError::InvalidSize(options.scale))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(options.scale, options.scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))?;

    debug!(
        width = size.width(),
        height = size.height(),
        bytes = png.len(),
        "Rasterized heat map"
    );

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#a50026"/></svg>"##;

    fn options(scale: f32) -> RasterOptions {
        RasterOptions {
            scale,
            load_system_fonts: false,
        }
    }

    #[test]
    fn test_png_signature() {
        let png = render_png(SQUARE, &options(1.0)).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_scale_changes_dimensions() {
        let png = render_png(SQUARE, &options(2.0)).unwrap();
        // IHDR width/height follow the 8-byte signature and chunk header
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        assert_eq!((width, height), (20, 20));
    }

    #[test]
    fn test_invalid_scale() {
        assert!(matches!(
            render_png(SQUARE, &options(0.0)),
            Err(RasterError::InvalidSize(_))
        ));
        assert!(matches!(
            render_png(SQUARE, &options(f32::NAN)),
            Err(RasterError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_invalid_svg() {
        assert!(matches!(
            render_png("not svg", &options(1.0)),
            Err(RasterError::Parse(_))
        ));
    }
}
