//! SVG rasterization adapter.
//!
//! Wraps resvg/usvg behind a small struct so the pipeline deals only in
//! [`RgbaImage`] buffers. The font database is built once per run (system
//! fonts plus the brand font, so templated `<text>` renders correctly) and
//! shared across all rasterizations.

use image::RgbaImage;
use resvg::{tiny_skia, usvg};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    Svg(#[from] usvg::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot allocate {0}x{1} canvas")]
    ZeroCanvas(u32, u32),
}

/// Converts self-contained SVG documents to RGBA rasters.
#[derive(Debug)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Rasterizer {
    /// Build a rasterizer. `font_path`, when given, is loaded on top of the
    /// system fonts so templates can reference the brand typeface by family.
    pub fn new(font_path: Option<&Path>) -> Result<Self, RenderError> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(path) = font_path {
            db.load_font_file(path)?;
        }
        Ok(Self {
            fontdb: Arc::new(db),
        })
    }

    /// Rasterize a document at its intrinsic size, or scaled uniformly to
    /// `target` when given.
    ///
    /// The document must be self-contained: referenced raster assets are
    /// embedded as data URIs or resolvable from the current directory.
    pub fn rasterize(
        &self,
        svg: &str,
        target: Option<(u32, u32)>,
    ) -> Result<RgbaImage, RenderError> {
        let mut opt = usvg::Options::default();
        opt.fontdb = self.fontdb.clone();
        let tree = usvg::Tree::from_str(svg, &opt)?;

        let intrinsic = tree.size().to_int_size();
        let (width, height) = target.unwrap_or((intrinsic.width(), intrinsic.height()));
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RenderError::ZeroCanvas(width, height))?;

        let transform = tiny_skia::Transform::from_scale(
            width as f32 / tree.size().width(),
            height as f32 / tree.size().height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // tiny-skia stores premultiplied RGBA; the image crate expects straight.
        let mut out = RgbaImage::new(width, height);
        for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
        <rect width="20" height="10" fill="#ff0000"/>
    </svg>"##;

    #[test]
    fn rasterizes_at_intrinsic_size() {
        let r = Rasterizer::new(None).unwrap();
        let img = r.rasterize(RED_SQUARE, None).unwrap();
        assert_eq!(img.dimensions(), (20, 10));
        assert_eq!(img.get_pixel(10, 5).0, [255, 0, 0, 255]);
    }

    #[test]
    fn rasterizes_at_requested_size() {
        let r = Rasterizer::new(None).unwrap();
        let img = r.rasterize(RED_SQUARE, Some((40, 20))).unwrap();
        assert_eq!(img.dimensions(), (40, 20));
        assert_eq!(img.get_pixel(20, 10).0, [255, 0, 0, 255]);
    }

    #[test]
    fn unreferenced_regions_are_transparent() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
            <rect x="0" y="0" width="5" height="10" fill="#00ff00"/>
        </svg>"##;
        let r = Rasterizer::new(None).unwrap();
        let img = r.rasterize(svg, None).unwrap();
        assert_eq!(img.get_pixel(2, 5).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(8, 5).0[3], 0);
    }

    #[test]
    fn malformed_document_is_svg_error() {
        let r = Rasterizer::new(None).unwrap();
        let err = r.rasterize("<svg", None).unwrap_err();
        assert!(matches!(err, RenderError::Svg(_)));
    }

    #[test]
    fn missing_font_file_is_io_error() {
        let err = Rasterizer::new(Some(Path::new("/nonexistent.ttf"))).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
