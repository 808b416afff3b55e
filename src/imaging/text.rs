//! Text burn-in for cropped screenshots.
//!
//! Glyph rasterization goes through `rusttype`; blending is a plain
//! source-over with the glyph coverage scaled by the requested opacity.
//! Store screenshots are opaque, so the destination alpha stays at 255.

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("IO error reading font: {0}")]
    Io(#[from] std::io::Error),
    #[error("unreadable font file: {0}")]
    BadFont(String),
}

/// Load a TTF/OTF font from disk.
pub fn load_font(path: &Path) -> Result<Font<'static>, TextError> {
    let data = std::fs::read(path)?;
    Font::try_from_vec(data).ok_or_else(|| TextError::BadFont(path.display().to_string()))
}

/// Draw multi-line text at `(x, y)` (top-left of the first line).
///
/// `opacity` scales the glyph coverage: 255 is solid, 128 is the translucent
/// shadow copy. Lines are separated by `\n` and advance by the font's
/// natural line height at the given size.
pub fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    size: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    opacity: u8,
    text: &str,
) {
    let scale = Scale::uniform(size);
    let vm = font.v_metrics(scale);
    let line_height = (vm.ascent - vm.descent + vm.line_gap).ceil() as i32;

    for (i, line) in text.split('\n').enumerate() {
        let baseline = y as f32 + vm.ascent + (i as i32 * line_height) as f32;
        for glyph in font.layout(line, scale, point(x as f32, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
                    return;
                }
                let a = coverage * opacity as f32 / 255.0;
                if a <= 0.0 {
                    return;
                }
                let dst = img.get_pixel_mut(px as u32, py as u32);
                let inv = 1.0 - a;
                for c in 0..3 {
                    dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv).round() as u8;
                }
                dst.0[3] = 255;
            });
        }
    }
}

/// Draw a string twice to fake a drop shadow: a translucent black copy at a
/// small offset, then a white copy at `opacity` on top.
pub fn draw_shadowed(
    img: &mut RgbaImage,
    font: &Font<'_>,
    size: f32,
    x: i32,
    y: i32,
    shadow_offset: (i32, i32),
    shadow_opacity: u8,
    opacity: u8,
    text: &str,
) {
    draw_text(
        img,
        font,
        size,
        x + shadow_offset.0,
        y + shadow_offset.1,
        Rgba([0, 0, 0, 255]),
        shadow_opacity,
        text,
    );
    draw_text(
        img,
        font,
        size,
        x,
        y,
        Rgba([255, 255, 255, 255]),
        opacity,
        text,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_font_missing_file_is_io_error() {
        let err = load_font(Path::new("/nonexistent/shapiro.ttf")).unwrap_err();
        assert!(matches!(err, TextError::Io(_)));
    }

    #[test]
    fn load_font_garbage_is_bad_font() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("not-a-font.ttf");
        std::fs::write(&path, b"definitely not sfnt data").unwrap();
        let err = load_font(&path).unwrap_err();
        assert!(matches!(err, TextError::BadFont(_)));
    }
}
