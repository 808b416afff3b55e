//! Raster compositing primitives.
//!
//! Everything operates on in-memory [`RgbaImage`] buffers; nothing here
//! touches the filesystem. Paste order is the caller's order — later pastes
//! draw on top of earlier ones.

use super::geometry::{cover_crop, rotated_bounds, CropBox};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("invalid hex color: {0}")]
    BadColor(String),
    #[error("crop box {0:?} exceeds image bounds {1}x{2}")]
    CropOutOfBounds(CropBox, u32, u32),
}

/// Parse a `#RRGGBB` hex string into an opaque RGBA pixel.
pub fn hex_color(s: &str) -> Result<Rgba<u8>, ComposeError> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ComposeError::BadColor(s.to_string()));
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    Ok(Rgba([byte(0), byte(2), byte(4), 255]))
}

/// Blend a flat color layer over the whole canvas at the given opacity.
///
/// Equivalent to alpha-compositing a uniform `color` layer with alpha
/// `opacity` over the base; the base's own alpha channel is left alone.
pub fn color_wash(base: &mut RgbaImage, color: Rgba<u8>, opacity: f32) {
    let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u32;
    for p in base.pixels_mut() {
        for c in 0..3 {
            p.0[c] = ((color.0[c] as u32 * a + p.0[c] as u32 * (255 - a)) / 255) as u8;
        }
    }
}

/// Paste `overlay` onto `base` at the given top-left coordinate, using the
/// overlay's alpha channel as the mask.
pub fn paste(base: &mut RgbaImage, overlay: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(base, overlay, x, y);
}

/// Crop a named rectangle out of an image.
pub fn crop(src: &RgbaImage, b: &CropBox) -> Result<RgbaImage, ComposeError> {
    if b.right > src.width() || b.bottom > src.height() || b.width() == 0 || b.height() == 0 {
        return Err(ComposeError::CropOutOfBounds(*b, src.width(), src.height()));
    }
    Ok(imageops::crop_imm(src, b.left, b.top, b.width(), b.height()).to_image())
}

/// Fit a source image into a fixed-size slot: center-crop the excess of the
/// longer dimension, then resize to exactly `target` with Lanczos3.
///
/// Never letterboxes and never distorts; see [`cover_crop`] for the geometry.
pub fn fit_cover(src: &RgbaImage, target: (u32, u32)) -> Result<RgbaImage, ComposeError> {
    let band = crop(src, &cover_crop((src.width(), src.height()), target))?;
    Ok(imageops::resize(&band, target.0, target.1, FilterType::Lanczos3))
}

/// Rotate an image by an arbitrary angle, expanding the canvas to the
/// rotated rectangle's bounding box.
///
/// Positive angles rotate counter-clockwise. Pixels outside the rotated
/// rectangle are fully transparent, so a subsequent [`paste`] never obscures
/// the background with the expanded corners. Sampling is bilinear.
pub fn rotate_expand(src: &RgbaImage, degrees: f32) -> RgbaImage {
    let (out_w, out_h) = rotated_bounds((src.width(), src.height()), degrees);
    let mut out = RgbaImage::from_pixel(out_w, out_h, Rgba([0, 0, 0, 0]));

    // Inverse mapping: for each output pixel, sample the source. Screen
    // coordinates have y pointing down, so negate the angle to keep positive
    // values counter-clockwise.
    let rad = -(degrees as f64).to_radians();
    let (sin, cos) = (rad.sin(), rad.cos());
    let (cx, cy) = (src.width() as f64 / 2.0, src.height() as f64 / 2.0);
    let (ocx, ocy) = (out_w as f64 / 2.0, out_h as f64 / 2.0);

    for y in 0..out_h {
        for x in 0..out_w {
            let dx = x as f64 + 0.5 - ocx;
            let dy = y as f64 + 0.5 - ocy;
            let sx = dx * cos - dy * sin + cx - 0.5;
            let sy = dx * sin + dy * cos + cy - 0.5;
            if let Some(p) = sample_bilinear(src, sx, sy) {
                out.put_pixel(x, y, p);
            }
        }
    }
    out
}

/// Bilinear sample at fractional coordinates; `None` outside the source.
fn sample_bilinear(src: &RgbaImage, x: f64, y: f64) -> Option<Rgba<u8>> {
    if x < -0.5 || y < -0.5 || x > src.width() as f64 - 0.5 || y > src.height() as f64 - 0.5 {
        return None;
    }
    let x0 = x.floor().max(0.0) as u32;
    let y0 = y.floor().max(0.0) as u32;
    let x1 = (x0 + 1).min(src.width() - 1);
    let y1 = (y0 + 1).min(src.height() - 1);
    let fx = (x - x0 as f64).clamp(0.0, 1.0);
    let fy = (y - y0 as f64).clamp(0.0, 1.0);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let p00 = src.get_pixel(x0, y0).0[c] as f64;
        let p10 = src.get_pixel(x1, y0).0[c] as f64;
        let p01 = src.get_pixel(x0, y1).0[c] as f64;
        let p11 = src.get_pixel(x1, y1).0[c] as f64;
        let top = p00 + (p10 - p00) * fx;
        let bottom = p01 + (p11 - p01) * fx;
        out[c] = (top + (bottom - top) * fy).round() as u8;
    }
    Some(Rgba(out))
}
