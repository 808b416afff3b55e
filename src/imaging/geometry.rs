//! Pure geometry for crop-and-place compositing.
//!
//! All functions here are pure and testable without any I/O or pixel data.
//! Crop boxes follow the `(left, top, right, bottom)` convention used by the
//! layout tables; coordinates are source-image pixels.

/// A rectangle in source-image pixel coordinates.
///
/// `right` and `bottom` are exclusive, so `width = right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Compute the centered crop that fits a source image to a target aspect
/// ratio without distortion.
///
/// The longer dimension's excess is cropped off symmetrically; the crop's
/// aspect ratio equals the target's within one pixel of rounding. Sources
/// that already match the target ratio take the "too tall" branch, which is
/// then a full-frame crop.
///
/// # Examples
/// ```
/// # use storeshots::imaging::cover_crop;
/// // 1000x2000 into a 1345x750 slot: crop a horizontal band
/// let crop = cover_crop((1000, 2000), (1345, 750));
/// assert_eq!(crop.width(), 1000);
/// assert_eq!(crop.height(), 558);
/// ```
pub fn cover_crop(source: (u32, u32), target: (u32, u32)) -> CropBox {
    let (sw, sh) = source;
    let (tw, th) = target;

    let source_ratio = sw as f64 / sh as f64;
    let target_ratio = tw as f64 / th as f64;

    if source_ratio > target_ratio {
        // Source too wide: crop the sides.
        let new_width = (sh as f64 * target_ratio).round() as u32;
        let x = (sw - new_width.min(sw)) / 2;
        CropBox::new(x, 0, x + new_width.min(sw), sh)
    } else {
        // Source too tall (or equal ratio): crop top and bottom.
        let new_height = (sw as f64 / target_ratio).round() as u32;
        let y = (sh - new_height.min(sh)) / 2;
        CropBox::new(0, y, sw, y + new_height.min(sh))
    }
}

/// Rescale a crop box defined against one canvas size onto another.
///
/// Crop tables are authored against the reference canvas; when the composited
/// canvas has a different size every box must pass through here before use.
pub fn scale_box(b: &CropBox, from: (u32, u32), to: (u32, u32)) -> CropBox {
    let fx = to.0 as f64 / from.0 as f64;
    let fy = to.1 as f64 / from.1 as f64;
    CropBox::new(
        (b.left as f64 * fx).round() as u32,
        (b.top as f64 * fy).round() as u32,
        (b.right as f64 * fx).round() as u32,
        (b.bottom as f64 * fy).round() as u32,
    )
}

/// Bounding-box size of a `width`x`height` rectangle rotated by `degrees`.
pub fn rotated_bounds(size: (u32, u32), degrees: f32) -> (u32, u32) {
    let (w, h) = (size.0 as f64, size.1 as f64);
    let rad = (degrees as f64).to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    // The epsilon keeps right-angle rotations from ceiling up a whole pixel.
    (
        (w * cos + h * sin - 1e-6).ceil() as u32,
        (w * sin + h * cos - 1e-6).ceil() as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // cover_crop tests
    // =========================================================================

    #[test]
    fn cover_crop_tall_source_crops_vertical_band() {
        // ratio 0.5 into ratio ~1.79: horizontal band out of the middle
        let crop = cover_crop((1000, 2000), (1345, 750));
        assert_eq!(crop.left, 0);
        assert_eq!(crop.right, 1000);
        assert!((557..=559).contains(&crop.height()));
        // vertically centered within a pixel
        assert!(crop.top.abs_diff(2000 - crop.bottom) <= 1);
    }

    #[test]
    fn cover_crop_wide_source_crops_sides() {
        let crop = cover_crop((4000, 1000), (1000, 1000));
        assert_eq!(crop.top, 0);
        assert_eq!(crop.bottom, 1000);
        assert_eq!(crop.width(), 1000);
        assert_eq!(crop.left, 1500);
    }

    #[test]
    fn cover_crop_matching_ratio_is_full_frame() {
        // Equal ratios take the "too tall" branch deterministically.
        let crop = cover_crop((2690, 1500), (1345, 750));
        assert_eq!(crop, CropBox::new(0, 0, 2690, 1500));
    }

    #[test]
    fn cover_crop_aspect_matches_target_within_rounding() {
        for &(sw, sh) in &[(1000u32, 2000u32), (3333, 777), (512, 512), (1920, 1080)] {
            let crop = cover_crop((sw, sh), (1345, 750));
            let crop_ratio = crop.width() as f64 / crop.height() as f64;
            let target_ratio = 1345.0 / 750.0;
            // Within one pixel of rounding on the cropped dimension.
            let tolerance = target_ratio / crop.height().min(crop.width()) as f64;
            assert!(
                (crop_ratio - target_ratio).abs() <= tolerance,
                "{}x{} -> crop {:?}",
                sw,
                sh,
                crop
            );
        }
    }

    // =========================================================================
    // scale_box tests
    // =========================================================================

    #[test]
    fn scale_box_half_size() {
        let b = CropBox::new(1000, 20, 2580, 3300);
        let scaled = scale_box(&b, (5880, 3300), (2940, 1650));
        assert_eq!(scaled, CropBox::new(500, 10, 1290, 1650));
    }

    #[test]
    fn scale_box_identity() {
        let b = CropBox::new(2650, 0, 4230, 3300);
        assert_eq!(scale_box(&b, (5880, 3300), (5880, 3300)), b);
    }

    #[test]
    fn scale_box_non_uniform() {
        let b = CropBox::new(10, 10, 20, 20);
        let scaled = scale_box(&b, (100, 100), (200, 50));
        assert_eq!(scaled, CropBox::new(20, 5, 40, 10));
    }

    // =========================================================================
    // rotated_bounds tests
    // =========================================================================

    #[test]
    fn rotated_bounds_zero_is_identity() {
        assert_eq!(rotated_bounds((1345, 750), 0.0), (1345, 750));
    }

    #[test]
    fn rotated_bounds_quarter_turn_swaps() {
        assert_eq!(rotated_bounds((100, 50), 90.0), (50, 100));
    }

    #[test]
    fn rotated_bounds_grows_for_oblique_angles() {
        let (w, h) = rotated_bounds((100, 100), 45.0);
        assert!(w > 100 && h > 100);
        assert!(w <= 142 && h <= 142);
    }
}
