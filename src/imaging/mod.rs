//! In-memory raster operations — pure Rust, nothing shells out.
//!
//! The module is split into:
//! - **Geometry**: pure functions for crop/placement math (unit testable)
//! - **Compose**: color wash, alpha paste, rotation, cover-fit
//! - **Text**: TTF burn-in with faux drop shadow

pub mod compose;
pub mod geometry;
pub mod text;

pub use compose::{color_wash, crop, fit_cover, hex_color, paste, rotate_expand, ComposeError};
pub use geometry::{cover_crop, rotated_bounds, scale_box, CropBox};
pub use text::{draw_shadowed, draw_text, load_font, TextError};
