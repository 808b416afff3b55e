//! # Storeshots
//!
//! App-store screenshot generator for white-labeled mobile apps. Each brand
//! ships the same app with its own colors, name, and venue; this crate turns
//! a directory of per-brand `config.json` files plus a handful of shared SVG
//! mockup templates into ready-to-upload store screenshots.
//!
//! # Pipeline
//!
//! One brand flows through five in-memory stages:
//!
//! ```text
//! 1. Scan       brands/        →  Vec<Brand>        (config.json per brand)
//! 2. Customize  mockup SVGs    →  branded SVGs      (colors, name, year)
//! 3. Rasterize  branded SVGs   →  RGBA buffers
//! 4. Composite  bg.png         →  scene canvas      (wash + pastes + venue photo)
//! 5. Crop       scene canvas   →  out/<urlScheme>/  (per-device PNGs + text)
//! ```
//!
//! Nothing intermediate touches the disk: the composite and every crop live
//! in memory until the final PNG writes. Brands are processed strictly one
//! at a time, and a failing brand never aborts the batch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Brand directory enumeration with exclusions |
//! | [`config`] | `config.json` deserialization and validation |
//! | [`template`] | Streaming SVG rewrite: theme fills, brand name, dialect, year |
//! | [`render`] | SVG → raster adapter around resvg |
//! | [`fetch`] | Venue photo download with a single fallback URL |
//! | [`layout`] | Declarative geometry: scenes, slots, crop tables, text specs |
//! | [`imaging`] | Pure raster ops: wash, paste, rotate, cover-fit, text burn-in |
//! | [`pipeline`] | Per-brand orchestration with fault isolation |
//! | [`output`] | Console report formatting |
//!
//! # Design Decisions
//!
//! ## Geometry as Data
//!
//! All placement — paste positions, rotation angles, the venue slot, the
//! per-device crop tables, the burn-in text specs — lives in one serializable
//! [`layout::Layout`]. The built-in default mirrors the production values;
//! a `layout.json` next to the assets replaces it without recompiling, and
//! `gen-layout` prints the default as a starting point.
//!
//! ## Streaming XML Instead of a DOM
//!
//! Template customization is a single quick-xml event pass. The templates
//! are design exports of a few hundred kilobytes; a DOM would work too, but
//! the streaming rewrite keeps untouched markup byte-identical, which makes
//! "unmatched documents pass through unchanged" a testable guarantee.
//!
//! ## Crop Tables Are Authored Once
//!
//! Crop boxes are written against one reference canvas (5880×3300). If the
//! actual background differs, every box is rescaled proportionally before
//! use, so swapping in a half-resolution background for a quick preview run
//! just works.
//!
//! ## The Venue Photo Is Best-Effort
//!
//! Venue sites go down. A photo that cannot be fetched (even via the demo
//! fallback) costs that brand its decorative overlay and a warning, not its
//! screenshots.

pub mod config;
pub mod fetch;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod template;
