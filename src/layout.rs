//! Declarative composition geometry.
//!
//! Everything the compositor needs to know about *where* things go lives in
//! one serializable [`Layout`]: the reference canvas the crop tables are
//! authored against, the scenes (phone and tablet), each scene's mockup paste
//! slots and venue photo slot, the per-device crop tables, and the text
//! burn-in specs. The built-in [`Layout::default`] mirrors the production
//! values; dropping a `layout.json` next to the assets replaces it wholesale
//! (`gen-layout` emits the defaults as a starting point).
//!
//! Crop boxes are authored against [`Layout::reference_size`]; the pipeline
//! rescales them when the actual background differs.

use crate::imaging::CropBox;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of an asset-directory layout override.
pub const LAYOUT_FILE: &str = "layout.json";

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The full composition geometry for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Canvas size all crop boxes and positions are authored against.
    pub reference_size: (u32, u32),
    /// Opacity of the brand-color wash applied over the background.
    pub wash_opacity: f32,
    pub scenes: Vec<Scene>,
    /// Title/subtitle pairs burned into the first outputs of every device,
    /// one pair per output, in order.
    pub overlays: Vec<TextOverlay>,
    pub text_style: TextStyle,
}

/// One composited canvas: a set of mockup pastes, an optional venue photo
/// slot, and the device crop tables cut from the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub mockups: Vec<MockupSlot>,
    pub venue: Option<VenueSlot>,
    pub devices: Vec<DeviceCrops>,
}

/// A customized SVG template pasted at a position, optionally rotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockupSlot {
    /// Template file name, relative to the assets directory.
    pub template: String,
    pub position: (i64, i64),
    /// Counter-clockwise degrees.
    pub angle: f32,
}

/// The venue photo slot: the photo is cover-cropped to `size`, rotated, and
/// pasted at `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSlot {
    pub size: (u32, u32),
    pub position: (i64, i64),
    pub angle: f32,
}

/// Crop table for one device model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceCrops {
    /// Device tag; output files are named `<tag>_<n>.png`.
    pub tag: String,
    /// Store-required output resolution; each cropped band is resized to it.
    pub resolution: (u32, u32),
    pub crops: Vec<CropBox>,
}

/// A title/subtitle pair burned into one output image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextOverlay {
    pub title: String,
    pub subtitle: String,
}

/// How one text line is drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineStyle {
    pub position: (i32, i32),
    pub size: f32,
    /// Opacity of the white copy; the title is deliberately translucent.
    pub opacity: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub title: LineStyle,
    pub subtitle: LineStyle,
    pub shadow_offset: (i32, i32),
    pub shadow_opacity: u8,
}

/// Store resolution for a device tag, including models without an active
/// crop table. Only tags a scene lists in `devices` produce output.
pub fn device_resolution(tag: &str) -> Option<(u32, u32)> {
    match tag {
        "69" => Some((1290, 2796)),
        "65" => Some((1242, 2688)),
        "61" => Some((1170, 2532)),
        "55" => Some((1242, 2208)),
        "SE" => Some((640, 1136)),
        "tablet" => Some((2048, 2732)),
        _ => None,
    }
}

impl Layout {
    /// Load `layout.json` from the assets directory, or fall back to the
    /// built-in production layout when the file is absent.
    pub fn load_or_default(assets_dir: &Path) -> Result<Self, LayoutError> {
        let path = assets_dir.join(LAYOUT_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            reference_size: (5880, 3300),
            wash_opacity: 0.25,
            scenes: vec![phone_scene(), tablet_scene()],
            overlays: vec![
                TextOverlay {
                    title: "Rooster".into(),
                    subtitle: "Een plekje vrij?\nBekijk het in het overzicht".into(),
                },
                TextOverlay {
                    title: "Reserveren".into(),
                    subtitle: "Aanmelden voor\nJouw favoriete lessen".into(),
                },
            ],
            text_style: TextStyle {
                title: LineStyle {
                    position: (100, 125),
                    size: 50.0,
                    opacity: 128,
                },
                subtitle: LineStyle {
                    position: (100, 180),
                    size: 80.0,
                    opacity: 255,
                },
                shadow_offset: (0, 3),
                shadow_opacity: 128,
            },
        }
    }
}

fn phone_scene() -> Scene {
    Scene {
        name: "phone".into(),
        mockups: vec![
            MockupSlot {
                template: "mockup1.svg".into(),
                position: (10, 300),
                angle: -15.0,
            },
            MockupSlot {
                template: "mockup2.svg".into(),
                position: (3300, 500),
                angle: 15.0,
            },
        ],
        venue: Some(VenueSlot {
            size: (1345, 750),
            position: (3555, 1260),
            angle: 15.0,
        }),
        devices: vec![
            DeviceCrops {
                tag: "69".into(),
                resolution: device_resolution("69").unwrap_or((1290, 2796)),
                crops: vec![
                    CropBox::new(1290, 20, 2580, 2796),
                    CropBox::new(2650, 0, 3940, 2796),
                    CropBox::new(4010, 0, 5300, 2796),
                ],
            },
            DeviceCrops {
                tag: "65".into(),
                resolution: device_resolution("65").unwrap_or((1242, 2688)),
                crops: vec![
                    CropBox::new(1338, 20, 2580, 2688),
                    CropBox::new(2650, 0, 3892, 2688),
                    CropBox::new(3962, 0, 5204, 2688),
                ],
            },
        ],
    }
}

fn tablet_scene() -> Scene {
    Scene {
        name: "tablet".into(),
        mockups: vec![
            MockupSlot {
                template: "mockup_ipad1.svg".into(),
                position: (1100, 700),
                angle: 0.0,
            },
            MockupSlot {
                template: "mockup_ipad2.svg".into(),
                position: (3150, 700),
                angle: 0.0,
            },
        ],
        venue: Some(VenueSlot {
            size: (1720, 600),
            position: (3225, 1175),
            angle: 0.0,
        }),
        devices: vec![DeviceCrops {
            tag: "tablet".into(),
            resolution: device_resolution("tablet").unwrap_or((2048, 2732)),
            crops: vec![
                CropBox::new(1000, 100, 3048, 2732),
                CropBox::new(3050, 100, 5098, 2732),
            ],
        }],
    }
}
