//! Per-brand screenshot generation.
//!
//! [`Runner`] owns everything that is shared across brands: the layout, the
//! rasterizer (and its font database), the burn-in font, and the venue photo
//! source. [`Runner::run_all`] processes brands strictly one at a time; each
//! brand runs inside its own failure boundary so a broken config or asset
//! never takes the batch down.
//!
//! Per brand, per scene:
//!
//! 1. start from the shared background raster;
//! 2. wash it with the brand color;
//! 3. customize + rasterize each mockup template and paste it (rotated);
//! 4. cover-fit the venue photo into its slot, rotate, paste — fetch
//!    failures downgrade to a warning and the slot stays empty;
//! 5. cut the device crop tables out of the composite (rescaled first when
//!    the background is not the reference size), resize each band to the
//!    store resolution, burn the title/subtitle pairs into the first
//!    outputs, and write `<output>/<urlScheme>/<tag>_<n>.png`.
//!
//! Everything between the asset reads and the final PNG writes happens in
//! memory.

use crate::config::BrandConfig;
use crate::fetch::VenueSource;
use crate::imaging::{
    color_wash, crop, draw_shadowed, fit_cover, hex_color, load_font, paste, rotate_expand,
    scale_box, ComposeError, TextError,
};
use crate::layout::{Layout, Scene, TextStyle};
use crate::render::{Rasterizer, RenderError};
use crate::scan::Brand;
use crate::template::{self, TemplateError};
use chrono::Datelike;
use image::imageops::FilterType;
use image::RgbaImage;
use rusttype::Font;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),
    #[error("font error: {0}")]
    Text(#[from] TextError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Where the shared run inputs live on disk.
#[derive(Debug, Clone)]
pub struct Assets {
    /// Directory holding the mockup templates and `bg.png`.
    pub dir: PathBuf,
    /// The shared background raster.
    pub background: PathBuf,
    /// Burn-in font. Without one the text step is skipped with a warning.
    pub font: Option<PathBuf>,
}

impl Assets {
    pub fn new(dir: impl Into<PathBuf>, font: Option<PathBuf>) -> Self {
        let dir = dir.into();
        let background = dir.join("bg.png");
        Self {
            dir,
            background,
            font,
        }
    }
}

/// What one brand produced.
#[derive(Debug)]
pub struct BrandReport {
    pub url_scheme: String,
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// The whole batch: successful brand reports plus per-brand failures.
#[derive(Debug)]
pub struct RunReport {
    pub brands: Vec<BrandReport>,
    pub failures: Vec<(String, PipelineError)>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn files_written(&self) -> usize {
        self.brands.iter().map(|b| b.files.len()).sum()
    }
}

/// Progress events emitted by [`Runner::run_all`].
#[derive(Debug)]
pub enum Event<'a> {
    Started {
        index: usize,
        total: usize,
        config: &'a BrandConfig,
    },
    Finished(&'a BrandReport),
    Failed(&'a str, &'a PipelineError),
}

pub struct Runner<'a> {
    layout: Layout,
    assets: Assets,
    rasterizer: Rasterizer,
    font: Option<Font<'static>>,
    venue: &'a dyn VenueSource,
    output_root: PathBuf,
}

impl<'a> Runner<'a> {
    pub fn new(
        layout: Layout,
        assets: Assets,
        venue: &'a dyn VenueSource,
        output_root: impl Into<PathBuf>,
    ) -> Result<Self, PipelineError> {
        let rasterizer = Rasterizer::new(assets.font.as_deref())?;
        let font = assets.font.as_deref().map(load_font).transpose()?;
        Ok(Self {
            layout,
            assets,
            rasterizer,
            font,
            venue,
            output_root: output_root.into(),
        })
    }

    /// Process every brand, isolating failures per brand. The observer sees
    /// one [`Event::Started`] per brand followed by its outcome.
    pub fn run_all(&self, brands: &[Brand], mut observer: impl FnMut(Event<'_>)) -> RunReport {
        let mut report = RunReport {
            brands: Vec::new(),
            failures: Vec::new(),
        };
        for (i, brand) in brands.iter().enumerate() {
            observer(Event::Started {
                index: i + 1,
                total: brands.len(),
                config: &brand.config,
            });
            match self.run_brand(brand) {
                Ok(done) => {
                    observer(Event::Finished(&done));
                    report.brands.push(done);
                }
                Err(err) => {
                    observer(Event::Failed(&brand.config.url_scheme, &err));
                    report.failures.push((brand.config.url_scheme.clone(), err));
                }
            }
        }
        report
    }

    /// Produce all outputs for one brand.
    pub fn run_brand(&self, brand: &Brand) -> Result<BrandReport, PipelineError> {
        let config = &brand.config;
        let year = chrono::Local::now().year();
        let mut warnings = Vec::new();
        let mut files = Vec::new();

        let out_dir = self.output_root.join(&config.url_scheme);
        fs::create_dir_all(&out_dir)?;

        let background = image::open(&self.assets.background)?.to_rgba8();
        let brand_color = hex_color(&config.theme_config_light.brand_color)?;

        // One photo per brand; every scene cover-fits its own slot from it.
        let venue_photo = match self.venue.fetch(config) {
            Ok(fetched) => {
                if let Some(reason) = &fetched.fallback_reason {
                    warnings.push(format!("venue photo from fallback ({reason})"));
                }
                Some(fetched.image)
            }
            Err(err) => {
                warnings.push(format!("venue photo skipped: {err}"));
                None
            }
        };

        for scene in &self.layout.scenes {
            let mut canvas = background.clone();
            color_wash(&mut canvas, brand_color, self.layout.wash_opacity);

            for slot in &scene.mockups {
                let svg = fs::read_to_string(self.assets.dir.join(&slot.template))?;
                let customized = template::customize(&svg, config, year)?;
                let raster = self.rasterizer.rasterize(&customized, None)?;
                let mockup = oriented(raster, slot.angle);
                paste(&mut canvas, &mockup, slot.position.0, slot.position.1);
            }

            if let (Some(slot), Some(photo)) = (&scene.venue, venue_photo.as_ref()) {
                let fitted = fit_cover(photo, slot.size)?;
                let overlay = oriented(fitted, slot.angle);
                paste(&mut canvas, &overlay, slot.position.0, slot.position.1);
            }

            files.extend(self.cut_scene(&canvas, scene, &out_dir)?);
        }

        if self.font.is_none() {
            warnings.push("no font configured, text burn-in skipped".into());
        }

        Ok(BrandReport {
            url_scheme: config.url_scheme.clone(),
            files,
            warnings,
        })
    }

    /// Crop a composited scene into its device outputs and write them.
    fn cut_scene(
        &self,
        canvas: &RgbaImage,
        scene: &Scene,
        out_dir: &Path,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let mut files = Vec::new();
        let actual = canvas.dimensions();
        let reference = self.layout.reference_size;

        for device in &scene.devices {
            for (n, reference_box) in device.crops.iter().enumerate() {
                let crop_box = if actual == reference {
                    *reference_box
                } else {
                    scale_box(reference_box, reference, actual)
                };
                let band = crop(canvas, &crop_box)?;
                let mut img = if band.dimensions() == device.resolution {
                    band
                } else {
                    image::imageops::resize(
                        &band,
                        device.resolution.0,
                        device.resolution.1,
                        FilterType::Lanczos3,
                    )
                };

                if let (Some(font), Some(overlay)) = (&self.font, self.layout.overlays.get(n)) {
                    burn_in(&mut img, font, &self.layout.text_style, &overlay.title, &overlay.subtitle);
                }

                let path = out_dir.join(format!("{}_{}.png", device.tag, n + 1));
                img.save(&path)?;
                files.push(path);
            }
        }
        Ok(files)
    }
}

fn oriented(img: RgbaImage, angle: f32) -> RgbaImage {
    if angle == 0.0 {
        img
    } else {
        rotate_expand(&img, angle)
    }
}

fn burn_in(img: &mut RgbaImage, font: &Font<'_>, style: &TextStyle, title: &str, subtitle: &str) {
    draw_shadowed(
        img,
        font,
        style.title.size,
        style.title.position.0,
        style.title.position.1,
        style.shadow_offset,
        style.shadow_opacity,
        style.title.opacity,
        title,
    );
    draw_shadowed(
        img,
        font,
        style.subtitle.size,
        style.subtitle.position.0,
        style.subtitle.position.1,
        style.shadow_offset,
        style.shadow_opacity,
        style.subtitle.opacity,
        subtitle,
    );
}
