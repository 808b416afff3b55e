//! End-to-end pipeline test on synthetic assets.
//!
//! Builds a miniature brands tree and assets directory (a 120x80 background,
//! two class-marked SVG templates, a layout.json scaled down to match),
//! runs the full pipeline with an in-memory venue source, and checks the
//! written PNGs: names, dimensions, and the pixels that prove each stage ran.

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use storeshots::config::BrandConfig;
use storeshots::fetch::{FetchError, FetchedVenue, VenueSource};
use storeshots::imaging::CropBox;
use storeshots::layout::{DeviceCrops, Layout, MockupSlot, Scene, VenueSlot};
use storeshots::pipeline::{Assets, Runner};
use storeshots::scan;
use tempfile::TempDir;

struct StaticVenue;

impl VenueSource for StaticVenue {
    fn fetch(&self, _config: &BrandConfig) -> Result<FetchedVenue, FetchError> {
        Ok(FetchedVenue {
            image: RgbaImage::from_pixel(64, 64, Rgba([0, 0, 255, 255])),
            fallback_reason: None,
        })
    }
}

const MOCKUP_1: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="40">
<rect class="background" fill="#ffffff" width="20" height="40"/>
<text><tspan class="brandname">SportBit Manager</tspan></text>
</svg>"##;

const MOCKUP_2: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="40">
<rect class="tabbarColor" fill="#000000" width="20" height="8"/>
</svg>"##;

fn test_layout() -> Layout {
    let mut layout = Layout::default();
    layout.reference_size = (120, 80);
    layout.scenes = vec![Scene {
        name: "phone".into(),
        mockups: vec![
            MockupSlot {
                template: "mockup1.svg".into(),
                position: (4, 4),
                angle: 0.0,
            },
            MockupSlot {
                template: "mockup2.svg".into(),
                position: (40, 4),
                angle: 15.0,
            },
        ],
        venue: Some(VenueSlot {
            size: (24, 12),
            position: (80, 60),
            angle: 0.0,
        }),
        devices: vec![DeviceCrops {
            tag: "69".into(),
            resolution: (30, 60),
            crops: vec![
                CropBox::new(0, 0, 30, 60),
                CropBox::new(40, 0, 70, 60),
                CropBox::new(75, 10, 105, 70),
            ],
        }],
    }];
    layout
}

fn write_brand(root: &Path, scheme: &str, brand_color: &str) {
    let dir = root.join(scheme);
    fs::create_dir_all(&dir).unwrap();
    let config = format!(
        r##"{{
            "urlScheme": "{scheme}",
            "app": {{ "naam": "Test App" }},
            "themeConfigLight": {{
                "appBarColor": "#00ff00",
                "dividerColor": "#cccccc",
                "brandColor": "{brand_color}"
            }},
            "unrelatedProvisioningField": {{ "ignored": true }}
        }}"##
    );
    fs::write(dir.join("config.json"), config).unwrap();
}

fn write_assets(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("mockup1.svg"), MOCKUP_1).unwrap();
    fs::write(dir.join("mockup2.svg"), MOCKUP_2).unwrap();
    fs::write(
        dir.join("layout.json"),
        test_layout().to_json().unwrap(),
    )
    .unwrap();
    let bg = RgbaImage::from_pixel(120, 80, Rgba([20, 20, 20, 255]));
    bg.save(dir.join("bg.png")).unwrap();
}

#[test]
fn full_run_produces_branded_screenshots() {
    let tmp = TempDir::new().unwrap();
    let brands_dir = tmp.path().join("brands");
    let assets_dir = tmp.path().join("assets");
    let out_dir = tmp.path().join("out");
    write_brand(&brands_dir, "alpha", "#ff0000");
    write_brand(&brands_dir, "beta", "#0000ff");
    write_assets(&assets_dir);

    let scanned = scan::scan_brands(&brands_dir, &[]).unwrap();
    assert_eq!(scanned.brands.len(), 2);

    let layout = Layout::load_or_default(&assets_dir).unwrap();
    assert_eq!(layout.reference_size, (120, 80));

    let venue = StaticVenue;
    let runner = Runner::new(layout, Assets::new(&assets_dir, None), &venue, &out_dir).unwrap();
    let report = runner.run_all(&scanned.brands, |_| {});

    assert!(!report.has_failures());
    assert_eq!(report.files_written(), 6);

    for scheme in ["alpha", "beta"] {
        for n in 1..=3 {
            let path = out_dir.join(scheme).join(format!("69_{n}.png"));
            let img = image::open(&path).unwrap().to_rgba8();
            assert_eq!(img.dimensions(), (30, 60), "{}", path.display());
        }
    }

    // First crop covers mockup1 at (4,4): its background rect was recolored
    // to the brand color before rasterization.
    let first = image::open(out_dir.join("alpha/69_1.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(first.get_pixel(10, 20).0, [255, 0, 0, 255]);

    // Third crop covers the venue slot at (80,60): solid blue photo pixels.
    let third = image::open(out_dir.join("alpha/69_3.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(third.get_pixel(15, 55).0, [0, 0, 255, 255]);

    // Outside every paste the wash tints the dark background toward red.
    let washed = first.get_pixel(1, 55).0;
    assert!(washed[0] > washed[2], "{washed:?}");
}

#[test]
fn excluded_brand_directories_produce_no_output() {
    let tmp = TempDir::new().unwrap();
    let brands_dir = tmp.path().join("brands");
    let assets_dir = tmp.path().join("assets");
    let out_dir = tmp.path().join("out");
    write_brand(&brands_dir, "real", "#ff0000");
    write_brand(&brands_dir, "Development", "#ff0000");
    write_assets(&assets_dir);

    let scanned = scan::scan_brands(&brands_dir, &["Development".into()]).unwrap();
    let layout = Layout::load_or_default(&assets_dir).unwrap();
    let venue = StaticVenue;
    let runner = Runner::new(layout, Assets::new(&assets_dir, None), &venue, &out_dir).unwrap();
    let report = runner.run_all(&scanned.brands, |_| {});

    assert_eq!(report.brands.len(), 1);
    assert!(out_dir.join("real").is_dir());
    assert!(!out_dir.join("Development").exists());
}

#[test]
fn broken_config_never_blocks_a_sibling_brand() {
    let tmp = TempDir::new().unwrap();
    let brands_dir = tmp.path().join("brands");
    let assets_dir = tmp.path().join("assets");
    let out_dir = tmp.path().join("out");
    write_brand(&brands_dir, "healthy", "#ff0000");
    let broken = brands_dir.join("mangled");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("config.json"), "{ not json").unwrap();
    write_assets(&assets_dir);

    let scanned = scan::scan_brands(&brands_dir, &[]).unwrap();
    assert_eq!(scanned.failures.len(), 1);
    assert_eq!(scanned.failures[0].0, "mangled");

    let layout = Layout::load_or_default(&assets_dir).unwrap();
    let venue = StaticVenue;
    let runner = Runner::new(layout, Assets::new(&assets_dir, None), &venue, &out_dir).unwrap();
    let report = runner.run_all(&scanned.brands, |_| {});

    assert!(!report.has_failures());
    assert_eq!(report.brands.len(), 1);
    assert!(out_dir.join("healthy").join("69_1.png").is_file());
    assert!(!out_dir.join("mangled").exists());
}
