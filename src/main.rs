use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storeshots::fetch::HttpVenueSource;
use storeshots::layout::Layout;
use storeshots::pipeline::{Assets, Event, PipelineError, Runner};
use storeshots::{output, scan};

#[derive(Parser)]
#[command(name = "storeshots")]
#[command(about = "App-store screenshot generator for white-labeled apps")]
#[command(long_about = "\
App-store screenshot generator for white-labeled apps

Each brand directory carries the config.json provisioned for its app. For
every brand, the SVG device mockups are recolored and retitled from that
config, rasterized, composited over a brand-washed background together with
the venue's photo, and cropped into per-device store screenshots.

Expected directory structure:

  brands/
  ├── fitfabriek/
  │   └── config.json          # theme colors, app name, venue URL
  └── yogastudio-zuid/
      └── config.json

  assets/
  ├── bg.png                   # shared background canvas
  ├── mockup1.svg              # phone mockups (class-marked slots)
  ├── mockup2.svg
  ├── mockup_ipad1.svg         # tablet mockups
  ├── mockup_ipad2.svg
  └── layout.json              # optional: overrides the built-in geometry

Outputs land in <output>/<urlScheme>/<device>_<n>.png. Run
'storeshots gen-layout' to print the built-in layout.json as a starting
point for customization.")]
#[command(version)]
struct Cli {
    /// Brands root: one directory per brand, each with a config.json
    #[arg(long, default_value = "brands", global = true)]
    brands: PathBuf,

    /// Assets directory: mockup templates, bg.png, optional layout.json
    #[arg(long, default_value = "assets", global = true)]
    assets: PathBuf,

    /// Output directory; one subdirectory per brand urlScheme
    #[arg(long, default_value = "out", global = true)]
    output: PathBuf,

    /// Brand directory name to skip (repeatable)
    #[arg(long, global = true)]
    exclude: Vec<String>,

    /// TTF/OTF font for the text burn-in; omit to skip burn-in
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate screenshots for every brand
    Build,
    /// Validate brand configs without generating anything
    Check,
    /// Print the built-in layout.json with all production values
    GenLayout,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Scanning {}", cli.brands.display());
            let scanned = scan::scan_brands(&cli.brands, &cli.exclude)?;
            println!("==> Processing {} brands", scanned.brands.len());

            let layout = Layout::load_or_default(&cli.assets)?;
            let assets = Assets::new(&cli.assets, cli.font.clone());
            let venue = HttpVenueSource::default();
            let runner = Runner::new(layout, assets, &venue, &cli.output)?;

            let mut report = runner.run_all(&scanned.brands, |event| output::print_event(&event));
            // Brands with broken configs count as failures too.
            for (name, err) in scanned.failures {
                let err = PipelineError::from(err);
                output::print_event(&Event::Failed(&name, &err));
                report.failures.push((name, err));
            }
            output::print_run_summary(&report);
            if report.has_failures() {
                std::process::exit(1);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.brands.display());
            let scanned = scan::scan_brands(&cli.brands, &cli.exclude)?;
            output::print_check_list(&scanned);
            if !scanned.failures.is_empty() {
                std::process::exit(1);
            }
        }
        Command::GenLayout => {
            println!("{}", Layout::default().to_json()?);
        }
    }

    Ok(())
}
