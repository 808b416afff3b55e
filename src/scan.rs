//! Brand directory enumeration.
//!
//! The brands root is a flat tree of per-brand directories, each holding a
//! `config.json`:
//!
//! ```text
//! brands/
//! ├── fitfabriek/
//! │   └── config.json
//! ├── yogastudio-zuid/
//! │   └── config.json
//! └── Development/          # excluded via --exclude
//! ```
//!
//! Scanning is non-recursive: one level of directories, sorted by name for a
//! stable processing order. Directories without a `config.json`, hidden
//! directories, and excluded names are skipped silently — the original asset
//! dump contains plenty of non-brand entries.
//!
//! A directory whose `config.json` does not parse or validate is not fatal:
//! it lands in [`ScanReport::failures`] and the remaining brands are still
//! returned, so one broken brand never blocks the batch. Only an unreadable
//! brands root aborts the scan.

use crate::config::{self, BrandConfig, ConfigError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One discovered brand: its directory and its parsed config.
#[derive(Debug)]
pub struct Brand {
    pub dir: PathBuf,
    pub config: BrandConfig,
}

/// Outcome of a scan: usable brands plus the directories whose config was
/// broken, keyed by directory name.
#[derive(Debug)]
pub struct ScanReport {
    pub brands: Vec<Brand>,
    pub failures: Vec<(String, ConfigError)>,
}

/// Enumerate brand directories under `root`, skipping `exclude` names.
///
/// Each brand's `config.json` is parsed and validated here, so the pipeline
/// only ever sees well-formed configs. A broken config is recorded as a
/// per-brand failure, not an error; the caller reports it alongside the
/// pipeline's own per-brand failures.
pub fn scan_brands(root: &Path, exclude: &[String]) -> Result<ScanReport, ScanError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .filter(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            !name.starts_with('.') && !exclude.iter().any(|ex| ex == &name)
        })
        .filter(|p| p.join("config.json").is_file())
        .collect();

    dirs.sort();

    let mut report = ScanReport {
        brands: Vec::new(),
        failures: Vec::new(),
    };
    for dir in dirs {
        match config::load_config(&dir) {
            Ok(config) => report.brands.push(Brand { dir, config }),
            Err(err) => {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                report.failures.push((name, err));
            }
        }
    }
    Ok(report)
}
