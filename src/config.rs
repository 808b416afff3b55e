//! Brand configuration loading.
//!
//! Every brand directory carries a `config.json` produced by the app's
//! provisioning backend. The file holds far more than we need; this module
//! deserializes only the fields the screenshot pipeline consumes and ignores
//! the rest (the schema is owned upstream, so unknown keys are not an error
//! here — the opposite of a hand-edited config file).
//!
//! ```json
//! {
//!   "urlScheme": "fitfabriek",
//!   "app": { "naam": "FitFabriek" },
//!   "dialect": "yoga",
//!   "themeConfigLight": {
//!     "appBarColor": "#1a2b3c",
//!     "dividerColor": "#dddddd",
//!     "brandColor": "#ff6600",
//!     "welkomInlogknopColor": "#ff6600"
//!   },
//!   "sportlocatie": { "url": "https://fitfabriek.example" }
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// One white-labeled brand, as read from its `config.json`.
///
/// Immutable for the duration of a run; the pipeline never writes it back.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfig {
    /// URL scheme string; doubles as the output directory name.
    pub url_scheme: String,
    pub app: AppInfo,
    /// Locale/vocabulary variant; `"yoga"` swaps trainer terminology.
    #[serde(default)]
    pub dialect: Option<String>,
    pub theme_config_light: ThemeColors,
    /// The brand's venue site, source of the decorative photo overlay.
    #[serde(default)]
    pub sportlocatie: Option<Venue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppInfo {
    /// Display name substituted into the mockup templates.
    #[serde(rename = "naam")]
    pub name: String,
}

/// Light-theme colors, hex `#RRGGBB` strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub app_bar_color: String,
    pub divider_color: String,
    pub brand_color: String,
    /// Welcome-screen login button; optional, some brands use the default.
    #[serde(default)]
    pub welkom_inlogknop_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub url: Option<String>,
}

impl BrandConfig {
    /// Validate the fields the pipeline depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_scheme.trim().is_empty() {
            return Err(ConfigError::Validation("urlScheme must not be empty".into()));
        }
        if self.app.name.trim().is_empty() {
            return Err(ConfigError::Validation("app.naam must not be empty".into()));
        }
        for (field, value) in [
            ("appBarColor", &self.theme_config_light.app_bar_color),
            ("dividerColor", &self.theme_config_light.divider_color),
            ("brandColor", &self.theme_config_light.brand_color),
        ] {
            validate_hex(field, value)?;
        }
        if let Some(c) = &self.theme_config_light.welkom_inlogknop_color {
            validate_hex("welkomInlogknopColor", c)?;
        }
        Ok(())
    }

    /// The venue base URL, if the config carries one.
    pub fn venue_base_url(&self) -> Option<&str> {
        self.sportlocatie
            .as_ref()
            .and_then(|v| v.url.as_deref())
            .filter(|u| !u.trim().is_empty())
    }
}

fn validate_hex(field: &str, value: &str) -> Result<(), ConfigError> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::Validation(format!(
            "{field} must be a #RRGGBB color, got {value:?}"
        )));
    }
    Ok(())
}

/// Load and validate `config.json` from a brand directory.
pub fn load_config(brand_dir: &Path) -> Result<BrandConfig, ConfigError> {
    let path = brand_dir.join("config.json");
    let content = fs::read_to_string(&path)?;
    let config: BrandConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
