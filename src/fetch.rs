//! Venue photo download.
//!
//! Each brand may point at its venue website; the composite uses that site's
//! `/img/bg.jpg` as a decorative overlay. Failures of any kind — missing
//! config field, transport error, non-2xx status, payload that does not
//! decode as an image — trigger exactly one fallback request to the demo
//! site's copy of the same path. If the fallback also fails the error
//! propagates and the caller decides what to do with the missing overlay.
//!
//! [`VenueSource`] is the seam: production uses [`HttpVenueSource`]
//! (blocking reqwest, one request per brand); tests substitute an in-memory
//! implementation.

use crate::config::BrandConfig;
use image::RgbaImage;
use thiserror::Error;

/// Fallback venue site used when a brand's own URL is absent or broken.
pub const DEFAULT_VENUE_BASE_URL: &str = "https://demo.sportbitapp.nl";

/// Path of the venue background photo on every venue site.
pub const VENUE_IMAGE_PATH: &str = "/img/bg.jpg";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("venue image from {url} does not decode: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{0}")]
    Transport(String),
}

/// A fetched venue photo plus why the fallback supplied it, if it did.
#[derive(Debug)]
pub struct FetchedVenue {
    pub image: RgbaImage,
    /// `None` when the brand's own URL worked; otherwise the reason the
    /// primary attempt was abandoned (missing URL or the fetch error).
    pub fallback_reason: Option<String>,
}

impl FetchedVenue {
    pub fn used_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Source of venue photos; the pipeline's only network seam.
pub trait VenueSource {
    fn fetch(&self, config: &BrandConfig) -> Result<FetchedVenue, FetchError>;
}

/// Build the venue image URL for a venue site base URL.
pub fn venue_image_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), VENUE_IMAGE_PATH)
}

/// Fetch with an injected transport; the fallback policy lives here so it is
/// testable without a network.
///
/// The primary URL (when configured) gets one attempt; any failure falls
/// through to a single attempt on `fallback_base`, and the reason for the
/// fallback is carried along so the caller can report it.
pub fn fetch_with<F>(
    config: &BrandConfig,
    fallback_base: &str,
    mut get: F,
) -> Result<FetchedVenue, FetchError>
where
    F: FnMut(&str) -> Result<Vec<u8>, FetchError>,
{
    let reason = match config.venue_base_url() {
        Some(base) => {
            let url = venue_image_url(base);
            match get(&url).and_then(|bytes| decode(&url, &bytes)) {
                Ok(image) => {
                    return Ok(FetchedVenue {
                        image,
                        fallback_reason: None,
                    })
                }
                Err(err) => format!("{url}: {err}"),
            }
        }
        None => "no venue URL configured".to_string(),
    };

    let url = venue_image_url(fallback_base);
    let bytes = get(&url)?;
    let image = decode(&url, &bytes)?;
    Ok(FetchedVenue {
        image,
        fallback_reason: Some(reason),
    })
}

fn decode(url: &str, bytes: &[u8]) -> Result<RgbaImage, FetchError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
}

/// Blocking HTTP venue source.
pub struct HttpVenueSource {
    client: reqwest::blocking::Client,
    fallback_base: String,
}

impl HttpVenueSource {
    pub fn new(fallback_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            fallback_base: fallback_base.into(),
        }
    }
}

impl Default for HttpVenueSource {
    fn default() -> Self {
        Self::new(DEFAULT_VENUE_BASE_URL)
    }
}

impl VenueSource for HttpVenueSource {
    fn fetch(&self, config: &BrandConfig) -> Result<FetchedVenue, FetchError> {
        fetch_with(config, &self.fallback_base, |url| {
            let response = self.client.get(url).send()?.error_for_status()?;
            Ok(response.bytes()?.to_vec())
        })
    }
}
