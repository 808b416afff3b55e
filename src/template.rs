//! Mockup template customization.
//!
//! Device mockups are parametrized SVG documents. Elements carrying marker
//! classes act as substitution slots:
//!
//! | Marker | Slot | Replacement |
//! |---|---|---|
//! | `class="tabbarColor"` | `fill` attribute | theme `appBarColor` |
//! | `class="divider"` | `fill` attribute | theme `dividerColor` |
//! | `class="background"` | `fill` attribute | theme `brandColor` |
//! | `class="brandbutton"` | `fill` attribute | theme `welkomInlogknopColor` |
//! | `<tspan class="brandname">` | text | literal default brand name → app name |
//! | `<tspan class="trainer">` | text | `docent` when dialect is `yoga` |
//! | `<tspan class="year">` | text | `{year}` token → current year |
//!
//! The rewrite is a single streaming pass: events without a matching marker
//! are copied through untouched, so a document with no remaining slots comes
//! out byte-identical. Substitution is idempotent on token-free input, but
//! the brand-name slot matches the *default* brand string — always customize
//! the pristine template, never an already-branded document.

use crate::config::BrandConfig;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// Placeholder brand name baked into the pristine templates.
pub const DEFAULT_BRAND_NAME: &str = "SportBit Manager";

/// Year placeholder token in copyright lines.
pub const YEAR_TOKEN: &str = "{year}";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Text slot kinds recognized on `tspan` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextSlot {
    BrandName,
    Trainer,
    Year,
}

/// Apply a brand's theme and copy to a pristine SVG template.
///
/// Returns a new document; the input is never modified. Unmatched elements
/// pass through untouched.
pub fn customize(svg: &str, config: &BrandConfig, year: i32) -> Result<String, TemplateError> {
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::new());
    // One entry per open tspan, so nested spans restore the outer slot.
    let mut slot_stack: Vec<Option<TextSlot>> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                if e.local_name().as_ref() == b"tspan" {
                    slot_stack.push(text_slot(&e)?);
                }
                match themed_fill(&e, config)? {
                    Some(rewritten) => writer.write_event(Event::Start(rewritten))?,
                    None => writer.write_event(Event::Start(e))?,
                }
            }
            Event::Empty(e) => match themed_fill(&e, config)? {
                Some(rewritten) => writer.write_event(Event::Empty(rewritten))?,
                None => writer.write_event(Event::Empty(e))?,
            },
            Event::End(e) => {
                if e.local_name().as_ref() == b"tspan" {
                    slot_stack.pop();
                }
                writer.write_event(Event::End(e))?;
            }
            Event::Text(t) => match slot_stack.last().copied().flatten() {
                Some(slot) => {
                    let original = t.unescape()?;
                    let replaced = substitute_text(slot, &original, config, year);
                    writer.write_event(Event::Text(BytesText::new(&replaced)))?;
                }
                None => writer.write_event(Event::Text(t))?,
            },
            other => writer.write_event(other)?,
        }
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

/// The themed fill color for an element, if one of its classes is a marker.
///
/// Returns a rebuilt element with the `fill` attribute replaced (or added),
/// or `None` when the element carries no marker class.
fn themed_fill(
    e: &BytesStart<'_>,
    config: &BrandConfig,
) -> Result<Option<BytesStart<'static>>, TemplateError> {
    let theme = &config.theme_config_light;
    let classes = attribute_value(e, b"class")?;
    let Some(classes) = classes else {
        return Ok(None);
    };

    let mut color: Option<&str> = None;
    for class in classes.split_ascii_whitespace() {
        color = match class {
            "tabbarColor" => Some(theme.app_bar_color.as_str()),
            "divider" => Some(theme.divider_color.as_str()),
            "background" => Some(theme.brand_color.as_str()),
            "brandbutton" => theme.welkom_inlogknop_color.as_deref(),
            _ => continue,
        };
        break;
    }
    let Some(color) = color else {
        return Ok(None);
    };

    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut rebuilt = BytesStart::new(name);
    let mut replaced = false;
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == b"fill" {
            rebuilt.push_attribute(("fill", color));
            replaced = true;
        } else {
            rebuilt.push_attribute(attr);
        }
    }
    if !replaced {
        rebuilt.push_attribute(("fill", color));
    }
    Ok(Some(rebuilt))
}

/// Which text slot, if any, a `tspan`'s class list selects.
fn text_slot(e: &BytesStart<'_>) -> Result<Option<TextSlot>, TemplateError> {
    let Some(classes) = attribute_value(e, b"class")? else {
        return Ok(None);
    };
    for class in classes.split_ascii_whitespace() {
        let slot = match class {
            "brandname" => TextSlot::BrandName,
            "trainer" => TextSlot::Trainer,
            "year" => TextSlot::Year,
            _ => continue,
        };
        return Ok(Some(slot));
    }
    Ok(None)
}

fn substitute_text(slot: TextSlot, text: &str, config: &BrandConfig, year: i32) -> String {
    match slot {
        TextSlot::BrandName => text.replace(DEFAULT_BRAND_NAME, &config.app.name),
        TextSlot::Trainer => {
            if config.dialect.as_deref() == Some("yoga") {
                "docent".to_string()
            } else {
                text.to_string()
            }
        }
        TextSlot::Year => text.replace(YEAR_TOKEN, &year.to_string()),
    }
}

fn attribute_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, TemplateError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
