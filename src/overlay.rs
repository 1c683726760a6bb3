//! Fixed-position annotations stamped on top of the laid out pages.
//!
//! Overlay positions use a top-left origin, like screen pixels: `x` grows to
//! the right and `y` grows *down* from the top edge of the page. The
//! compositor converts them into PDF's bottom-left origin space.
//!
//! Overlays can be built in code or read from JSON:
//!
//! ```
//! use pdf_annotate::{overlays_from_json, Overlay, Pt};
//!
//! let overlays = overlays_from_json(r#"[
//!     {"type": "image", "path": "signature.png", "x": 200, "y": 250, "w": 150, "h": 60},
//!     {"type": "text", "text": "Jane Doe", "x": 200, "y": 200, "size": 14}
//! ]"#).expect("valid overlays");
//!
//! assert_eq!(overlays[1], Overlay::text("Jane Doe", Pt(200.0), Pt(200.0)).with_size(Pt(14.0)));
//! ```

use crate::colour::Colour;
use crate::units::Pt;
use crate::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_text_size() -> Pt {
    Pt(12.0)
}

fn default_text_font() -> String {
    "Helvetica".to_string()
}

/// A line of text drawn at a fixed position, e.g. a name or a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub x: Pt,
    #[serde(default)]
    pub y: Pt,
    /// Font size; also the height of the element when placing it
    #[serde(default = "default_text_size")]
    pub size: Pt,
    #[serde(default = "default_text_font")]
    pub font: String,
    #[serde(default)]
    pub colour: Colour,
}

/// An image drawn at a fixed position, e.g. a checkmark or a signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOverlay {
    /// Where the image lives on disk; resolved by the caller, not by this crate
    pub path: PathBuf,
    #[serde(default)]
    pub x: Pt,
    #[serde(default)]
    pub y: Pt,
    /// Width to draw at; the image's width in pixels when unset
    #[serde(default)]
    pub w: Option<Pt>,
    /// Height to draw at; the image's height in pixels when unset
    #[serde(default)]
    pub h: Option<Pt>,
}

/// A positioned text or image element drawn on top of the page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Overlay {
    Text(TextOverlay),
    Image(ImageOverlay),
}

impl Overlay {
    /// Text in the default font (Helvetica, 12pt, black) with its top-left
    /// corner at `(x, y)`
    pub fn text<S: ToString>(text: S, x: Pt, y: Pt) -> Overlay {
        Overlay::Text(TextOverlay {
            text: text.to_string(),
            x,
            y,
            size: default_text_size(),
            font: default_text_font(),
            colour: Colour::default(),
        })
    }

    /// An image at its native size with its top-left corner at `(x, y)`
    pub fn image<P: Into<PathBuf>>(path: P, x: Pt, y: Pt) -> Overlay {
        Overlay::Image(ImageOverlay {
            path: path.into(),
            x,
            y,
            w: None,
            h: None,
        })
    }

    /// Set the font size of a text overlay; images are left untouched
    pub fn with_size(mut self, size: Pt) -> Overlay {
        if let Overlay::Text(text) = &mut self {
            text.size = size;
        }
        self
    }

    /// Set the font of a text overlay; images are left untouched
    pub fn with_font<S: ToString>(mut self, font: S) -> Overlay {
        if let Overlay::Text(text) = &mut self {
            text.font = font.to_string();
        }
        self
    }

    /// Set the colour of a text overlay; images are left untouched
    pub fn with_colour(mut self, colour: Colour) -> Overlay {
        if let Overlay::Text(text) = &mut self {
            text.colour = colour;
        }
        self
    }

    /// Set the drawn size of an image overlay; text is left untouched
    pub fn with_dimensions(mut self, w: Pt, h: Pt) -> Overlay {
        if let Overlay::Image(image) = &mut self {
            image.w = Some(w);
            image.h = Some(h);
        }
        self
    }
}

/// Which pages receive the overlay pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayScope {
    /// Every page carries the overlays
    #[default]
    AllPages,
    /// Only the first page carries the overlays
    FirstPage,
    /// Only the last page carries the overlays, e.g. a closing signature page
    LastPage,
}

impl OverlayScope {
    pub fn includes(&self, page_index: usize, page_count: usize) -> bool {
        match self {
            OverlayScope::AllPages => true,
            OverlayScope::FirstPage => page_index == 0,
            OverlayScope::LastPage => page_index + 1 == page_count,
        }
    }
}

/// Parse a JSON array of overlays
pub fn overlays_from_json(json: &str) -> Result<Vec<Overlay>, Error> {
    Ok(serde_json::from_str(json)?)
}

/// The standard signing annotations: a checkmark, a signature image, the
/// signer's name and the signing date.
///
/// ```
/// use chrono::NaiveDate;
/// use pdf_annotate::{signature_block, Overlay};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
/// let overlays = signature_block("Jane Doe", date, "checkmark.png", "signature.png");
/// assert_eq!(overlays.len(), 4);
/// assert!(matches!(&overlays[3], Overlay::Text(t) if t.text == "Date: 2024-03-01"));
/// ```
pub fn signature_block<S, P, Q>(
    name: S,
    date: NaiveDate,
    checkmark: P,
    signature: Q,
) -> Vec<Overlay>
where
    S: ToString,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    vec![
        Overlay::image(checkmark.as_ref(), Pt(100.0), Pt(100.0))
            .with_dimensions(Pt(20.0), Pt(20.0)),
        Overlay::image(signature.as_ref(), Pt(200.0), Pt(250.0))
            .with_dimensions(Pt(150.0), Pt(60.0)),
        Overlay::text(name, Pt(200.0), Pt(200.0)).with_size(Pt(14.0)),
        Overlay::text(format!("Date: {}", date.format("%Y-%m-%d")), Pt(200.0), Pt(230.0)),
    ]
}
