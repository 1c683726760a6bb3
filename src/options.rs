//! Render configuration.

use crate::colour::Colour;
use crate::info::Info;
use crate::layout::Margins;
use crate::overlay::OverlayScope;
use crate::pagesize::PageSize;
use crate::units::Pt;
use crate::Error;
use serde::{Deserialize, Serialize};

/// Leading is this multiple of the font size unless set explicitly
pub const DEFAULT_LEADING_FACTOR: f32 = 1.2;

/// How paragraphs are set onto pages and where overlays go.
///
/// Every field has a default, so configuration files only need to mention
/// what they change:
///
/// ```
/// use pdf_annotate::{pagesize, OverlayScope, Pt, RenderOptions};
///
/// let options = RenderOptions::from_json(r#"{"page_size": "a4", "overlay_scope": "last_page"}"#)
///     .expect("valid options");
/// assert_eq!(options.page_size, pagesize::A4);
/// assert_eq!(options.overlay_scope, OverlayScope::LastPage);
/// assert_eq!(options.leading(), Pt(12.0 * 1.2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Size of every output page
    pub page_size: PageSize,
    /// Space kept free around the body text
    #[serde(alias = "margin")]
    pub margins: Margins,
    /// Font body text is set in
    pub font_name: String,
    pub font_size: Pt,
    /// Distance between baselines; `font_size * 1.2` when unset
    pub leading: Option<Pt>,
    pub text_colour: Colour,
    /// Which pages receive the overlays
    pub overlay_scope: OverlayScope,
    /// Metadata written to the PDF, if any
    pub info: Option<Info>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margins: Margins::all(Pt(50.0)),
            font_name: "Helvetica".to_string(),
            font_size: Pt(12.0),
            leading: None,
            text_colour: Colour::default(),
            overlay_scope: OverlayScope::default(),
            info: None,
        }
    }
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the body font by name and size
    pub fn with_font(mut self, name: impl Into<String>, size: Pt) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    /// Override the distance between baselines
    pub fn with_leading(mut self, leading: Pt) -> Self {
        self.leading = Some(leading);
        self
    }

    pub fn with_text_colour(mut self, colour: Colour) -> Self {
        self.text_colour = colour;
        self
    }

    pub fn with_overlay_scope(mut self, scope: OverlayScope) -> Self {
        self.overlay_scope = scope;
        self
    }

    pub fn with_info(mut self, info: Info) -> Self {
        self.info = Some(info);
        self
    }

    /// The distance between baselines actually used for layout
    pub fn leading(&self) -> Pt {
        self.leading.unwrap_or(self.font_size * DEFAULT_LEADING_FACTOR)
    }

    /// Width available to a line of body text
    pub fn max_line_width(&self) -> Pt {
        self.margins.inner_width(self.page_size.width)
    }

    /// Reject options that describe an impossible page
    pub fn validate(&self) -> Result<(), Error> {
        let PageSize { width, height } = self.page_size;
        if !width.is_positive() || !height.is_positive() {
            return Err(Error::InvalidOptions(format!(
                "page size {width} x {height} is not positive"
            )));
        }

        let Margins {
            top,
            right,
            bottom,
            left,
        } = &self.margins;
        if [*top, *right, *bottom, *left]
            .iter()
            .any(|m| !m.is_finite() || **m < 0.0)
        {
            return Err(Error::InvalidOptions(format!(
                "margins must be finite and non-negative, got {:?}",
                self.margins
            )));
        }
        if !self.max_line_width().is_positive() || !self.margins.inner_height(height).is_positive()
        {
            return Err(Error::InvalidOptions(format!(
                "margins {:?} leave no room for text on a {width} x {height} page",
                self.margins
            )));
        }

        if !self.font_size.is_positive() {
            return Err(Error::InvalidOptions(format!(
                "font size {} is not positive",
                self.font_size
            )));
        }
        if !self.leading().is_positive() {
            return Err(Error::InvalidOptions(format!(
                "leading {} is not positive",
                self.leading()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::{LEGAL, LETTER};

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.page_size, LETTER);
        assert_eq!(options.margins, Margins::all(Pt(50.0)));
        assert_eq!(options.font_name, "Helvetica");
        assert_eq!(options.font_size, Pt(12.0));
        assert_eq!(options.leading(), Pt(12.0) * 1.2);
        assert_eq!(options.max_line_width(), Pt(512.0));
        assert_eq!(options.overlay_scope, OverlayScope::AllPages);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .with_page_size(LEGAL)
            .with_margins(Margins::all(Pt(72.0)))
            .with_font("Courier", Pt(10.0))
            .with_leading(Pt(16.0))
            .with_overlay_scope(OverlayScope::FirstPage);

        assert_eq!(options.page_size, LEGAL);
        assert_eq!(options.font_name, "Courier");
        assert_eq!(options.leading(), Pt(16.0));
        assert_eq!(options.max_line_width(), Pt(468.0));
        assert_eq!(options.overlay_scope, OverlayScope::FirstPage);
    }

    #[test]
    fn json_accepts_a_single_margin_value() {
        let options = RenderOptions::from_json(r#"{"margin": 36, "font_size": 10}"#)
            .expect("valid options");
        assert_eq!(options.margins, Margins::all(Pt(36.0)));
        assert_eq!(options.leading(), Pt(10.0) * 1.2);
        assert_eq!(options.font_name, "Helvetica");
    }

    #[test]
    fn rejects_impossible_pages() {
        let squeezed = RenderOptions::new().with_margins(Margins::all(Pt(400.0)));
        assert!(matches!(squeezed.validate(), Err(Error::InvalidOptions(_))));

        let flat = RenderOptions::new().with_leading(Pt(0.0));
        assert!(matches!(flat.validate(), Err(Error::InvalidOptions(_))));

        let tiny = RenderOptions::new().with_font("Helvetica", Pt(-1.0));
        assert!(tiny.validate().is_err());

        let negative = RenderOptions::new().with_margins(Margins::all(Pt(-5.0)));
        assert!(negative.validate().is_err());
    }
}
