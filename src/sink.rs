//! The seam between layout and rendering.
//!
//! Line wrapping only needs to measure text; page composition additionally
//! needs to start pages and draw on them. Both talk to these traits instead
//! of a concrete PDF writer, so the rendering backend can be swapped without
//! touching layout logic. [`PdfSink`](crate::PdfSink) is the PDF backend.

use crate::colour::Colour;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::Error;
use std::path::Path;

/// Something that knows how wide a string is when set in a given font and size
pub trait TextMeasure {
    /// Width of `text` in font `font` at `size`. Fails with
    /// [Error::MeasurementFailure] when the combination cannot be measured.
    fn text_width(&self, text: &str, font: &str, size: Pt) -> Result<Pt, Error>;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, &str, Pt) -> Result<Pt, Error>,
{
    fn text_width(&self, text: &str, font: &str, size: Pt) -> Result<Pt, Error> {
        self(text, font, size)
    }
}

/// A measurable, drawable sequence of pages.
///
/// Coordinates handed to a sink are already in PDF space (origin at the
/// bottom-left of the page, y growing upward).
pub trait PageSink: TextMeasure {
    /// Handle to an image that has been loaded into the sink
    type Image;

    /// Load an image so it can be drawn on any number of pages, returning it
    /// together with its native size. Fails with [Error::MissingResource]
    /// when the file cannot be found or decoded.
    fn load_image(&mut self, path: &Path) -> Result<(Self::Image, (Pt, Pt)), Error>;

    /// Start a new, empty page whose body text is kept inside `margins`
    fn begin_page(&mut self, size: PageSize, margins: &Margins) -> Result<(), Error>;

    /// Draw a single line of text with its baseline starting at `origin`
    fn draw_text(
        &mut self,
        text: &str,
        font: &str,
        size: Pt,
        colour: Colour,
        origin: (Pt, Pt),
    ) -> Result<(), Error>;

    /// Draw an image stretched to fill `position`
    fn draw_image(&mut self, image: &Self::Image, position: Rect) -> Result<(), Error>;

    /// Finalize the current page; nothing more is drawn on it
    fn end_page(&mut self) -> Result<(), Error>;
}
