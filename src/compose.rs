//! Page composition: body text first, overlays on top.
//!
//! [`composite`] walks a finished [`PagePlan`] and drives a [`PageSink`]: for
//! every page it draws that page's lines, then the overlays, then closes the
//! page. [`render_with`] adds the wrapping step in front of it and
//! [`render_pdf`] wires everything up to a [`PdfSink`].

use crate::layout::{wrap_paragraphs, PagePlan};
use crate::options::RenderOptions;
use crate::overlay::{Overlay, TextOverlay};
use crate::pdf_sink::PdfSink;
use crate::rect::{flip_y, Rect};
use crate::sink::PageSink;
use crate::units::Pt;
use crate::Error;

/// What ended up on one output page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedPage {
    /// Zero-based position of the page in the document
    pub index: usize,
    /// Number of wrapped lines assigned to the page, blank ones included
    pub lines: usize,
    pub overlays_drawn: usize,
    /// Overlays that were skipped because their resource couldn't be loaded
    pub overlays_skipped: usize,
}

/// An overlay with its resources loaded and its position in PDF space
enum Resolved<'a, I> {
    Text {
        overlay: &'a TextOverlay,
        origin: (Pt, Pt),
    },
    Image {
        handle: I,
        position: Rect,
    },
    Skipped,
}

/// Load every overlay's resources once and work out where it lands.
///
/// Images that can't be loaded are logged and skipped so the rest of the
/// document still renders.
fn resolve_overlays<'a, S: PageSink>(
    overlays: &'a [Overlay],
    page_height: Pt,
    sink: &mut S,
) -> Result<Vec<Resolved<'a, S::Image>>, Error> {
    let mut resolved = Vec::with_capacity(overlays.len());

    for overlay in overlays {
        match overlay {
            Overlay::Text(text) => resolved.push(Resolved::Text {
                overlay: text,
                origin: (text.x, flip_y(text.y, text.size, page_height)),
            }),
            Overlay::Image(image) => match sink.load_image(&image.path) {
                Ok((handle, (native_w, native_h))) => {
                    let w = image.w.unwrap_or(native_w);
                    let h = image.h.unwrap_or(native_h);
                    resolved.push(Resolved::Image {
                        handle,
                        position: Rect::from_top_left(image.x, image.y, w, h, page_height),
                    });
                }
                Err(Error::MissingResource { path, reason }) => {
                    log::warn!("skipping image overlay {}: {}", path.display(), reason);
                    resolved.push(Resolved::Skipped);
                }
                Err(e) => return Err(e),
            },
        }
    }

    Ok(resolved)
}

/// Lay out already wrapped `lines` onto pages and stamp `overlays` on the
/// pages selected by the options' overlay scope.
///
/// Body text is always drawn before the overlays on a page, so overlays end
/// up on top. Blank lines take up vertical space but are not drawn. A
/// missing image only skips that overlay; a measurement or drawing failure
/// aborts the whole composition.
pub fn composite<S: PageSink>(
    lines: &[String],
    overlays: &[Overlay],
    options: &RenderOptions,
    sink: &mut S,
) -> Result<Vec<RenderedPage>, Error> {
    options.validate()?;

    let plan = PagePlan::new(
        lines.len(),
        options.page_size,
        &options.margins,
        options.leading(),
    );
    let resolved = resolve_overlays(overlays, options.page_size.height, sink)?;
    let page_count = plan.page_count();
    let mut rendered = Vec::with_capacity(page_count);

    for (index, planned) in plan.pages.iter().enumerate() {
        sink.begin_page(options.page_size, &options.margins)?;

        for placed in planned.lines.iter() {
            let text = &lines[placed.index];
            if text.is_empty() {
                continue;
            }
            sink.draw_text(
                text,
                &options.font_name,
                options.font_size,
                options.text_colour,
                (placed.x, placed.baseline),
            )?;
        }

        let mut page = RenderedPage {
            index,
            lines: planned.lines.len(),
            ..Default::default()
        };

        if options.overlay_scope.includes(index, page_count) {
            for overlay in resolved.iter() {
                match overlay {
                    Resolved::Text { overlay, origin } => {
                        sink.draw_text(
                            &overlay.text,
                            &overlay.font,
                            overlay.size,
                            overlay.colour,
                            *origin,
                        )?;
                        page.overlays_drawn += 1;
                    }
                    Resolved::Image { handle, position } => {
                        sink.draw_image(handle, *position)?;
                        page.overlays_drawn += 1;
                    }
                    Resolved::Skipped => page.overlays_skipped += 1,
                }
            }
        }

        sink.end_page()?;
        rendered.push(page);
    }

    log::info!(
        "composited {} lines and {} overlays onto {} page(s)",
        lines.len(),
        overlays.len(),
        rendered.len()
    );
    Ok(rendered)
}

/// Wrap `paragraphs` with the sink's own measurements, then [composite] them.
pub fn render_with<P, S>(
    paragraphs: &[P],
    overlays: &[Overlay],
    options: &RenderOptions,
    sink: &mut S,
) -> Result<Vec<RenderedPage>, Error>
where
    P: AsRef<str>,
    S: PageSink,
{
    options.validate()?;
    let lines = wrap_paragraphs(
        paragraphs,
        options.max_line_width(),
        &options.font_name,
        options.font_size,
        &*sink,
    )?;
    composite(&lines, overlays, options, sink)
}

/// Render paragraphs and overlays straight to PDF bytes.
///
/// Nothing is returned unless the whole document rendered; the output is a
/// pure function of the inputs, so the same arguments always produce the
/// same bytes.
///
/// ```
/// use pdf_annotate::{render_pdf, Overlay, Pt, RenderOptions};
///
/// let overlays = vec![Overlay::text("Approved", Pt(400.0), Pt(40.0))];
/// let pdf = render_pdf(&["Hello, world!"], &overlays, &RenderOptions::default())
///     .expect("renders");
/// assert!(pdf.starts_with(b"%PDF-"));
/// ```
pub fn render_pdf<P: AsRef<str>>(
    paragraphs: &[P],
    overlays: &[Overlay],
    options: &RenderOptions,
) -> Result<Vec<u8>, Error> {
    let mut sink = PdfSink::new();
    if let Some(info) = &options.info {
        sink = sink.with_info(info.clone());
    }
    render_with(paragraphs, overlays, options, &mut sink)?;
    sink.finish()
}
