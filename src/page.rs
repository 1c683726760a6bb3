use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::Error;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// The font and size a span of text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single run of text positioned on a page; `coords` is the start of the
/// baseline in PDF (bottom-left origin) space
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// An image stretched to fill `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: Id<Image>,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
}

/// A single page of the output document. Contents are drawn in the order they
/// were added, so later contents are painted on top of earlier ones.
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: size.width,
                y2: size.height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: size.width - margins.right,
                y2: size.height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// Add a span of text to the page. Consecutive spans are grouped so the
    /// content stream only switches font and colour when it needs to.
    pub fn add_span(&mut self, span: SpanLayout) {
        match self.contents.last_mut() {
            Some(PageContents::Text(spans)) => spans.push(span),
            _ => self.contents.push(PageContents::Text(vec![span])),
        }
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Every span of text on the page, in drawing order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().flat_map(|c| match c {
            PageContents::Text(spans) => spans.as_slice(),
            PageContents::Image(_) => &[],
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), Error> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or_else(|| Error::InvalidOptions(format!("page {page_index} was never allocated")))?;
        let page_tree_id = refs
            .get(RefType::PageTree)
            .ok_or_else(|| Error::InvalidOptions("page tree was never allocated".into()))?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects.pair(
                    Name(format!("I{}", image_id.index()).as_bytes()),
                    image_ref,
                );
            }
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::StandardFont;
    use crate::pagesize::LETTER;

    #[test]
    fn content_box_sits_inside_the_margins() {
        let page = Page::new(LETTER, Some(Margins::all(Pt(50.0))));
        assert_eq!(page.content_box.x1, Pt(50.0));
        assert_eq!(page.content_box.y1, Pt(50.0));
        assert_eq!(page.content_box.x2, Pt(562.0));
        assert_eq!(page.content_box.y2, Pt(742.0));
        assert_eq!(page.height(), Pt(792.0));
    }

    #[test]
    fn consecutive_spans_share_a_text_block() {
        let mut fonts: Arena<Font> = Arena::new();
        let font = fonts.alloc(Font::standard(StandardFont::Helvetica));
        let mut page = Page::new(LETTER, None);
        let span = |text: &str| SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id: font,
                size: Pt(12.0),
            },
            colour: Colour::default(),
            coords: (Pt(0.0), Pt(0.0)),
        };

        page.add_span(span("one"));
        page.add_span(span("two"));
        assert_eq!(page.contents.len(), 1);
        assert_eq!(page.spans().count(), 2);
    }
}
