use crate::colour::Colour;
use crate::document::Document;
use crate::font::{Font, StandardFont};
use crate::image::Image;
use crate::info::Info;
use crate::layout::Margins;
use crate::page::{ImageLayout, Page, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::sink::{PageSink, TextMeasure};
use crate::units::Pt;
use crate::Error;
use id_arena::Id;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A [PageSink] that draws into a [Document] and hands back PDF bytes.
///
/// Fonts are looked up by name. The standard fonts (`Helvetica`, `Courier`)
/// are always available and are added to the document the first time they
/// are drawn with; anything else has to be registered up front with
/// [PdfSink::register_font].
#[derive(Default)]
pub struct PdfSink {
    document: Document,
    fonts: HashMap<String, Id<Font>>,
    images: HashMap<PathBuf, (Id<Image>, (Pt, Pt))>,
    current: Option<Page>,
}

fn font_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl PdfSink {
    pub fn new() -> PdfSink {
        PdfSink::default()
    }

    /// Write the given metadata into the generated PDF
    pub fn with_info(mut self, info: Info) -> PdfSink {
        self.document.set_info(info);
        self
    }

    /// Make a font available under `name` (case insensitive), replacing any
    /// earlier font registered under the same name
    pub fn register_font<S: AsRef<str>>(&mut self, name: S, font: Font) -> Id<Font> {
        let id = self.document.add_font(font);
        self.fonts.insert(font_key(name.as_ref()), id);
        id
    }

    fn font_id(&mut self, name: &str) -> Result<Id<Font>, Error> {
        let key = font_key(name);
        if let Some(id) = self.fonts.get(&key) {
            return Ok(*id);
        }

        let standard = StandardFont::from_name(name).ok_or_else(|| {
            Error::measurement("", name, 0.0, "font is neither registered nor a standard font")
        })?;
        let id = self.document.add_font(Font::standard(standard));
        self.fonts.insert(key, id);
        Ok(id)
    }

    fn current_page(&mut self) -> Result<&mut Page, Error> {
        self.current
            .as_mut()
            .ok_or_else(|| Error::InvalidOptions("drawing outside of a page".to_string()))
    }

    /// The document drawn so far, closing any page that is still open
    pub fn into_document(mut self) -> Document {
        if let Some(page) = self.current.take() {
            self.document.add_page(page);
        }
        self.document
    }

    /// Render everything drawn so far into a complete PDF
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        let mut bytes: Vec<u8> = Vec::new();
        self.into_document().write(&mut bytes)?;
        Ok(bytes)
    }
}

impl TextMeasure for PdfSink {
    fn text_width(&self, text: &str, font: &str, size: Pt) -> Result<Pt, Error> {
        let width = match self.fonts.get(&font_key(font)) {
            Some(id) => self.document.fonts[*id].width_of_text(text, size),
            None => match StandardFont::from_name(font) {
                Some(standard) => Font::standard(standard).width_of_text(text, size),
                None => Err("font is neither registered nor a standard font".to_string()),
            },
        };
        width.map_err(|reason| Error::measurement(text, font, *size, reason))
    }
}

impl PageSink for PdfSink {
    type Image = Id<Image>;

    fn load_image(&mut self, path: &Path) -> Result<(Id<Image>, (Pt, Pt)), Error> {
        if let Some(loaded) = self.images.get(path) {
            return Ok(*loaded);
        }

        let image = Image::new_from_disk(path)?;
        let size = image.native_size();
        let id = self.document.add_image(image);
        self.images.insert(path.to_path_buf(), (id, size));
        Ok((id, size))
    }

    fn begin_page(&mut self, size: PageSize, margins: &Margins) -> Result<(), Error> {
        if let Some(page) = self.current.take() {
            self.document.add_page(page);
        }
        self.current = Some(Page::new(size, Some(margins.clone())));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        font: &str,
        size: Pt,
        colour: Colour,
        origin: (Pt, Pt),
    ) -> Result<(), Error> {
        // surfaces unmeasurable text before anything lands on the page
        self.text_width(text, font, size)?;
        let id = self.font_id(font)?;
        self.current_page()?.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont { id, size },
            colour,
            coords: origin,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &Id<Image>, position: Rect) -> Result<(), Error> {
        self.current_page()?.add_image(ImageLayout {
            image: *image,
            position,
        });
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), Error> {
        if let Some(page) = self.current.take() {
            self.document.add_page(page);
        }
        Ok(())
    }
}
