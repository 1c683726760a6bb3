use crate::{
    refs::{ObjectReferences, RefType},
    Error, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

/// Advance widths (in 1/1000 em) of Helvetica for WinAnsi codes 0x20 through
/// 0xFF. Codes WinAnsi leaves undefined are zero and never emitted.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    // 0x20
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    // 0x80
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// The WinAnsi (Windows-1252) code for `ch`, or `?` when WinAnsi has no slot
/// for it
fn winansi(ch: char) -> u8 {
    match ch {
        ' '..='~' | '\u{A0}'..='\u{FF}' => ch as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => b'?',
    }
}

/// One of the PDF standard Type 1 fonts. These are never embedded: every
/// conforming viewer ships them, so only their metrics live in this crate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StandardFont {
    /// The standard sans-serif face
    Helvetica,
    /// The standard monospaced face
    Courier,
}

impl StandardFont {
    /// Look up a standard font by its PostScript name, ignoring case
    pub fn from_name(name: &str) -> Option<StandardFont> {
        match name.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Some(StandardFont::Helvetica),
            "courier" => Some(StandardFont::Courier),
            _ => None,
        }
    }

    pub fn postscript_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::Courier => "Courier",
        }
    }

    fn advance(&self, ch: char) -> u16 {
        match self {
            StandardFont::Courier => 600,
            StandardFont::Helvetica => HELVETICA_WIDTHS[winansi(ch) as usize - 0x20],
        }
    }
}

enum FontKind {
    Standard(StandardFont),
    TrueType(OwnedFace),
}

/// A font that text can be measured and drawn with.
///
/// Standard fonts are referenced by name only. TrueType / OpenType fonts are
/// parsed and will be embedded in their entirety in the generated PDF, so
/// large fonts may dramatically increase the size of the output.
///
/// Fonts are stored "globally" within a [crate::Document] and referred to by
/// their id.
pub struct Font {
    kind: FontKind,
}

impl Font {
    pub fn standard(font: StandardFont) -> Font {
        Font {
            kind: FontKind::Standard(font),
        }
    }

    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, Error> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font {
            kind: FontKind::TrueType(face),
        })
    }

    /// Read and parse a TrueType / OpenType font file
    pub fn load_from_disk<P: AsRef<Path>>(path: P) -> Result<Font, Error> {
        Self::load(std::fs::read(path)?)
    }

    /// Obtain the full name of the font, if it declares one
    pub fn name(&self) -> Option<String> {
        match &self.kind {
            FontKind::Standard(font) => Some(font.postscript_name().to_string()),
            FontKind::TrueType(face) => face
                .as_face_ref()
                .names()
                .into_iter()
                .find(|name| {
                    name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode()
                })
                .and_then(|name| name.to_string()),
        }
    }

    /// The glyph used to draw `ch`, falling back to the replacement character and
    /// then to `?` when the face doesn't cover it
    fn glyph(face: &Face<'_>, ch: char) -> Option<GlyphId> {
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
    }

    /// Calculate the width of a string of text at the given font size.
    ///
    /// Fails (with a human readable reason) when the size is unusable or when
    /// the face has no glyph for a character and no replacement glyph either.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Result<Pt, String> {
        if !size.is_positive() {
            return Err(format!("font size {size} is not a positive length"));
        }

        match &self.kind {
            FontKind::Standard(font) => {
                let units: u32 = text.chars().map(|ch| font.advance(ch) as u32).sum();
                Ok(size * (units as f32 / 1000.0))
            }
            FontKind::TrueType(face) => {
                let face = face.as_face_ref();
                let scaling = 1.0 / face.units_per_em() as f32;
                let mut units: u32 = 0;
                for ch in text.chars() {
                    let gid = Self::glyph(face, ch)
                        .ok_or_else(|| format!("no glyph for {ch:?} and no replacement glyph"))?;
                    units += face.glyph_hor_advance(gid).unwrap_or_default() as u32;
                }
                Ok(size * (units as f32 * scaling))
            }
        }
    }

    /// Encode text as a hex string suitable for a `Tj` operator with this font
    pub(crate) fn encode_hex(&self, text: &str) -> String {
        let mut hex = String::with_capacity(text.len() * 4);
        match &self.kind {
            FontKind::Standard(_) => {
                for ch in text.chars() {
                    let _ = write!(hex, "{:02x}", winansi(ch));
                }
            }
            FontKind::TrueType(face) => {
                let face = face.as_face_ref();
                for ch in text.chars() {
                    // width_of_text has already rejected text with unmappable characters
                    let gid = Self::glyph(face, ch).map(|g| g.0).unwrap_or_default();
                    let _ = write!(hex, "{gid:04x}");
                }
            }
        }
        hex
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));

        match &self.kind {
            FontKind::Standard(font) => {
                writer
                    .type1_font(font_id)
                    .base_font(Name(font.postscript_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            FontKind::TrueType(owned) => {
                let face = owned.as_face_ref();
                let glyphs = glyph_map(face);
                let cid_font_id =
                    write_cid(face, owned.as_slice(), &glyphs, refs, font_index, writer);
                let to_unicode_id = write_to_unicode(&glyphs, refs, font_index, writer);

                let mut font = writer.type0_font(font_id);
                font.base_font(Name(format!("F{font_index}").as_bytes()));
                font.encoding_predefined(Name(b"Identity-H"));
                font.descendant_font(cid_font_id);
                font.to_unicode(to_unicode_id);
            }
        }
    }
}

/// Every glyph reachable through a unicode cmap subtable, with the first
/// character that maps to it
fn glyph_map(face: &Face<'_>) -> BTreeMap<u16, char> {
    let mut map: BTreeMap<u16, char> = BTreeMap::new();
    let Some(cmap) = face.tables().cmap else {
        return map;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint: u32| {
            if let Ok(ch) = char::try_from(codepoint) {
                if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0) {
                    map.entry(index.0).or_insert(ch);
                }
            }
        });
    }

    map
}

fn write_cid(
    face: &Face<'_>,
    data: &[u8],
    glyphs: &BTreeMap<u16, char>,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let descriptor_id = write_descriptor(face, data, refs, font_index, writer);
    let id = refs.gen(RefType::CidFont(font_index));
    let scaling = 1000.0 / face.units_per_em() as f32;

    let mut cid_font = writer.cid_font(id);
    cid_font.subtype(CidFontType::Type2);
    cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
    cid_font.system_info(SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    });
    cid_font.font_descriptor(descriptor_id);
    cid_font.default_width(1000.0);

    // emit widths as runs of consecutive glyph ids
    let mut widths = cid_font.widths();
    let mut run: Option<(u16, Vec<f32>)> = None;
    for &gid in glyphs.keys() {
        let width = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling;
        run = match run.take() {
            Some((start, mut run_widths)) if start as usize + run_widths.len() == gid as usize => {
                run_widths.push(width);
                Some((start, run_widths))
            }
            Some((start, run_widths)) => {
                widths.consecutive(start, run_widths);
                Some((gid, vec![width]))
            }
            None => Some((gid, vec![width])),
        };
    }
    if let Some((start, run_widths)) = run {
        widths.consecutive(start, run_widths);
    }
    widths.finish();

    cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
    id
}

fn write_descriptor(
    face: &Face<'_>,
    data: &[u8],
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let data_id = refs.gen(RefType::FontData(font_index));
    writer
        .stream(data_id, data)
        .pair(Name(b"Length1"), data.len() as i32);

    let id = refs.gen(RefType::FontDescriptor(font_index));
    let scaling = 1000.0 / face.units_per_em() as f32;
    let bbox = face.global_bounding_box();

    let mut flags = FontFlags::SYMBOLIC;
    if face.is_monospaced() {
        flags.insert(FontFlags::FIXED_PITCH);
    }
    if face.is_italic() {
        flags.insert(FontFlags::ITALIC);
    }

    let mut descriptor = writer.font_descriptor(id);
    descriptor.name(Name(format!("F{font_index}").as_bytes()));
    descriptor.flags(flags);
    descriptor.bbox(pdf_writer::Rect {
        x1: bbox.x_min as f32 * scaling,
        y1: bbox.y_min as f32 * scaling,
        x2: bbox.x_max as f32 * scaling,
        y2: bbox.y_max as f32 * scaling,
    });
    descriptor.italic_angle(0.0);
    descriptor.ascent(face.ascender() as f32 * scaling);
    descriptor.descent(face.descender() as f32 * scaling);
    descriptor.cap_height(
        face.capital_height()
            .map(|h| h as f32 * scaling)
            .unwrap_or(face.ascender() as f32 * scaling),
    );
    // not exposed by the font tables; the conventional value for regular weights
    descriptor.stem_v(80.0);
    descriptor.font_file2(data_id);
    descriptor.finish();

    id
}

/// The ToUnicode CMap for an embedded font, mapping glyph ids back to text
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    // bfchar blocks hold at most 100 entries
    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for block in entries.chunks(100) {
        let _ = writeln!(map, "{} beginbfchar", block.len());
        for (gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let units: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            let _ = writeln!(map, "<{gid:04x}> <{units}>");
        }
        map.push_str("endbfchar\n");
    }
    map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
    map
}

fn write_to_unicode(
    glyphs: &BTreeMap<u16, char>,
    refs: &mut ObjectReferences,
    font_index: usize,
    writer: &mut Pdf,
) -> Ref {
    let id = refs.gen(RefType::ToUnicode(font_index));
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
        to_unicode_cmap(glyphs).as_bytes(),
        miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
    );
    writer
        .stream(id, compressed.as_slice())
        .filter(Filter::FlateDecode);

    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_standard_fonts_by_name() {
        assert_eq!(StandardFont::from_name("helvetica"), Some(StandardFont::Helvetica));
        assert_eq!(StandardFont::from_name(" Courier "), Some(StandardFont::Courier));
        assert_eq!(StandardFont::from_name("Comic Sans"), None);
    }

    #[test]
    fn measures_helvetica_with_afm_widths() {
        let font = Font::standard(StandardFont::Helvetica);
        // H = 722, i = 222
        let width = font.width_of_text("Hi", Pt(10.0)).expect("measurable");
        assert!((*width - 9.44).abs() < 0.0001);
    }

    #[test]
    fn courier_is_monospaced() {
        let font = Font::standard(StandardFont::Courier);
        let width = font.width_of_text("iiWW", Pt(12.0)).expect("measurable");
        assert!((*width - 28.8).abs() < 0.0001);
    }

    #[test]
    fn encodes_standard_fonts_as_winansi() {
        let font = Font::standard(StandardFont::Helvetica);
        assert_eq!(font.encode_hex("don\u{2019}t Jos\u{e9}"), "646f6e9274204a6f73e9");
        assert_eq!(font.encode_hex("\u{201c}\u{2013}\u{2014}\u{2026}\u{20ac}"), "9396978580");
    }

    #[test]
    fn measures_winansi_characters_with_their_own_widths() {
        let font = Font::standard(StandardFont::Helvetica);
        // e-acute = 556, right single quote = 222, em dash = 1000
        let width = font
            .width_of_text("\u{e9}\u{2019}\u{2014}", Pt(10.0))
            .expect("measurable");
        assert!((*width - 17.78).abs() < 0.0001);
    }

    #[test]
    fn characters_outside_winansi_become_question_marks() {
        let font = Font::standard(StandardFont::Helvetica);
        let arrow = font.width_of_text("\u{2192}", Pt(12.0)).expect("measurable");
        let question = font.width_of_text("?", Pt(12.0)).expect("measurable");
        assert_eq!(arrow, question);
        assert_eq!(font.encode_hex("A\u{2192}\u{142}"), "413f3f");
    }

    const DEJAVU_MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

    fn embedded() -> Font {
        Font::load(DEJAVU_MONO.to_vec()).expect("can load font")
    }

    fn glyph_of(font: &Font, ch: char) -> u16 {
        match &font.kind {
            FontKind::TrueType(face) => face
                .as_face_ref()
                .glyph_index(ch)
                .map(|g| g.0)
                .expect("glyph is covered"),
            FontKind::Standard(_) => panic!("expected an embedded font"),
        }
    }

    #[test]
    fn embedded_fonts_report_their_name() {
        let name = embedded().name().expect("font has a full name");
        assert_eq!(name, "DejaVu Sans Mono");
    }

    #[test]
    fn embedded_fonts_encode_glyph_ids() {
        let font = embedded();
        let expected = format!(
            "{:04x}{:04x}{:04x}",
            glyph_of(&font, 'A'),
            glyph_of(&font, '\u{e9}'),
            glyph_of(&font, '\u{2019}')
        );
        assert_eq!(font.encode_hex("A\u{e9}\u{2019}"), expected);
    }

    #[test]
    fn embedded_monospace_widths_come_from_the_face() {
        let font = embedded();
        let narrow = font.width_of_text("iiii", Pt(10.0)).expect("measurable");
        let wide = font.width_of_text("WWWW", Pt(10.0)).expect("measurable");
        assert_eq!(narrow, wide);
        // roughly 0.6em per character
        assert!(*narrow > 23.0 && *narrow < 25.0);
    }

    #[test]
    fn to_unicode_cmap_is_split_into_blocks_of_at_most_100() {
        let font = embedded();
        let FontKind::TrueType(face) = &font.kind else {
            panic!("expected an embedded font");
        };
        let glyphs = glyph_map(face.as_face_ref());
        assert!(glyphs.len() > 100);

        let cmap = to_unicode_cmap(&glyphs);
        let blocks: Vec<usize> = cmap
            .lines()
            .filter_map(|line| line.strip_suffix(" beginbfchar"))
            .map(|count| count.parse().expect("numeric count"))
            .collect();
        assert!(blocks.len() > 1);
        assert!(blocks.iter().all(|&n| n > 0 && n <= 100));
        assert_eq!(blocks.iter().sum::<usize>(), glyphs.len());
        assert_eq!(
            cmap.matches("beginbfchar").count(),
            cmap.matches("endbfchar").count()
        );
        assert!(cmap.contains(&format!("<{:04x}> <0041>", glyph_of(&font, 'A'))));
    }

    #[test]
    fn rejects_unusable_sizes() {
        let font = Font::standard(StandardFont::Helvetica);
        assert!(font.width_of_text("x", Pt(0.0)).is_err());
        assert!(font.width_of_text("x", Pt(f32::INFINITY)).is_err());
    }

    #[test]
    fn rejects_garbage_font_data() {
        assert!(matches!(
            Font::load(vec![0, 1, 2, 3]),
            Err(Error::FaceParsing(_))
        ));
    }
}
