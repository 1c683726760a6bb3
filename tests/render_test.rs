//! End-to-end rendering through the PDF backend.

use chrono::NaiveDate;
use pdf_annotate::layout::Margins;
use pdf_annotate::pagesize::PageSize;
use pdf_annotate::{
    render_pdf, render_with, signature_block, Error, Font, Info, Overlay, OverlayScope, PdfSink,
    Pt, RenderOptions,
};
use std::path::{Path, PathBuf};

fn hex(text: &str) -> String {
    text.bytes().map(|b| format!("{b:02x}")).collect()
}

fn contains(pdf: &[u8], needle: &str) -> bool {
    pdf.windows(needle.len()).any(|w| w == needle.as_bytes())
}

fn occurrences(pdf: &[u8], needle: &str) -> usize {
    pdf.windows(needle.len())
        .filter(|w| *w == needle.as_bytes())
        .count()
}

fn page_count(pdf: &[u8]) -> usize {
    occurrences(pdf, "/Type /Page") - occurrences(pdf, "/Type /Pages")
}

fn tall_page() -> RenderOptions {
    RenderOptions::new().with_page_size(PageSize::new(Pt(600.0), Pt(800.0)))
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(8, 4, image::Rgba([0, 0, 0, 255]))
        .save(&path)
        .expect("can write png");
    path
}

#[test]
fn test_hello_world() {
    let pdf = render_pdf(&["Hello, world!"], &[], &RenderOptions::default()).expect("renders");

    assert!(pdf.starts_with(b"%PDF-"));
    assert_eq!(page_count(&pdf), 1);
    assert!(contains(&pdf, "/BaseFont /Helvetica"));
    assert!(contains(&pdf, &format!("<{}> Tj", hex("Hello, world!"))));
}

#[test]
fn test_long_paragraph_stays_on_one_page() {
    let paragraph = lipsum::lipsum_words(200);
    let mut sink = PdfSink::new();
    let pages = render_with(&[paragraph.as_str()], &[], &RenderOptions::default(), &mut sink)
        .expect("renders");

    assert_eq!(pages.len(), 1);
    assert!(pages[0].lines > 10);
    let drawn = sink
        .into_document()
        .ordered_pages()
        .flat_map(|p| p.spans())
        .map(|s| s.text.clone())
        .collect::<Vec<String>>()
        .join(" ");
    assert_eq!(
        drawn.split_whitespace().count(),
        paragraph.split_whitespace().count()
    );
}

#[test]
fn test_many_paragraphs_span_pages() {
    let paragraphs: Vec<String> = (0..200).map(|i| format!("Paragraph number {i}.")).collect();
    let overlays = vec![Overlay::text("Initials: JD", Pt(500.0), Pt(760.0))];
    let pdf = render_pdf(&paragraphs, &overlays, &RenderOptions::default()).expect("renders");

    // 400 lines at 48 lines per letter page
    assert_eq!(page_count(&pdf), 9);
    assert_eq!(occurrences(&pdf, &hex("Initials: JD")), 9);
}

#[test]
fn test_empty_input_renders_overlay_only_page() {
    let paragraphs: [&str; 0] = [];
    let overlays = vec![Overlay::text("Jane Doe", Pt(200.0), Pt(200.0)).with_size(Pt(14.0))];
    let pdf = render_pdf(&paragraphs, &overlays, &tall_page()).expect("renders");

    assert_eq!(page_count(&pdf), 1);
    assert!(contains(&pdf, "200 586 Td"));
    assert!(contains(&pdf, &hex("Jane Doe")));
}

#[test]
fn test_image_overlays_are_placed_from_the_top() {
    let dir = tempfile::tempdir().expect("temp dir");
    let png = write_png(dir.path(), "stamp.png");
    let overlays = vec![
        Overlay::image(&png, Pt(200.0), Pt(100.0)).with_dimensions(Pt(150.0), Pt(20.0)),
        Overlay::image(&png, Pt(10.0), Pt(10.0)),
    ];
    let pdf = render_pdf(&["Body"], &overlays, &tall_page()).expect("renders");

    assert!(contains(&pdf, "150 0 0 20 200 680 cm"));
    // native size, one point per pixel
    assert!(contains(&pdf, "8 0 0 4 10 786 cm"));
    // the same file is embedded once, with a single alpha mask
    assert_eq!(occurrences(&pdf, "/SMask"), 1);
}

#[test]
fn test_missing_images_are_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let checkmark = write_png(dir.path(), "checkmark.png");
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let overlays = signature_block(
        "Jane Doe",
        date,
        &checkmark,
        dir.path().join("no-signature.png"),
    );

    let mut sink = PdfSink::new();
    let pages = render_with(&["Signed below."], &overlays, &tall_page(), &mut sink)
        .expect("a missing image is not fatal");
    assert_eq!(pages[0].overlays_drawn, 3);
    assert_eq!(pages[0].overlays_skipped, 1);

    let pdf = sink.finish().expect("writes");
    assert_eq!(occurrences(&pdf, "/I0 Do"), 1);
    assert!(contains(&pdf, &hex("Jane Doe")));
    assert!(contains(&pdf, &hex("Date: 2024-03-01")));
}

#[test]
fn test_overlay_scope_last_page() {
    let paragraphs: Vec<String> = (0..60).map(|i| format!("Clause {i}.")).collect();
    let overlays = vec![Overlay::text("SIGNED", Pt(50.0), Pt(50.0))];
    let options = RenderOptions::default().with_overlay_scope(OverlayScope::LastPage);

    let mut sink = PdfSink::new();
    let pages = render_with(&paragraphs, &overlays, &options, &mut sink).expect("renders");
    let drawn: Vec<usize> = pages.iter().map(|p| p.overlays_drawn).collect();
    assert_eq!(drawn, vec![0, 0, 1]);

    let document = sink.into_document();
    let last = document.ordered_pages().last().expect("has pages");
    assert!(last.spans().any(|s| s.text == "SIGNED"));
}

#[test]
fn test_unknown_body_font_is_fatal() {
    let options = RenderOptions::default().with_font("Papyrus", Pt(12.0));
    let result = render_pdf(&["Hello"], &[], &options);
    assert!(matches!(
        result,
        Err(Error::MeasurementFailure { ref font, .. }) if font == "Papyrus"
    ));
}

#[test]
fn test_unknown_overlay_font_is_fatal() {
    let paragraphs: [&str; 0] = [];
    let overlays = vec![Overlay::text("Jane", Pt(0.0), Pt(0.0)).with_font("Papyrus")];
    let result = render_pdf(&paragraphs, &overlays, &RenderOptions::default());
    assert!(matches!(result, Err(Error::MeasurementFailure { .. })));
}

#[test]
fn test_output_is_deterministic() {
    let dir = tempfile::tempdir().expect("temp dir");
    let png = write_png(dir.path(), "checkmark.png");
    let overlays = vec![
        Overlay::image(&png, Pt(100.0), Pt(100.0)).with_dimensions(Pt(20.0), Pt(20.0)),
        Overlay::text("Jane Doe", Pt(200.0), Pt(200.0)),
    ];
    let paragraphs = [lipsum::lipsum_words(300), String::new(), "The end.".to_string()];
    let options = RenderOptions::default().with_info(Info::new().title("Contract").clone());

    let first = render_pdf(&paragraphs, &overlays, &options).expect("renders");
    let second = render_pdf(&paragraphs, &overlays, &options).expect("renders");
    assert_eq!(first, second);
    assert!(contains(&first, "/Title (Contract)"));
    assert!(!contains(&first, "/CreationDate"));
}

#[test]
fn test_options_and_overlays_from_json() {
    let options = RenderOptions::from_json(
        r#"{"page_size": {"width": 600, "height": 800}, "margin": 40, "font_name": "Courier"}"#,
    )
    .expect("valid options");
    let overlays = pdf_annotate::overlays_from_json(
        r#"[{"type": "text", "text": "Approved", "x": 20, "y": 30, "size": 10}]"#,
    )
    .expect("valid overlays");

    let pdf = render_pdf(&["Hello"], &overlays, &options).expect("renders");
    assert!(contains(&pdf, "/BaseFont /Courier"));
    assert!(contains(&pdf, "20 760 Td"));
}

#[test]
fn test_standard_fonts_keep_winansi_characters() {
    let paragraph = "don\u{2019}t Jos\u{e9} \u{2013} \u{201c}ok\u{201d}";
    let pdf = render_pdf(&[paragraph], &[], &RenderOptions::default()).expect("renders");
    assert!(contains(&pdf, "/Encoding /WinAnsiEncoding"));
    assert!(contains(&pdf, "<646f6e9274204a6f73e9209620936f6b94> Tj"));
}

const DEJAVU_MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

#[test]
fn test_embedded_font_renders_glyph_ids() {
    let text = "H\u{e9}llo w\u{f6}rld \u{2019}";
    let mut sink = PdfSink::new();
    sink.register_font(
        "Body",
        Font::load(DEJAVU_MONO.to_vec()).expect("can load font"),
    );
    let options = RenderOptions::default().with_font("body", Pt(11.0));
    let pages = render_with(&[text], &[], &options, &mut sink).expect("renders");
    assert_eq!(pages.len(), 1);
    let pdf = sink.finish().expect("writes");

    assert!(contains(&pdf, "/Subtype /Type0"));
    assert!(contains(&pdf, "/Encoding /Identity-H"));
    assert!(contains(&pdf, "/FontFile2"));
    assert!(contains(&pdf, "/ToUnicode"));
    assert!(contains(&pdf, "/W ["));
    assert!(!contains(&pdf, "/BaseFont /Helvetica"));

    let face = owned_ttf_parser::Face::parse(DEJAVU_MONO, 0).expect("parses");
    let glyphs: String = text
        .chars()
        .map(|ch| format!("{:04x}", face.glyph_index(ch).expect("covered").0))
        .collect();
    assert_eq!(glyphs.len(), 4 * text.chars().count());
    assert!(contains(&pdf, &format!("<{glyphs}> Tj")));
}

#[test]
fn test_margins_set_the_art_box() {
    let options = RenderOptions::default().with_margins(Margins::all(Pt(72.0)));
    let pdf = render_pdf(&["Boxed in."], &[], &options).expect("renders");
    assert!(contains(&pdf, "/MediaBox [0 0 612 792]"));
    assert!(contains(&pdf, "/ArtBox [72 72 540 720]"));
}
