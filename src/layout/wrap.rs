use crate::sink::TextMeasure;
use crate::units::Pt;
use crate::Error;

/// Reflows paragraphs into lines no wider than `max_width` when set in `font`
/// at `size`.
///
/// Words are accumulated greedily: each word joins the current line if the
/// line still fits afterwards, otherwise the current line is emitted and the
/// word starts a new one. Every paragraph is followed by one empty separator
/// line, and an empty paragraph becomes a single empty line.
///
/// A word that is wider than `max_width` on its own is emitted as its own,
/// overflowing, line. Words are never split across lines.
///
/// ```
/// use pdf_annotate::{layout::wrap_paragraphs, Error, Pt};
///
/// // every character is 6pt wide
/// let measure = |text: &str, _font: &str, _size: Pt| -> Result<Pt, Error> {
///     Ok(Pt(6.0 * text.chars().count() as f32))
/// };
/// let lines = wrap_paragraphs(&["one two three"], Pt(50.0), "Courier", Pt(10.0), &measure)
///     .expect("measurable");
/// assert_eq!(lines, vec!["one two", "three", ""]);
/// ```
pub fn wrap_paragraphs<P, M>(
    paragraphs: &[P],
    max_width: Pt,
    font: &str,
    size: Pt,
    measure: &M,
) -> Result<Vec<String>, Error>
where
    P: AsRef<str>,
    M: TextMeasure + ?Sized,
{
    let mut lines: Vec<String> = Vec::with_capacity(paragraphs.len() * 2);

    for paragraph in paragraphs.iter().map(AsRef::as_ref) {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if measure.text_width(&candidate, font, size)? <= max_width {
                current = candidate;
            } else {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                log::debug!("word {word:?} starts a new line");
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }

        lines.push(String::new());
    }

    Ok(lines)
}
