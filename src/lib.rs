//! Reflow document paragraphs into a paginated PDF and stamp fixed-position
//! text and image overlays (checkmarks, signatures, names, dates) on top.
//!
//! The pipeline runs in three steps: [layout::wrap_paragraphs] breaks
//! paragraphs into lines, [layout::PagePlan] assigns lines to pages, and
//! [composite] draws each page's lines followed by the overlays onto a
//! [PageSink]. [render_pdf] runs all three against a [PdfSink].
//!
//! ```
//! use chrono::NaiveDate;
//! use pdf_annotate::{render_pdf, signature_block, OverlayScope, RenderOptions};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
//! // missing images are skipped with a warning, the text overlays still render
//! let overlays = signature_block("Jane Doe", date, "checkmark.png", "signature.png");
//! let options = RenderOptions::default().with_overlay_scope(OverlayScope::LastPage);
//!
//! let pdf = render_pdf(&["Hello, world!"], &overlays, &options).expect("renders");
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

mod colour;
pub use colour::*;

mod compose;
pub use compose::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Paragraph wrapping and page planning
pub mod layout;

mod options;
pub use options::*;

mod overlay;
pub use overlay::*;

mod page;
pub use page::*;

/// Standard page sizes
pub mod pagesize;

mod pdf_sink;
pub use pdf_sink::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod sink;
pub use sink::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
