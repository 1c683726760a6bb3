//! Text layout: reflowing paragraphs into lines and lines into pages.
//!
//! Layout is pure data. [`wrap_paragraphs`] turns paragraphs into lines using
//! any [`TextMeasure`](crate::TextMeasure), and [`PagePlan`] assigns those lines
//! to pages with their baseline positions. Nothing is drawn until the
//! [compositor](crate::composite) walks the finished plan.
//!
//! # Example
//!
//! ```
//! use pdf_annotate::layout::{wrap_paragraphs, Margins, PagePlan};
//! use pdf_annotate::{pagesize, PdfSink, Pt};
//!
//! let sink = PdfSink::new();
//! let lines = wrap_paragraphs(
//!     &["Hello, world!", "", "A second paragraph."],
//!     Pt(512.0),
//!     "Helvetica",
//!     Pt(12.0),
//!     &sink,
//! )
//! .expect("Helvetica is always measurable");
//!
//! let plan = PagePlan::new(lines.len(), pagesize::LETTER, &Margins::all(Pt(50.0)), Pt(14.4));
//! assert_eq!(plan.page_count(), 1);
//! ```

mod margins;
mod plan;
mod wrap;

pub use margins::*;
pub use plan::*;
pub use wrap::*;
