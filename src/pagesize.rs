//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width ≤ height). Use
//! [`PageSize::landscape`] to turn them sideways. Sizes can also be looked up
//! by name, which is how configuration files refer to them.
//!
//! ```
//! use pdf_annotate::pagesize::{PageSize, A4, LETTER};
//!
//! assert_eq!(PageSize::from_name("Letter"), Some(LETTER));
//! let landscape = A4.landscape();
//! assert!(landscape.width > landscape.height);
//! ```

use crate::units::*;
use serde::{Deserialize, Deserializer, Serialize};

/// Page dimensions in points
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PageSize {
    pub width: Pt,
    pub height: Pt,
}

pub const LETTER: PageSize = PageSize::new(Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = PageSize::new(Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const TABLOID: PageSize = PageSize::new(Pt(11.0 * 72.0), Pt(17.0 * 72.0));
pub const A3: PageSize = PageSize::new(Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = PageSize::new(Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = PageSize::new(Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

const NAMED: &[(&str, PageSize)] = &[
    ("letter", LETTER),
    ("legal", LEGAL),
    ("tabloid", TABLOID),
    ("a3", A3),
    ("a4", A4),
    ("a5", A5),
];

impl Default for PageSize {
    fn default() -> Self {
        LETTER
    }
}

impl PageSize {
    pub const fn new(width: Pt, height: Pt) -> PageSize {
        PageSize { width, height }
    }

    /// Look up a named paper size, ignoring case
    pub fn from_name(name: &str) -> Option<PageSize> {
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|&(_, size)| size)
    }

    /// Returns the size in portrait orientation (width ≤ height)
    pub fn portrait(self) -> PageSize {
        if self.width <= self.height {
            self
        } else {
            PageSize::new(self.height, self.width)
        }
    }

    /// Returns the size in landscape orientation (width ≥ height)
    pub fn landscape(self) -> PageSize {
        if self.width >= self.height {
            self
        } else {
            PageSize::new(self.height, self.width)
        }
    }
}

/// Page sizes are written in configuration either by name (`"a4"`) or as
/// explicit dimensions (`{"width": 612, "height": 792}`)
impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Named(String),
            Dimensions { width: Pt, height: Pt },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Named(name) => PageSize::from_name(&name)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown page size {name:?}"))),
            Repr::Dimensions { width, height } => Ok(PageSize::new(width, height)),
        }
    }
}
