use crate::units::Pt;
use serde::{Deserialize, Deserializer, Serialize};

/// Margins bound the area that body text is laid out in. Overlays are
/// positioned absolutely and ignore them. The margins are also applied to
/// [`Page`](crate::Page)s to determine the `ArtBox` of each page in the
/// generated PDF.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create margins where all values are 0.0
    pub fn empty() -> Margins {
        Margins::all(Pt(0.0))
    }

    /// Width left for text between the left and right margins
    pub fn inner_width(&self, page_width: Pt) -> Pt {
        page_width - self.left - self.right
    }

    /// Height left for text between the top and bottom margins
    pub fn inner_height(&self, page_height: Pt) -> Pt {
        page_height - self.top - self.bottom
    }
}

/// Margins are written in configuration either as one number applied to
/// every side or as an object with `top`, `right`, `bottom` and `left`
impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Uniform(Pt),
            Sides {
                top: Pt,
                right: Pt,
                bottom: Pt,
                left: Pt,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Uniform(value) => Margins::all(value),
            Repr::Sides {
                top,
                right,
                bottom,
                left,
            } => Margins::trbl(top, right, bottom, left),
        })
    }
}
