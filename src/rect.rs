use crate::units::*;

/// A rectangle in PDF space, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    /// Convert a box given in top-left origin coordinates (y growing downward,
    /// as on screens) into PDF's bottom-left origin space.
    ///
    /// The box's top edge sits `y` below the top of the page, so its bottom
    /// edge lands at `page_height - y - height`.
    pub fn from_top_left(x: Pt, y: Pt, width: Pt, height: Pt, page_height: Pt) -> Rect {
        let y1 = flip_y(y, height, page_height);
        Rect {
            x1: x,
            y1,
            x2: x + width,
            y2: y1 + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

/// Map the top of an element of the given height from top-left origin
/// coordinates to the bottom-left origin y of that element.
pub fn flip_y(y_top: Pt, height: Pt, page_height: Pt) -> Pt {
    page_height - y_top - height
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_top_left_coordinates() {
        assert_eq!(flip_y(Pt(100.0), Pt(20.0), Pt(800.0)), Pt(680.0));
    }

    #[test]
    fn builds_rect_from_top_left_box() {
        let rect = Rect::from_top_left(Pt(200.0), Pt(250.0), Pt(150.0), Pt(60.0), Pt(792.0));
        assert_eq!(rect.x1, Pt(200.0));
        assert_eq!(rect.y1, Pt(482.0));
        assert_eq!(rect.x2, Pt(350.0));
        assert_eq!(rect.y2, Pt(542.0));
        assert_eq!(rect.width(), Pt(150.0));
        assert_eq!(rect.height(), Pt(60.0));
    }
}
