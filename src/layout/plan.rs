use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::units::Pt;

/// A wrapped line assigned to a page, with the PDF-space position of the
/// start of its baseline
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Index of the line in the wrapped line sequence
    pub index: usize,
    pub x: Pt,
    pub baseline: Pt,
}

/// The lines assigned to one output page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlannedPage {
    pub lines: Vec<PlacedLine>,
}

/// Which output page every wrapped line lands on, computed before anything
/// is drawn so that rendering is a single pass over finished pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub pages: Vec<PlannedPage>,
}

impl PagePlan {
    /// Assign `line_count` lines to pages.
    ///
    /// The cursor starts at the top margin and drops by `leading` for every
    /// line; a line whose baseline would fall below the bottom margin starts
    /// a new page instead. A fresh page always takes its first line, even if
    /// that line doesn't fit, so a leading taller than the printable area
    /// still makes progress instead of emitting empty pages.
    ///
    /// With no lines at all the plan holds a single empty page, so overlays
    /// still have somewhere to go.
    pub fn new(line_count: usize, page_size: PageSize, margins: &Margins, leading: Pt) -> PagePlan {
        let top = page_size.height - margins.top;
        let mut pages: Vec<PlannedPage> = Vec::new();
        let mut current = PlannedPage::default();
        let mut cursor = top;

        for index in 0..line_count {
            if cursor - leading < margins.bottom && !current.lines.is_empty() {
                pages.push(std::mem::take(&mut current));
                cursor = top;
            }

            current.lines.push(PlacedLine {
                index,
                x: margins.left,
                baseline: cursor - leading,
            });
            cursor -= leading;
        }
        pages.push(current);

        log::debug!(
            "planned {} lines onto {} page(s)",
            line_count,
            pages.len()
        );
        PagePlan { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
