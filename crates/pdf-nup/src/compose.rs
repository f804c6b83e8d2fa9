//! Grouping source pages into output sheets
//!
//! [`compose`] is lazy: it pulls at most one sheet's worth of pages from
//! its input before yielding that sheet.

use crate::layout::{Placement, Rect, SheetGeometry, place_page};

/// Anything that can report the media box of the page it draws
pub trait PageBounds {
    /// Media box in the page's own coordinate space
    fn media_box(&self) -> Rect;
}

impl PageBounds for Rect {
    fn media_box(&self) -> Rect {
        *self
    }
}

/// A source page together with its computed placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPage<P> {
    pub page: P,
    pub placement: Placement,
}

/// One blank output sheet with the pages drawn onto it, in cell order
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSheet<P> {
    /// 0-based position of this sheet in the output
    pub index: usize,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<PlacedPage<P>>,
}

/// Lazy sequence of composed sheets. See [`compose`].
pub struct Sheets<I> {
    geometry: SheetGeometry,
    pages: I,
    next_index: usize,
}

/// Group `pages` into sheets of `geometry.pages_per_sheet` and place each page
/// into its cell in reading order (left to right, top to bottom).
///
/// The last sheet may hold fewer pages. An empty input yields no sheets.
pub fn compose<I>(geometry: &SheetGeometry, pages: I) -> Sheets<I::IntoIter>
where
    I: IntoIterator,
    I::Item: PageBounds,
{
    Sheets {
        geometry: *geometry,
        pages: pages.into_iter(),
        next_index: 0,
    }
}

impl<I> Iterator for Sheets<I>
where
    I: Iterator,
    I::Item: PageBounds,
{
    type Item = OutputSheet<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let per_sheet = self.geometry.pages_per_sheet;
        let mut placed = Vec::with_capacity(per_sheet);

        for (slot, page) in self.pages.by_ref().take(per_sheet).enumerate() {
            let placement = place_page(&self.geometry, slot, &page.media_box());
            placed.push(PlacedPage { page, placement });
        }

        if placed.is_empty() {
            return None;
        }

        let sheet = OutputSheet {
            index: self.next_index,
            width: self.geometry.sheet_width,
            height: self.geometry.sheet_height,
            pages: placed,
        };
        self.next_index += 1;
        Some(sheet)
    }
}
