//! Anchor/lead selection with optional secondary carets.

use crate::status::{Point, Range};

/// The editor's selection.
///
/// The primary range runs from `anchor` to `lead`; the lead is where the
/// caret is drawn. Secondary carets are extra collapsed ranges added for
/// multi-cursor display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    anchor: Point,
    lead: Point,
    carets: Vec<Point>,
}

impl Selection {
    pub const fn new() -> Self {
        Self {
            anchor: Point::new(0, 0),
            lead: Point::new(0, 0),
            carets: Vec::new(),
        }
    }

    pub const fn anchor(&self) -> Point {
        self.anchor
    }

    pub const fn lead(&self) -> Point {
        self.lead
    }

    pub fn carets(&self) -> &[Point] {
        &self.carets
    }

    /// Collapse the selection onto `point`.
    pub const fn move_to(&mut self, point: Point) {
        self.anchor = point;
        self.lead = point;
    }

    /// Move the lead, keeping the anchor.
    pub const fn extend_to(&mut self, point: Point) {
        self.lead = point;
    }

    pub const fn collapse(&mut self) {
        self.anchor = self.lead;
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.lead
    }

    /// Whether the lead sits before the anchor.
    pub fn is_backwards(&self) -> bool {
        self.lead < self.anchor
    }

    /// Bounding range of the primary selection.
    pub fn range(&self) -> Range {
        Range::ordered(self.anchor, self.lead)
    }

    /// Add a secondary caret. Duplicates and the primary lead are ignored.
    /// Returns `true` if a caret was added.
    pub fn add_caret(&mut self, point: Point) -> bool {
        if point == self.lead || self.carets.contains(&point) {
            return false;
        }
        self.carets.push(point);
        true
    }

    pub fn clear_carets(&mut self) -> bool {
        let had = !self.carets.is_empty();
        self.carets.clear();
        had
    }

    /// Number of ranges in multi-range mode; `0` with a single range.
    pub fn range_count(&self) -> usize {
        if self.carets.is_empty() {
            0
        } else {
            self.carets.len() + 1
        }
    }
}
