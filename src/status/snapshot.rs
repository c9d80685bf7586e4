//! Value types describing the editor state the indicator renders.

use std::fmt;

/// A position in the document, as reported by the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// Row (line) index.
    pub row: usize,
    /// Column within the row.
    pub column: usize,
}

impl Point {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A bounding range between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

impl Range {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Build a range from two points in any order.
    pub fn ordered(a: Point, b: Point) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Row extent as a signed string, e.g. `3` or `-1`.
    pub fn row_delta(&self) -> String {
        signed_delta(self.start.row, self.end.row)
    }

    /// Column extent as a signed string. Negative when a multi-row
    /// selection ends left of where it started.
    pub fn column_delta(&self) -> String {
        signed_delta(self.start.column, self.end.column)
    }
}

fn signed_delta(from: usize, to: usize) -> String {
    if to >= from {
        (to - from).to_string()
    } else {
        format!("-{}", from - to)
    }
}

/// Everything the indicator reads from the editor for one render.
///
/// Snapshots are taken fresh on every refresh and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSnapshot {
    /// Hint from the active keybinding handler (e.g. a mode name).
    pub key_binding_status: Option<String>,
    /// Whether a command recording is active.
    pub recording: bool,
    /// Bounding range of the selection; `None` when the selection is empty.
    pub selection: Option<Range>,
    /// Lead point of the selection.
    pub cursor: Point,
    /// Number of selection ranges; `0` outside multi-range mode.
    pub range_count: usize,
}

impl EditorSnapshot {
    /// A snapshot with only a cursor position.
    pub fn at(row: usize, column: usize) -> Self {
        Self {
            cursor: Point::new(row, column),
            ..Self::default()
        }
    }
}
