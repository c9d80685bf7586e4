//! Formatting of an [`EditorSnapshot`] into the single status line.
//!
//! Segments are emitted in a fixed order. Each segment carries the
//! separator that follows it, so the mode/recording segments are joined
//! with `|` and the position segments with a space.

use super::snapshot::EditorSnapshot;

const DEFAULT_SEPARATOR: &str = "|";
const POSITION_SEPARATOR: &str = " ";
const DEFAULT_RECORDING_LABEL: &str = "REC";

/// When the `[N]` range-count segment is shown.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeCountPolicy {
    /// Only in multi-range mode (count greater than one).
    #[default]
    Multiple,
    /// Whenever the editor reports a non-zero count.
    NonZero,
}

impl RangeCountPolicy {
    pub const fn admits(self, count: usize) -> bool {
        match self {
            Self::Multiple => count > 1,
            Self::NonZero => count != 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Multiple => "multiple",
            Self::NonZero => "non-zero",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "multiple" => Some(Self::Multiple),
            "non-zero" | "nonzero" => Some(Self::NonZero),
            _ => None,
        }
    }
}

/// Knobs for [`format_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Separator after the key-binding and recording segments.
    pub separator: String,
    /// Text shown while a recording is active.
    pub recording_label: String,
    pub range_count: RangeCountPolicy,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            recording_label: DEFAULT_RECORDING_LABEL.to_string(),
            range_count: RangeCountPolicy::default(),
        }
    }
}

/// Ordered segments of one status line.
#[derive(Debug, Default)]
pub struct StatusLine<'a> {
    segments: Vec<(String, &'a str)>,
}

impl<'a> StatusLine<'a> {
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Append `text` followed by `separator`. Empty text is skipped.
    pub fn add(&mut self, text: impl Into<String>, separator: &'a str) {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push((text, separator));
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Join the segments. The separator between two segments is the one
    /// attached to the earlier of them; nothing follows the last one.
    pub fn finish(self) -> String {
        let mut out = String::new();
        let mut pending: Option<&str> = None;
        for (text, separator) in self.segments {
            if let Some(sep) = pending {
                out.push_str(sep);
            }
            out.push_str(&text);
            pending = Some(separator);
        }
        out
    }
}

/// Render a snapshot as the indicator text.
pub fn format_status(snapshot: &EditorSnapshot, options: &FormatOptions) -> String {
    let mut line = StatusLine::new();

    if let Some(status) = snapshot.key_binding_status.as_deref() {
        line.add(status, &options.separator);
    }
    if snapshot.recording {
        line.add(options.recording_label.as_str(), &options.separator);
    }
    if let Some(range) = snapshot.selection.filter(|r| !r.is_empty()) {
        line.add(
            format!("({}:{})", range.row_delta(), range.column_delta()),
            POSITION_SEPARATOR,
        );
    }
    line.add(snapshot.cursor.to_string(), POSITION_SEPARATOR);
    if options.range_count.admits(snapshot.range_count) {
        line.add(format!("[{}]", snapshot.range_count), POSITION_SEPARATOR);
    }

    line.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::snapshot::{Point, Range};

    fn fmt(snapshot: &EditorSnapshot) -> String {
        format_status(snapshot, &FormatOptions::default())
    }

    #[test]
    fn test_no_segments_is_empty_string() {
        assert_eq!(StatusLine::new().finish(), "");
    }

    #[test]
    fn test_cursor_only() {
        assert_eq!(fmt(&EditorSnapshot::at(0, 0)), "0:0");
    }

    #[test]
    fn test_selection_extent_segment() {
        let snap = EditorSnapshot {
            selection: Some(Range::new(Point::new(2, 3), Point::new(5, 10))),
            cursor: Point::new(5, 10),
            ..EditorSnapshot::default()
        };
        let text = fmt(&snap);
        assert!(text.contains("(3:7)"), "got {text:?}");
        assert_eq!(text, "(3:7) 5:10");
    }

    #[test]
    fn test_empty_selection_ends_with_cursor() {
        let snap = EditorSnapshot::at(4, 9);
        let text = fmt(&snap);
        assert!(text.ends_with("4:9"));
        assert!(!text.contains('('));
    }

    #[test]
    fn test_degenerate_selection_range_is_not_shown() {
        let p = Point::new(1, 1);
        let snap = EditorSnapshot {
            selection: Some(Range::new(p, p)),
            cursor: p,
            ..EditorSnapshot::default()
        };
        assert_eq!(fmt(&snap), "1:1");
    }

    #[test]
    fn test_mode_and_recording() {
        let snap = EditorSnapshot {
            key_binding_status: Some("INSERT".to_string()),
            recording: true,
            ..EditorSnapshot::default()
        };
        assert_eq!(fmt(&snap), "INSERT|REC|0:0");
    }

    #[test]
    fn test_selection_with_range_count() {
        let snap = EditorSnapshot {
            selection: Some(Range::new(Point::new(0, 0), Point::new(0, 5))),
            cursor: Point::new(0, 5),
            range_count: 2,
            ..EditorSnapshot::default()
        };
        assert_eq!(fmt(&snap), "(0:5) 0:5 [2]");
    }

    #[test]
    fn test_empty_key_binding_status_is_skipped() {
        let snap = EditorSnapshot {
            key_binding_status: Some(String::new()),
            recording: true,
            ..EditorSnapshot::default()
        };
        assert_eq!(fmt(&snap), "REC|0:0");
    }

    #[test]
    fn test_range_count_policies() {
        let single = EditorSnapshot {
            range_count: 1,
            ..EditorSnapshot::at(3, 1)
        };
        assert_eq!(fmt(&single), "3:1");

        let non_zero = FormatOptions {
            range_count: RangeCountPolicy::NonZero,
            ..FormatOptions::default()
        };
        assert_eq!(format_status(&single, &non_zero), "3:1 [1]");
        assert_eq!(format_status(&EditorSnapshot::at(3, 1), &non_zero), "3:1");
    }

    #[test]
    fn test_custom_separator_and_label() {
        let options = FormatOptions {
            separator: " | ".to_string(),
            recording_label: "MACRO".to_string(),
            ..FormatOptions::default()
        };
        let snap = EditorSnapshot {
            key_binding_status: Some("VISUAL".to_string()),
            recording: true,
            ..EditorSnapshot::at(7, 2)
        };
        assert_eq!(format_status(&snap, &options), "VISUAL | MACRO | 7:2");
    }

    #[test]
    fn test_range_count_policy_parse() {
        assert_eq!(RangeCountPolicy::parse("multiple"), Some(RangeCountPolicy::Multiple));
        assert_eq!(RangeCountPolicy::parse("non-zero"), Some(RangeCountPolicy::NonZero));
        assert_eq!(RangeCountPolicy::parse("sometimes"), None);
        for policy in [RangeCountPolicy::Multiple, RangeCountPolicy::NonZero] {
            assert_eq!(RangeCountPolicy::parse(policy.as_str()), Some(policy));
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_point() -> impl Strategy<Value = Point> {
            (0..500usize, 0..200usize).prop_map(|(row, column)| Point::new(row, column))
        }

        fn arb_snapshot() -> impl Strategy<Value = EditorSnapshot> {
            (
                proptest::option::of("[A-Z]{0,8}"),
                any::<bool>(),
                proptest::option::of((arb_point(), arb_point())),
                arb_point(),
                0..6usize,
            )
                .prop_map(|(status, recording, sel, cursor, range_count)| EditorSnapshot {
                    key_binding_status: status,
                    recording,
                    selection: sel.map(|(a, b)| Range::ordered(a, b)),
                    cursor,
                    range_count,
                })
        }

        proptest! {
            #[test]
            fn output_never_has_dangling_separators(snap in arb_snapshot()) {
                let text = fmt(&snap);
                prop_assert!(!text.starts_with('|'));
                prop_assert!(!text.ends_with('|'));
                prop_assert!(!text.starts_with(' '));
                prop_assert!(!text.ends_with(' '));
            }

            #[test]
            fn output_always_contains_cursor(snap in arb_snapshot()) {
                let text = fmt(&snap);
                let cursor = snap.cursor.to_string();
                prop_assert!(text.contains(&cursor));
            }

            #[test]
            fn formatting_is_pure(snap in arb_snapshot()) {
                prop_assert_eq!(fmt(&snap), fmt(&snap.clone()));
            }
        }
    }
}
