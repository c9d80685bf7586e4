//! The narrow interfaces the indicator needs from an editor.

use super::snapshot::{EditorSnapshot, Point, Range};

/// Notification channels the indicator listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorEvent {
    /// Key-binding status or recording state changed.
    ChangeStatus,
    /// Selection or cursor moved.
    ChangeSelection,
    /// Any keyboard input reached the editor.
    KeyboardActivity,
}

impl EditorEvent {
    pub const ALL: [Self; 3] = [
        Self::ChangeStatus,
        Self::ChangeSelection,
        Self::KeyboardActivity,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::ChangeStatus => "changeStatus",
            Self::ChangeSelection => "changeSelection",
            Self::KeyboardActivity => "keyboardActivity",
        }
    }
}

/// Identifies a registered listener so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Listener callback. Takes no arguments; listeners re-read editor state.
pub type Handler = Box<dyn FnMut()>;

/// Subscription side of an editor.
pub trait Notifier {
    fn on(&mut self, event: EditorEvent, handler: Handler) -> ListenerId;

    /// Remove a listener. Returns `false` for unknown ids.
    fn off(&mut self, id: ListenerId) -> bool;
}

/// Read-only state queries.
pub trait StatusSource {
    /// Status hint from the key-binding handler.
    fn key_binding_status(&self) -> Option<String>;

    fn is_recording(&self) -> bool;

    fn selection_is_empty(&self) -> bool;

    /// Lead point of the selection.
    fn lead(&self) -> Point;

    fn range_count(&self) -> usize;

    /// Bounding range of the current selection.
    fn selection_range(&self) -> Range;

    fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            key_binding_status: self.key_binding_status(),
            recording: self.is_recording(),
            selection: (!self.selection_is_empty()).then(|| self.selection_range()),
            cursor: self.lead(),
            range_count: self.range_count(),
        }
    }
}
