//! Listener registry backing [`Notifier`](crate::status::Notifier).

use crate::status::{EditorEvent, Handler, ListenerId};

/// Handlers keyed by event, called in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, EditorEvent, Handler)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, event: EditorEvent, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, event, handler));
        id
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Call every handler registered for `event`. Returns how many ran.
    pub fn emit(&mut self, event: EditorEvent) -> usize {
        let mut count = 0;
        for (_, _, handler) in self.entries.iter_mut().filter(|(_, e, _)| *e == event) {
            handler();
            count += 1;
        }
        tracing::trace!(event = event.name(), listeners = count, "event emitted");
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}
