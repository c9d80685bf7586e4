//! The status indicator widget.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::ui::element::{Display, Element};

use super::debounce::DelayedCall;
use super::format::{FormatOptions, format_status};
use super::source::{EditorEvent, ListenerId, Notifier, StatusSource};
use super::timer::Timers;

/// Quiet period before a burst of notifications is rendered.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Class name given to the indicator element.
pub const INDICATOR_CLASS: &str = "status-indicator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorOptions {
    pub delay: Duration,
    pub format: FormatOptions,
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            format: FormatOptions::default(),
        }
    }
}

/// Mirrors caret, selection, recording and key-binding state of an editor
/// into a single line of text.
///
/// The indicator never touches the editor beyond subscribing to it. Three
/// channels feed one debounced refresh; the refresh takes a fresh
/// [`EditorSnapshot`](super::snapshot::EditorSnapshot) and replaces the
/// element's text.
pub struct StatusIndicator<E: Notifier + StatusSource + 'static> {
    /// The element holding the rendered text, for styling by the embedder.
    pub element: Element,
    editor: Weak<RefCell<E>>,
    refresh: DelayedCall,
    listeners: Vec<ListenerId>,
    disposed: Rc<Cell<bool>>,
}

impl<E: Notifier + StatusSource + 'static> StatusIndicator<E> {
    /// Attach a new indicator to `parent` with default options.
    pub fn new(editor: &Rc<RefCell<E>>, parent: &Element, timers: &Timers) -> Self {
        Self::with_options(editor, parent, timers, IndicatorOptions::default())
    }

    pub fn with_options(
        editor: &Rc<RefCell<E>>,
        parent: &Element,
        timers: &Timers,
        options: IndicatorOptions,
    ) -> Self {
        let element = Element::new("div");
        element.set_class_name(INDICATOR_CLASS);
        element.set_display(Display::InlineBlock);
        parent.append_child(&element);

        let delay = options.delay;
        let disposed = Rc::new(Cell::new(false));
        let refresh = {
            let editor = Rc::downgrade(editor);
            let element = element.clone();
            let disposed = Rc::clone(&disposed);
            DelayedCall::new(timers, move || {
                if disposed.get() {
                    return;
                }
                let Some(editor) = editor.upgrade() else {
                    return;
                };
                let Ok(editor) = editor.try_borrow() else {
                    // Keep the previous text; the next notification retries.
                    tracing::debug!("editor busy, skipping status refresh");
                    return;
                };
                render(&*editor, &element, &options.format);
            })
        };

        let listeners = {
            let mut editor = editor.borrow_mut();
            EditorEvent::ALL
                .into_iter()
                .map(|event| {
                    let refresh = refresh.downgrade();
                    let disposed = Rc::clone(&disposed);
                    editor.on(
                        event,
                        Box::new(move || {
                            if disposed.get() {
                                return;
                            }
                            if let Some(refresh) = refresh.upgrade() {
                                tracing::trace!(event = event.name(), "status refresh requested");
                                refresh.schedule(delay);
                            }
                        }),
                    )
                })
                .collect()
        };

        Self {
            element,
            editor: Rc::downgrade(editor),
            refresh,
            listeners,
            disposed,
        }
    }

    /// Re-render right away, cancelling any pending refresh.
    pub fn update_status(&self) {
        self.refresh.call();
    }

    /// Whether a debounced refresh is waiting to run.
    pub fn is_refresh_pending(&self) -> bool {
        self.refresh.is_pending()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// Stop observing the editor: remove all listeners and cancel any
    /// pending refresh. The element stays attached with its last text.
    /// Calling this more than once is a no-op.
    ///
    /// If the editor is mutably borrowed at this point the listeners cannot
    /// be removed. They stay registered for the editor's lifetime as inert
    /// stubs holding only a disposed flag and a weak link to the refresh,
    /// which is freed when the indicator is dropped.
    pub fn dispose(&mut self) {
        if self.disposed.replace(true) {
            return;
        }
        self.refresh.cancel();
        let Some(editor) = self.editor.upgrade() else {
            self.listeners.clear();
            return;
        };
        match editor.try_borrow_mut() {
            Ok(mut editor) => {
                for id in self.listeners.drain(..) {
                    editor.off(id);
                }
                tracing::debug!("status indicator disposed");
            }
            Err(_) => {
                // Listeners stay registered but are inert behind the flag.
                tracing::warn!(
                    listeners = self.listeners.len(),
                    "editor busy during dispose; listeners left inert"
                );
            }
        }
    }
}

impl<E: Notifier + StatusSource + 'static> Drop for StatusIndicator<E> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<E: Notifier + StatusSource + 'static> std::fmt::Debug for StatusIndicator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusIndicator")
            .field("text", &self.element.text_content())
            .field("listeners", &self.listeners.len())
            .field("disposed", &self.disposed.get())
            .finish_non_exhaustive()
    }
}

/// Build the whole line first, then swap it in.
fn render<S: StatusSource + ?Sized>(source: &S, element: &Element, options: &FormatOptions) {
    let text = format_status(&source.snapshot(), options);
    tracing::debug!(status = %text, "status rendered");
    element.set_text_content(text);
}
