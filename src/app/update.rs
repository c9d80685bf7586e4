use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Model;
use crate::app::model::NoticeLevel;

/// All events and actions the application reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Key press forwarded to the editor
    Key(KeyEvent),
    /// Terminal resized to (width, height)
    Resize(u16, u16),
    /// Write the buffer to disk
    Save,
    /// Exit the application
    Quit,
}

impl Message {
    /// Map a key press to a message. Global shortcuts win over the editor.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q' | 'c') => return Some(Self::Quit),
                KeyCode::Char('s') => return Some(Self::Save),
                _ => {}
            }
        }
        Some(Self::Key(key))
    }
}

/// Apply a message to the model.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Key(key) => {
            let result = model.editor.borrow_mut().handle_key(key);
            match result {
                Ok(()) => model.notice = None,
                Err(err) => {
                    tracing::warn!(error = %err, "command failed");
                    model.set_notice(NoticeLevel::Error, err.to_string());
                }
            }
            model.ensure_cursor_visible();
        }
        Message::Resize(width, height) => {
            model.size = (width, height);
            model.ensure_cursor_visible();
        }
        Message::Save => match model.save() {
            Ok(()) => model.set_notice(NoticeLevel::Info, "saved"),
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                model.set_notice(NoticeLevel::Error, format!("{err:#}"));
            }
        },
        Message::Quit => model.should_quit = true,
    }
    model.refresh_file_label();
    model
}
