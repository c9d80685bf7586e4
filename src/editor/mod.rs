//! A small modal editor for the status indicator to observe.
//!
//! [`Editor`] owns a rope buffer, an anchor/lead selection, a command
//! manager with macro recording and a modal key binding. It reports state
//! changes on the three [`EditorEvent`] channels.

mod buffer;
pub mod commands;
pub mod events;
pub mod keybinding;
mod selection;

pub use buffer::{Cursor, Direction, EditorBuffer};
pub use commands::{Command, CommandError, CommandManager};
pub use events::Listeners;
pub use keybinding::{KeyBinding, Mode};
pub use selection::Selection;

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::status::{EditorEvent, Handler, ListenerId, Notifier, Point, Range, StatusSource};

/// Observable state compared before and after each command batch.
#[derive(Debug, PartialEq, Eq)]
struct Observed {
    selection: Selection,
    status: Option<String>,
    recording: bool,
}

pub struct Editor {
    buffer: EditorBuffer,
    /// Byte-column anchor; the buffer cursor is the lead.
    anchor: Cursor,
    /// Secondary carets (byte columns).
    carets: Vec<Cursor>,
    commands: CommandManager,
    key_binding: KeyBinding,
    listeners: Listeners,
}

impl Editor {
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: EditorBuffer::from_text(text),
            anchor: Cursor::new(),
            carets: Vec::new(),
            commands: CommandManager::new(),
            key_binding: KeyBinding::new(),
            listeners: Listeners::new(),
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub const fn commands(&self) -> &CommandManager {
        &self.commands
    }

    pub const fn key_binding(&self) -> &KeyBinding {
        &self.key_binding
    }

    /// Byte-column anchor of the primary selection.
    pub const fn anchor(&self) -> Cursor {
        self.anchor
    }

    /// Byte-column positions of the secondary carets.
    pub fn carets(&self) -> &[Cursor] {
        &self.carets
    }

    pub const fn mode(&self) -> Mode {
        self.key_binding.mode()
    }

    pub fn mark_clean(&mut self) {
        self.buffer.mark_clean();
    }

    /// Selection in character columns.
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::new();
        selection.move_to(self.buffer.point_of(self.anchor));
        selection.extend_to(self.buffer.point_of(self.buffer.cursor()));
        for caret in &self.carets {
            selection.add_caret(self.buffer.point_of(*caret));
        }
        selection
    }

    /// Handle one key press: announce keyboard activity, then run the bound
    /// commands. Key releases are ignored.
    ///
    /// # Errors
    /// Propagates [`CommandError`] from macro replay. Commands before the
    /// failing one stay applied and their change events are still emitted.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<(), CommandError> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }
        self.listeners.emit(EditorEvent::KeyboardActivity);
        let commands = self.key_binding.resolve(key);
        self.run(&commands)
    }

    /// Run one command and emit the resulting change events.
    ///
    /// # Errors
    /// See [`Editor::handle_key`].
    pub fn execute(&mut self, command: Command) -> Result<(), CommandError> {
        self.run(std::slice::from_ref(&command))
    }

    fn run(&mut self, commands: &[Command]) -> Result<(), CommandError> {
        let before = self.observe();
        let mut result = Ok(());
        for command in commands {
            if let Err(err) = self.apply(command) {
                result = Err(err);
                break;
            }
        }
        let after = self.observe();
        if after.selection != before.selection {
            self.listeners.emit(EditorEvent::ChangeSelection);
        }
        if after.status != before.status || after.recording != before.recording {
            self.listeners.emit(EditorEvent::ChangeStatus);
        }
        result
    }

    fn observe(&self) -> Observed {
        Observed {
            selection: self.selection(),
            status: self.key_binding.status_text(),
            recording: self.commands.recording(),
        }
    }

    fn apply(&mut self, command: &Command) -> Result<(), CommandError> {
        self.commands.record(command);
        let visual = self.mode() == Mode::Visual;
        match command {
            Command::Move(dir) => {
                self.buffer.move_cursor(*dir);
                self.collapse();
            }
            Command::Extend(dir) => self.buffer.move_cursor(*dir),
            Command::LineStart => self.motion(visual, EditorBuffer::move_home),
            Command::LineEnd => self.motion(visual, EditorBuffer::move_end),
            Command::WordLeft => self.motion(visual, EditorBuffer::move_word_left),
            Command::WordRight => self.motion(visual, EditorBuffer::move_word_right),
            Command::InsertChar(c) => {
                self.replace_selection();
                self.buffer.insert_char(*c);
                self.collapse();
            }
            Command::SplitLine => {
                self.replace_selection();
                self.buffer.split_line();
                self.collapse();
            }
            Command::DeleteBack => {
                if !self.replace_selection() {
                    self.buffer.delete_back();
                }
                self.collapse();
            }
            Command::DeleteForward => {
                if !self.replace_selection() {
                    self.buffer.delete_forward();
                }
                self.collapse();
            }
            Command::DeleteSelection => {
                self.replace_selection();
                self.collapse();
            }
            Command::SetMode(mode) => {
                if *mode != Mode::Visual {
                    self.collapse();
                }
                self.key_binding.set_mode(*mode);
            }
            Command::AddCaretBelow => self.add_caret_below(),
            Command::ClearCarets => self.carets.clear(),
            Command::ToggleRecording => {
                self.commands.toggle_recording();
            }
            Command::ReplayMacro => {
                for replayed in self.commands.replay()? {
                    self.apply(&replayed)?;
                }
            }
        }
        Ok(())
    }

    fn motion(&mut self, extend: bool, step: fn(&mut EditorBuffer)) {
        step(&mut self.buffer);
        if !extend {
            self.collapse();
        }
    }

    fn collapse(&mut self) {
        self.anchor = self.buffer.cursor();
    }

    /// Delete the selected text, if any. Edits drop secondary carets.
    fn replace_selection(&mut self) -> bool {
        self.carets.clear();
        let lead = self.buffer.cursor();
        if (self.anchor.line, self.anchor.col) == (lead.line, lead.col) {
            return false;
        }
        self.buffer.remove_range(self.anchor, lead)
    }

    fn add_caret_below(&mut self) {
        let lowest = self
            .carets
            .iter()
            .map(|c| c.line)
            .max()
            .unwrap_or(self.buffer.cursor().line);
        let line = lowest + 1;
        if line >= self.buffer.line_count() {
            return;
        }
        let col = self.buffer.cursor().col.min(self.buffer.line_len(line));
        self.carets.push(Cursor::at(line, col));
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("buffer", &self.buffer)
            .field("anchor", &self.anchor)
            .field("carets", &self.carets.len())
            .field("mode", &self.mode())
            .field("recording", &self.commands.recording())
            .finish_non_exhaustive()
    }
}

impl Notifier for Editor {
    fn on(&mut self, event: EditorEvent, handler: Handler) -> ListenerId {
        self.listeners.on(event, handler)
    }

    fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.off(id)
    }
}

impl StatusSource for Editor {
    fn key_binding_status(&self) -> Option<String> {
        self.key_binding.status_text()
    }

    fn is_recording(&self) -> bool {
        self.commands.recording()
    }

    fn selection_is_empty(&self) -> bool {
        self.selection().is_empty()
    }

    fn lead(&self) -> Point {
        self.buffer.point_of(self.buffer.cursor())
    }

    fn range_count(&self) -> usize {
        self.selection().range_count()
    }

    fn selection_range(&self) -> Range {
        self.selection().range()
    }
}
