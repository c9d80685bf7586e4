//! Editor commands and macro recording.

use thiserror::Error;

use super::buffer::Direction;
use super::keybinding::Mode;

/// Everything the editor can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the caret; collapses the selection.
    Move(Direction),
    /// Move the lead, keeping the anchor.
    Extend(Direction),
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    InsertChar(char),
    SplitLine,
    DeleteBack,
    DeleteForward,
    /// Remove the selected text; a no-op on an empty selection.
    DeleteSelection,
    SetMode(Mode),
    /// Add a secondary caret on the line below the lowest caret.
    AddCaretBelow,
    ClearCarets,
    ToggleRecording,
    ReplayMacro,
}

impl Command {
    /// Commands that control recording itself are never recorded.
    pub const fn is_recordable(&self) -> bool {
        !matches!(self, Self::ToggleRecording | Self::ReplayMacro)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("cannot replay a macro while recording")]
    ReplayWhileRecording,
    #[error("no macro has been recorded")]
    NothingRecorded,
}

/// Tracks the recording flag and the last recorded macro.
#[derive(Debug, Default)]
pub struct CommandManager {
    recording: bool,
    current: Vec<Command>,
    last_macro: Vec<Command>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn recording(&self) -> bool {
        self.recording
    }

    /// Start or stop recording. Stopping keeps the recorded commands as
    /// the macro to replay, unless nothing was recorded.
    pub fn toggle_recording(&mut self) -> bool {
        if self.recording {
            self.recording = false;
            if !self.current.is_empty() {
                self.last_macro = std::mem::take(&mut self.current);
            }
            tracing::debug!(commands = self.last_macro.len(), "recording stopped");
        } else {
            self.recording = true;
            self.current.clear();
            tracing::debug!("recording started");
        }
        self.recording
    }

    /// Append an executed command to the recording, if one is active.
    pub fn record(&mut self, command: &Command) {
        if self.recording && command.is_recordable() {
            self.current.push(command.clone());
        }
    }

    /// Commands to replay for the last macro.
    ///
    /// # Errors
    /// Fails while recording or when no macro exists.
    pub fn replay(&self) -> Result<Vec<Command>, CommandError> {
        if self.recording {
            return Err(CommandError::ReplayWhileRecording);
        }
        if self.last_macro.is_empty() {
            return Err(CommandError::NothingRecorded);
        }
        Ok(self.last_macro.clone())
    }

    pub fn last_macro(&self) -> &[Command] {
        &self.last_macro
    }
}
