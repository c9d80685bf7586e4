//! Modal key handling: keys in, commands out.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::buffer::Direction;
use super::commands::Command;

/// Upper bound for a typed repeat count.
const MAX_COUNT: usize = 9_999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual,
}

impl Mode {
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Insert => Some("INSERT"),
            Self::Visual => Some("VISUAL"),
        }
    }
}

/// Translates key presses into [`Command`]s according to the current mode.
#[derive(Debug, Default)]
pub struct KeyBinding {
    mode: Mode,
    count: Option<usize>,
}

impl KeyBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.count = None;
    }

    /// Status hint: the mode label, or a pending repeat count.
    pub fn status_text(&self) -> Option<String> {
        match (self.mode.label(), self.count) {
            (Some(label), Some(count)) => Some(format!("{label} {count}")),
            (Some(label), None) => Some(label.to_string()),
            (None, Some(count)) => Some(count.to_string()),
            (None, None) => None,
        }
    }

    /// Commands for one key press. Unbound keys yield nothing.
    pub fn resolve(&mut self, key: KeyEvent) -> Vec<Command> {
        match self.mode {
            Mode::Insert => insert_commands(key).into_iter().collect(),
            Mode::Normal | Mode::Visual => self.modal_commands(key),
        }
    }

    fn modal_commands(&mut self, key: KeyEvent) -> Vec<Command> {
        if let KeyCode::Char(c @ '0'..='9') = key.code
            && (c != '0' || self.count.is_some())
        {
            let digit = c.to_digit(10).map_or(0, |d| d as usize);
            let next = self.count.unwrap_or(0).saturating_mul(10) + digit;
            self.count = Some(next.min(MAX_COUNT));
            return Vec::new();
        }

        let repeat = self.count.take().unwrap_or(1);
        let visual = self.mode == Mode::Visual;
        let motion = |dir| {
            if visual {
                Command::Extend(dir)
            } else {
                Command::Move(dir)
            }
        };

        let single = match key.code {
            KeyCode::Char('h') | KeyCode::Left => motion(Direction::Left),
            KeyCode::Char('l') | KeyCode::Right => motion(Direction::Right),
            KeyCode::Char('k') | KeyCode::Up => motion(Direction::Up),
            KeyCode::Char('j') | KeyCode::Down => motion(Direction::Down),
            KeyCode::Char('w') => Command::WordRight,
            KeyCode::Char('b') => Command::WordLeft,
            KeyCode::Char('0') | KeyCode::Home => Command::LineStart,
            KeyCode::Char('$') | KeyCode::End => Command::LineEnd,
            KeyCode::Char('x') if !visual => Command::DeleteForward,
            KeyCode::Char('d' | 'x') if visual => {
                return vec![Command::DeleteSelection, Command::SetMode(Mode::Normal)];
            }
            KeyCode::Char('i') if !visual => return vec![Command::SetMode(Mode::Insert)],
            KeyCode::Char('a') if !visual => {
                return vec![
                    Command::Move(Direction::Right),
                    Command::SetMode(Mode::Insert),
                ];
            }
            KeyCode::Char('v') if visual => return vec![Command::SetMode(Mode::Normal)],
            KeyCode::Char('v') => return vec![Command::SetMode(Mode::Visual)],
            KeyCode::Char('q') if !visual => return vec![Command::ToggleRecording],
            KeyCode::Char('@') if !visual => return vec![Command::ReplayMacro; repeat],
            KeyCode::Char('C') if !visual => Command::AddCaretBelow,
            KeyCode::Esc if visual => return vec![Command::SetMode(Mode::Normal)],
            KeyCode::Esc => return vec![Command::ClearCarets],
            _ => return Vec::new(),
        };
        vec![single; repeat]
    }
}

fn insert_commands(key: KeyEvent) -> Option<Command> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let arrow = |dir| {
        if shift {
            Command::Extend(dir)
        } else {
            Command::Move(dir)
        }
    };
    let command = match key.code {
        KeyCode::Esc => Command::SetMode(Mode::Normal),
        KeyCode::Enter => Command::SplitLine,
        KeyCode::Backspace => Command::DeleteBack,
        KeyCode::Delete => Command::DeleteForward,
        KeyCode::Tab => Command::InsertChar('\t'),
        KeyCode::Left => arrow(Direction::Left),
        KeyCode::Right => arrow(Direction::Right),
        KeyCode::Up => arrow(Direction::Up),
        KeyCode::Down => arrow(Direction::Down),
        KeyCode::Home => Command::LineStart,
        KeyCode::End => Command::LineEnd,
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Command::InsertChar(c)
        }
        _ => return None,
    };
    Some(command)
}
