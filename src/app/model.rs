use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};

use crate::editor::Editor;
use crate::ui::element::{Display, Element};

/// Class of the status-bar container element.
pub const STATUS_BAR_CLASS: &str = "status-bar";
/// Class of the file-name element inside the status bar.
pub const FILE_LABEL_CLASS: &str = "file-label";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Application state.
///
/// The editor sits behind `Rc<RefCell<_>>` because the status indicator
/// holds a weak link to it.
#[derive(Debug)]
pub struct Model {
    pub editor: Rc<RefCell<Editor>>,
    /// File being edited; `None` for a scratch buffer.
    pub file_path: Option<PathBuf>,
    /// Container the status elements are attached to.
    pub status_bar: Element,
    pub file_label: Element,
    /// First visible line of the editor pane.
    pub scroll_offset: usize,
    /// Terminal size in cells.
    pub size: (u16, u16),
    /// Last save/command outcome shown next to the file name.
    pub notice: Option<(NoticeLevel, String)>,
    pub should_quit: bool,
}

impl Model {
    pub fn new(editor: Editor, file_path: Option<PathBuf>, size: (u16, u16)) -> Self {
        let status_bar = Element::new("div");
        status_bar.set_class_name(STATUS_BAR_CLASS);

        let file_label = Element::new("span");
        file_label.set_class_name(FILE_LABEL_CLASS);
        file_label.set_display(Display::InlineBlock);
        status_bar.append_child(&file_label);

        let model = Self {
            editor: Rc::new(RefCell::new(editor)),
            file_path,
            status_bar,
            file_label,
            scroll_offset: 0,
            size,
            notice: None,
            should_quit: false,
        };
        model.refresh_file_label();
        model
    }

    /// Open `path`, or start an empty buffer for a file that does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read as UTF-8.
    pub fn load(path: &Path, size: (u16, u16)) -> Result<Self> {
        let text = if path.exists() {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        } else {
            String::new()
        };
        Ok(Self::new(
            Editor::from_text(&text),
            Some(path.to_path_buf()),
            size,
        ))
    }

    /// Rows available to the editor pane (the status bar takes one).
    pub const fn editor_height(&self) -> usize {
        self.size.1.saturating_sub(1) as usize
    }

    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string())
    }

    /// Write the buffer to its file.
    ///
    /// # Errors
    /// Fails without a file path or when the write fails.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            anyhow::bail!("No file name");
        };
        let text = self.editor.borrow().buffer().text();
        std::fs::write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.editor.borrow_mut().mark_clean();
        tracing::info!(path = %path.display(), "saved");
        Ok(())
    }

    pub fn set_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some((level, message.into()));
    }

    /// Keep the caret line inside the editor pane.
    pub fn ensure_cursor_visible(&mut self) {
        let line = self.editor.borrow().buffer().cursor().line;
        let height = self.editor_height().max(1);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + height {
            self.scroll_offset = line + 1 - height;
        }
    }

    /// Re-render the file-name element: name, dirty marker, notice.
    pub fn refresh_file_label(&self) {
        let dirty = self.editor.borrow().buffer().is_dirty();
        let mut text = self.display_name();
        if dirty {
            text.push_str(" [+]");
        }
        if let Some((_, message)) = &self.notice {
            text.push_str(" - ");
            text.push_str(message);
        }
        self.file_label.set_text_content(text);
    }
}
