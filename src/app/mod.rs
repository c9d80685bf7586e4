//! Application state and main event loop.
//!
//! Follows The Elm Architecture:
//! - [`Model`]: editor, status bar elements and view state
//! - [`Message`]: input and actions
//! - [`update`]: state transitions
//! - [`App::run`]: terminal event loop that also drives the timers

mod event_loop;
mod model;
mod update;

pub use model::{FILE_LABEL_CLASS, Model, NoticeLevel, STATUS_BAR_CLASS};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::status::IndicatorOptions;

/// Owns the startup options and runs the terminal session.
pub struct App {
    file_path: Option<PathBuf>,
    indicator_options: IndicatorOptions,
}

impl App {
    /// Create an application for `file_path`, or a scratch buffer.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            indicator_options: IndicatorOptions::default(),
        }
    }

    /// Options for the caret status indicator.
    pub fn with_indicator_options(mut self, options: IndicatorOptions) -> Self {
        self.indicator_options = options;
        self
    }
}
