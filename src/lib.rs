// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. status::StatusSource)
    clippy::module_name_repetitions
)]

//! # caret-status
//!
//! A caret status indicator for text editors, with a small terminal editor
//! to drive it.
//!
//! The indicator subscribes to an editor's status, selection and keyboard
//! notifications, coalesces bursts with a trailing-edge debounce, and
//! renders one line such as `INSERT|REC|(2:4) 10:7 [3]`.
//!
//! ## Architecture
//!
//! The terminal application uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: State transitions
//! - **View**: Render to terminal
//!
//! Timers are polled from the same event loop, so everything runs on one
//! thread.
//!
//! ## Modules
//!
//! - [`status`]: the indicator, its formatter, timers and debounce
//! - [`editor`]: the observed modal editor
//! - [`app`]: main application loop and state
//! - [`ui`]: element tree and terminal rendering
//! - [`config`]: flag files and merged options

pub mod app;
pub mod config;
pub mod editor;
pub mod status;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::Editor;
    pub use crate::status::{
        EditorSnapshot, FormatOptions, IndicatorOptions, StatusIndicator, Timers, format_status,
    };
    pub use crate::ui::element::Element;
}
