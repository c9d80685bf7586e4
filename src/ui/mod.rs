//! Terminal UI components.
//!
//! - [`element`]: retained element tree the status bar is built from
//! - [`style`]: colors for editor and status-bar elements
//! - [`render`]: draws the editor pane and the status bar

pub mod element;
pub mod style;

mod render;

pub use render::{line_number_width, render, status_line};

#[cfg(test)]
mod tests;
