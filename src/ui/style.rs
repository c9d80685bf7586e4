//! Styling for the editor pane and status bar.

use ratatui::style::{Color, Modifier, Style};

use crate::app::{FILE_LABEL_CLASS, STATUS_BAR_CLASS};
use crate::status::indicator::INDICATOR_CLASS;
use crate::ui::element::Element;

pub fn gutter() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn selection() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

pub fn secondary_caret() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Style for a status-bar element, picked by its class.
pub fn for_element(element: &Element) -> Style {
    if element.has_class(STATUS_BAR_CLASS) {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else if element.has_class(INDICATOR_CLASS) {
        Style::default().add_modifier(Modifier::BOLD)
    } else if element.has_class(FILE_LABEL_CLASS) {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
    }
}
