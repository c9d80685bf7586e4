use super::*;
use crate::app::Model;
use crate::editor::{Command, Direction, Editor, Mode};
use crate::status::{ManualClock, StatusIndicator, Timers, DEFAULT_DELAY};
use crate::ui::element::{Display, Element};
use ratatui::backend::TestBackend;
use ratatui::style::Modifier;
use ratatui::Terminal;
use std::path::PathBuf;
use std::rc::Rc;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn draw(model: &Model, terminal: &mut Terminal<TestBackend>) {
    terminal.draw(|frame| render(model, frame)).unwrap();
}

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn line_text(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn model_with(text: &str, size: (u16, u16)) -> Model {
    Model::new(
        Editor::from_text(text),
        Some(PathBuf::from("notes.txt")),
        size,
    )
}

#[test]
fn test_render_shows_gutter_and_text() {
    let model = model_with("alpha\nbeta", (30, 5));
    let mut terminal = create_test_terminal(30, 5);
    draw(&model, &mut terminal);

    assert!(row_text(&terminal, 0).starts_with("1 alpha"));
    assert!(row_text(&terminal, 1).starts_with("2 beta"));
}

#[test]
fn test_status_bar_is_last_row() {
    let model = model_with("alpha", (30, 5));
    let mut terminal = create_test_terminal(30, 5);
    draw(&model, &mut terminal);

    let status = row_text(&terminal, 4);
    assert!(status.contains("notes.txt"), "status row was {status:?}");
}

#[test]
fn test_status_bar_shows_indicator_after_refresh() {
    let model = model_with("alpha\nbeta", (40, 5));
    let clock = Rc::new(ManualClock::new());
    let timers = Timers::new(clock.clone());
    let _indicator = StatusIndicator::new(&model.editor, &model.status_bar, &timers);

    model
        .editor
        .borrow_mut()
        .execute(Command::Move(Direction::Down))
        .unwrap();
    clock.advance(DEFAULT_DELAY);
    timers.run_due();

    let mut terminal = create_test_terminal(40, 5);
    draw(&model, &mut terminal);
    let status = row_text(&terminal, 4);
    assert!(status.contains("notes.txt"));
    assert!(status.contains("1:0"), "status row was {status:?}");
}

#[test]
fn test_cursor_position_follows_lead() {
    let model = model_with("alpha\nbeta", (30, 5));
    {
        let mut editor = model.editor.borrow_mut();
        editor.execute(Command::Move(Direction::Down)).unwrap();
        editor.execute(Command::Move(Direction::Right)).unwrap();
    }
    let mut terminal = create_test_terminal(30, 5);
    draw(&model, &mut terminal);

    // gutter "2 " is two cells wide
    terminal.backend_mut().assert_cursor_position((3, 1));
}

#[test]
fn test_selection_is_highlighted() {
    let model = model_with("abcdef", (30, 3));
    {
        let mut editor = model.editor.borrow_mut();
        editor.execute(Command::SetMode(Mode::Visual)).unwrap();
        editor.execute(Command::Extend(Direction::Right)).unwrap();
        editor.execute(Command::Extend(Direction::Right)).unwrap();
    }
    let mut terminal = create_test_terminal(30, 3);
    draw(&model, &mut terminal);

    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(2, 0)].bg, style::selection().bg.unwrap());
    assert_eq!(buffer[(3, 0)].bg, style::selection().bg.unwrap());
    assert_ne!(buffer[(4, 0)].bg, style::selection().bg.unwrap());
}

#[test]
fn test_secondary_carets_are_reversed() {
    let model = model_with("ab\ncd", (30, 4));
    model
        .editor
        .borrow_mut()
        .execute(Command::AddCaretBelow)
        .unwrap();
    let mut terminal = create_test_terminal(30, 4);
    draw(&model, &mut terminal);

    let buffer = terminal.backend().buffer();
    assert!(buffer[(2, 1)].modifier.contains(Modifier::REVERSED));
    assert!(!buffer[(3, 1)].modifier.contains(Modifier::REVERSED));
}

#[test]
fn test_tabs_render_as_single_space() {
    let model = model_with("\tx", (30, 3));
    let mut terminal = create_test_terminal(30, 3);
    draw(&model, &mut terminal);
    assert!(row_text(&terminal, 0).starts_with("1  x"));
}

#[test]
fn test_scroll_offset_skips_lines() {
    let mut model = model_with("a\nb\nc\nd\ne", (20, 3));
    model.scroll_offset = 3;
    let mut terminal = create_test_terminal(20, 3);
    draw(&model, &mut terminal);
    assert!(row_text(&terminal, 0).starts_with("4 d"));
    assert!(row_text(&terminal, 1).starts_with("5 e"));
}

#[test]
fn test_status_line_skips_hidden_and_empty_children() {
    let bar = Element::new("div");
    let visible = Element::new("span");
    visible.set_text_content("left");
    let hidden = Element::new("span");
    hidden.set_text_content("secret");
    hidden.set_display(Display::None);
    let empty = Element::new("span");
    let right = Element::new("span");
    right.set_text_content("right");
    for child in [&visible, &hidden, &empty, &right] {
        bar.append_child(child);
    }

    let line = status_line(&bar, 40);
    assert_eq!(line_text(&line), " left  right");
}

#[test]
fn test_status_line_is_clipped_to_width() {
    let bar = Element::new("div");
    let child = Element::new("span");
    child.set_text_content("a very long status message");
    bar.append_child(&child);

    let line = status_line(&bar, 8);
    assert_eq!(line_text(&line), " a very ");
    assert_eq!(line.width(), 8);
}

#[test]
fn test_status_line_clips_wide_characters_by_cell() {
    let bar = Element::new("div");
    let child = Element::new("span");
    child.set_text_content("日本語");
    bar.append_child(&child);

    let line = status_line(&bar, 4);
    assert_eq!(line_text(&line), " 日");
}

#[test]
fn test_status_line_counts_tabs_as_one_cell() {
    let bar = Element::new("div");
    let label = Element::new("span");
    label.set_text_content("a.txt");
    let indicator = Element::new("div");
    indicator.set_text_content("INSERT\tREC\t0:0");
    bar.append_child(&label);
    bar.append_child(&indicator);

    let line = status_line(&bar, 14);
    assert_eq!(line_text(&line), " a.txt  INSERT");

    bar.remove_child(&label);
    let line = status_line(&bar, 14);
    assert_eq!(line_text(&line), " INSERT\tREC\t0:");
}

#[test]
fn test_line_number_width() {
    assert_eq!(line_number_width(1), 1);
    assert_eq!(line_number_width(9), 1);
    assert_eq!(line_number_width(10), 2);
    assert_eq!(line_number_width(999), 3);
    assert_eq!(line_number_width(1_000), 4);
    assert_eq!(line_number_width(1_000_000), 6);
}
