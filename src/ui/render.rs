use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;
use crate::editor::Cursor;
use crate::ui::element::{Display, Element};

use super::style;

/// Gap between inline elements in the status bar.
const STATUS_GAP: &str = "  ";

/// Render the complete UI: editor pane above, status bar on the last row.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let [editor_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    render_editor(model, frame, editor_area);

    let bar = Paragraph::new(status_line(&model.status_bar, status_area.width))
        .style(style::for_element(&model.status_bar));
    frame.render_widget(bar, status_area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let editor = model.editor.borrow();
    let buf = editor.buffer();
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);

    let start = model.scroll_offset.min(total_lines.saturating_sub(1));
    let end = (start + area.height as usize).min(total_lines);
    let cursor = buf.cursor();
    let (sel_start, sel_end) = ordered(editor.anchor(), cursor);

    let mut content: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for line_idx in start..end {
        let text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, style::gutter())];

        let in_selection = (sel_start.line, sel_start.col) != (sel_end.line, sel_end.col)
            && line_idx >= sel_start.line
            && line_idx <= sel_end.line;
        let selected = in_selection.then(|| {
            let from = if line_idx == sel_start.line { sel_start.col } else { 0 };
            let to = if line_idx == sel_end.line {
                sel_end.col
            } else {
                text.len()
            };
            (from, to)
        });
        let eol_selected = in_selection && line_idx < sel_end.line;
        let carets: Vec<usize> = editor
            .carets()
            .iter()
            .filter(|c| c.line == line_idx)
            .map(|c| c.col)
            .collect();

        spans.extend(line_spans(&text, selected, &carets, eol_selected));
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);

    if (start..end).contains(&cursor.line) {
        let text = buf.line_at(cursor.line).unwrap_or_default();
        let before = &text[..cursor.col.min(text.len())];
        let x = area.x as usize + gutter_width as usize + 1 + display_width(before);
        let y = area.y as usize + (cursor.line - start);
        let x = u16::try_from(x).unwrap_or(u16::MAX).min(area.right().saturating_sub(1));
        let y = u16::try_from(y).unwrap_or(u16::MAX);
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Split one line into spans, styling the selected byte range and the
/// secondary carets.
fn line_spans(
    text: &str,
    selected: Option<(usize, usize)>,
    carets: &[usize],
    eol_selected: bool,
) -> Vec<Span<'static>> {
    let style_at = |idx: usize| {
        if carets.contains(&idx) {
            style::secondary_caret()
        } else if selected.is_some_and(|(from, to)| idx >= from && idx < to) {
            style::selection()
        } else {
            Style::default()
        }
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (idx, ch) in text.char_indices() {
        let ch_style = style_at(idx);
        if ch_style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = ch_style;
        run.push(if ch == '\t' { ' ' } else { ch });
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    if carets.contains(&text.len()) {
        spans.push(Span::styled(" ", style::secondary_caret()));
    } else if eol_selected {
        spans.push(Span::styled(" ", style::selection()));
    }
    spans
}

/// The status bar as one line: the container's own text, then each
/// visible child, separated by a gap and clipped to `width` cells.
pub fn status_line(bar: &Element, width: u16) -> Line<'static> {
    let mut parts: Vec<(String, Style)> = Vec::new();
    let own = bar.own_text();
    if !own.is_empty() {
        parts.push((own, Style::default()));
    }
    for child in bar.children() {
        if child.display() == Display::None {
            continue;
        }
        let text = child.text_content();
        if !text.is_empty() {
            parts.push((text, style::for_element(&child)));
        }
    }

    let mut budget = width as usize;
    let mut spans = vec![Span::raw(" ")];
    budget = budget.saturating_sub(1);
    for (i, (text, part_style)) in parts.into_iter().enumerate() {
        if i > 0 {
            if budget < STATUS_GAP.len() {
                break;
            }
            spans.push(Span::raw(STATUS_GAP));
            budget -= STATUS_GAP.len();
        }
        let clipped = clip_to_width(&text, budget);
        budget = budget.saturating_sub(display_width(&clipped));
        let done = clipped.len() < text.len();
        spans.push(Span::styled(clipped, part_style));
        if done || budget == 0 {
            break;
        }
    }
    Line::from(spans)
}

/// Longest prefix of `text` fitting in `max` cells. Tabs take one cell,
/// as in [`display_width`].
fn clip_to_width(text: &str, max: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = if ch == '\t' { 1 } else { ch.width().unwrap_or(0) };
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

fn display_width(text: &str) -> usize {
    if text.contains('\t') {
        text.replace('\t', " ").width()
    } else {
        text.width()
    }
}

fn ordered(a: Cursor, b: Cursor) -> (Cursor, Cursor) {
    if (a.line, a.col) <= (b.line, b.col) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
