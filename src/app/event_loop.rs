use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::Editor;
use crate::status::{StatusIndicator, Timers};

/// Longest wait for input when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// How long to wait for input before the next timer is due.
pub(super) fn poll_timeout(until_next_timer: Option<Duration>) -> Duration {
    until_next_timer.map_or(IDLE_POLL, |d| d.min(IDLE_POLL))
}

/// Translate a terminal event into a message.
pub(super) fn message_for_event(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => Message::from_key(*key),
        Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
        _ => None,
    }
}

impl App {
    /// Run the editor until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the terminal cannot be
    /// initialized, or drawing/reading terminal events fails.
    pub fn run(&mut self) -> Result<()> {
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        let model = match &self.file_path {
            Some(path) => Model::load(path, size)?,
            None => Model::new(Editor::empty(), None, size),
        };

        let timers = Timers::monotonic();
        let indicator = StatusIndicator::with_options(
            &model.editor,
            &model.status_bar,
            &timers,
            self.indicator_options.clone(),
        );
        tracing::debug!(?indicator, "status indicator attached");

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - caret-status requires an interactive terminal")?;

        let result = Self::event_loop(&mut terminal, model, &timers);

        ratatui::restore();
        drop(indicator);
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, mut model: Model, timers: &Timers) -> Result<()> {
        let mut needs_render = true;

        loop {
            // Debounced status refreshes run here, on the UI thread.
            if timers.run_due() > 0 {
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(&model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            if event::poll(poll_timeout(timers.time_until_next()))? {
                if let Some(msg) = message_for_event(&event::read()?) {
                    model = update(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single frame.
                while !model.should_quit && event::poll(Duration::ZERO)? {
                    if let Some(msg) = message_for_event(&event::read()?) {
                        model = update(model, msg);
                    }
                }
            }
        }
        Ok(())
    }
}
