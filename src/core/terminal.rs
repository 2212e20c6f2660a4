//! Terminal rendering and event loop for folder-search.
//!
//! Handles setup/teardown of raw mode and the alternate screen, redraws, and hands
//! key events to the app state.

use crate::app::{AppState, KeypressResult};
use crate::error::AppError;
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, path::PathBuf, time::Duration};

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until the user quits or selects a directory; returns the selection, if any.
/// The terminal is restored before returning, also when the loop failed.
pub(crate) fn run_terminal(app: &mut AppState) -> Result<Option<PathBuf>, AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    result
}

/// Main event loop: draws the UI, polls for events and dispatches them to the app.
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<Option<PathBuf>, AppError>
where
    io::Error: From<<B as Backend>::Error>,
{
    terminal.draw(|f| ui::render(f, app)).map_err(io::Error::from)?;

    loop {
        if app.tick()? {
            terminal.draw(|f| ui::render(f, app)).map_err(io::Error::from)?;
        }

        if !event::poll(Duration::from_millis(16))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match app.handle_keypress(key)? {
                    KeypressResult::Quit => return Ok(None),
                    KeypressResult::Selected(path) => return Ok(Some(path)),
                    KeypressResult::Continue | KeypressResult::Consumed => {}
                }
                terminal.draw(|f| ui::render(f, app)).map_err(io::Error::from)?;
            }
            Event::Resize(_, _) => {
                terminal.draw(|f| ui::render(f, app)).map_err(io::Error::from)?;
            }
            _ => {}
        }
    }
}
