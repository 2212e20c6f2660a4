//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop. It reads
//! the navigator's [ViewModel](crate::app::ViewModel) plus the session state and
//! produces widgets, without owning any navigation logic.
//!
//! Screen layout, top to bottom: title bar, directory list, status line (error or
//! filter), help line. A halted strict session replaces everything below the title
//! with the error screen.

use crate::app::{AppState, InputMode};
use crate::ui::widgets;
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const LOADING_MARKER: &str = " …";

/// Renders the whole terminal UI for one frame.
pub(crate) fn render(frame: &mut Frame, app: &AppState) {
    let theme = app.config().theme();
    let view = app.nav().view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_title(frame, chunks[0], &view.title, view.pending, app);

    if view.halted {
        let message = view.error_message.as_deref().unwrap_or("unknown error");
        let body = Rect {
            height: chunks[2].height + chunks[3].height + chunks[4].height,
            ..chunks[2]
        };
        widgets::draw_error_screen(frame, body, message, theme);
        return;
    }

    render_list(frame, chunks[2], app);
    render_status(frame, chunks[3], view.error_message.as_deref(), app);

    let help = match app.mode() {
        InputMode::Filter => widgets::FILTER_HELP_TEXT,
        InputMode::Normal => widgets::HELP_TEXT,
    };
    let width = chunks[4].width as usize;
    widgets::draw_line(
        frame,
        chunks[4],
        widgets::truncate_to_width(help, width),
        theme.help_style(),
    );
}

/// Title bar with the current path, cut from the left when it does not fit.
fn render_title(frame: &mut Frame, area: Rect, title: &str, pending: bool, app: &AppState) {
    let theme = app.config().theme();
    let marker = if pending { LOADING_MARKER } else { "" };
    let path = shorten_home_path(title);

    let room = (area.width as usize).saturating_sub(marker.width() + 2);
    let shown = widgets::tail_to_width(&path, room);

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(shown.to_string(), theme.title_style().add_modifier(Modifier::BOLD)),
        Span::raw(marker),
        Span::raw(" "),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Numbered directory list, `[Empty]` when there is nothing to show.
fn render_list(frame: &mut Frame, area: Rect, app: &AppState) {
    let theme = app.config().theme();
    let items = app.nav().items();

    if items.is_empty() {
        widgets::draw_line(frame, area, "[Empty]".to_string(), theme.help_style());
        return;
    }

    let icon = theme.selection_icon();
    let pad = " ".repeat(icon.width());
    let width = area.width as usize;

    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let selected = idx == app.selected();
            let prefix = if selected { icon } else { pad.as_str() };
            let text = format!("{}{}. {}", prefix, idx + 1, name);
            let style = if selected {
                theme.selection_style()
            } else {
                theme.item_style()
            };
            ListItem::new(widgets::truncate_to_width(&text, width)).style(style)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected()));
    frame.render_stateful_widget(List::new(rows), area, &mut state);
}

/// Error line in lenient mode, otherwise the filter state.
fn render_status(frame: &mut Frame, area: Rect, error: Option<&str>, app: &AppState) {
    let theme = app.config().theme();
    let width = area.width as usize;

    if let Some(message) = error {
        let text = widgets::truncate_to_width(&format!("Error: {}", message), width);
        widgets::draw_line(frame, area, text, theme.error_style());
        return;
    }

    let options = app.nav().options();
    let case = if options.case_sensitive() { "Aa" } else { "aa" };
    match app.mode() {
        InputMode::Filter => {
            let prefix = format!("[{}] /", case);
            let room = width.saturating_sub(prefix.width() + 1);
            let input = widgets::tail_to_width(app.filter_buffer(), room);
            widgets::draw_line(frame, area, format!("{}{}", prefix, input), theme.filter_style());
            let x = area.x + (prefix.width() + input.width()) as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        }
        InputMode::Normal if !options.pattern().is_empty() => {
            let text = format!("[{}] filter: {}", case, options.pattern());
            widgets::draw_line(
                frame,
                area,
                widgets::truncate_to_width(&text, width),
                theme.filter_style(),
            );
        }
        InputMode::Normal => {}
    }
}
