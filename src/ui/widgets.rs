//! Small drawing helpers used by the renderer.

use crate::config::Theme;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Key hints shown at the bottom of the screen.
pub const HELP_TEXT: &str =
    "←/→ or h/l: navigate • ↑/↓: move • enter: select • /: filter • c: case • r: refresh • q: quit";

/// Help line shown while the filter is being edited.
pub const FILTER_HELP_TEXT: &str = "type to filter • backspace: delete • enter/esc: done";

/// Returns the longest suffix of `text` that fits in `width` columns.
///
/// Keeps the end of an input visible while typing, and the deepest part of a path.
pub fn tail_to_width(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

/// Cuts `text` to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Single line paragraph in the given style.
pub fn draw_line(frame: &mut Frame, area: Rect, text: String, style: Style) {
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), area);
}

/// Full screen error shown once a strict session halted.
pub fn draw_error_screen(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled(format!("Error: {}", message), theme.error_style())),
        Line::from(""),
        Line::from(Span::styled("Press q to quit", theme.help_style())),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false }),
        area,
    );
}
