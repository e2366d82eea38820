pub mod browse;
pub mod detail;
pub mod footer;
pub mod grid;
pub mod header;
pub mod help;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::Theme;

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// The body shown while a trigger is in flight. Content is hidden until
/// the fetch completes.
pub fn render_loading(f: &mut Frame, area: Rect, theme: &Theme, tick: usize) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", spinner_char(tick)),
            Style::default().fg(theme.spinner),
        ),
        Span::styled("Loading...", Style::default().fg(theme.text)),
    ]);
    let top = area.y + area.height / 2;
    let row = Rect::new(area.x, top, area.width, area.height.min(1));
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Amélie", 6), "Amélie");
        assert_eq!(truncate("Amélie", 4), "Amé\u{2026}");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn spinner_wraps() {
        assert_eq!(spinner_char(0), spinner_char(SPINNER_FRAMES.len()));
    }
}
