use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, InputMode};

const SEARCH_PLACEHOLDER: &str = "Search movies...";

/// Title bar with the search box on the right.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::horizontal([Constraint::Length(16), Constraint::Min(10)]).split(area);

    let logo = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(" CineMatch ", theme.header_style())),
    ]);
    f.render_widget(logo, chunks[0]);

    let editing = app.input_mode == InputMode::Search;
    let content = if editing {
        Line::from(vec![
            Span::styled(app.search_input.as_str(), Style::default().fg(theme.text)),
            Span::styled(
                "\u{2588}",
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ])
    } else if app.search_input.is_empty() {
        Line::from(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(theme.dim),
        ))
    } else {
        Line::from(Span::styled(
            app.search_input.as_str(),
            Style::default().fg(theme.text),
        ))
    };

    let border = if editing {
        Style::default().fg(theme.active)
    } else {
        theme.border_style()
    };
    let search_box = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search "),
    );
    f.render_widget(search_box, chunks[1]);
}
