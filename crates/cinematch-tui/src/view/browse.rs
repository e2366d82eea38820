use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use cinematch_core::display;

use crate::app::App;

/// Popular and search-result screens: a heading over the movie grid.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // heading + gap
        Constraint::Min(1),    // grid
    ])
    .split(area);

    let heading = Line::from(Span::styled(
        format!(" {}", display::heading(&app.session.view)),
        Style::default()
            .fg(app.theme.active)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(heading), chunks[0]);

    if let Some(message) = display::list_body(&app.session) {
        let line = Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(app.theme.dim),
        ));
        f.render_widget(Paragraph::new(line), chunks[1]);
        return;
    }

    app.grid_columns = super::grid::render(
        f,
        chunks[1],
        &app.session.movies,
        app.cursor,
        &app.theme,
    );
}
