use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use cinematch_core::display::{self, PLACEHOLDER_POSTER, RECOMMENDATIONS_HEADING};
use cinematch_core::{Movie, ViewState};

use crate::app::App;
use crate::theme::Theme;

/// Details screen: the selected movie, then its recommendation grid.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let ViewState::Details(movie) = &app.session.view else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(9), // movie info
        Constraint::Length(2), // recommendations heading
        Constraint::Min(1),    // grid
    ])
    .split(area);

    f.render_widget(movie_info(movie, &app.theme), chunks[0]);

    let heading = Line::from(Span::styled(
        format!(" {RECOMMENDATIONS_HEADING}"),
        Style::default()
            .fg(app.theme.active)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(heading), chunks[1]);

    app.grid_columns = super::grid::render(
        f,
        chunks[2],
        &app.session.recommendations,
        app.cursor,
        &app.theme,
    );
}

fn movie_info<'a>(movie: &'a Movie, theme: &Theme) -> Paragraph<'a> {
    let poster = display::poster_ref(movie);
    let poster_color = if poster == PLACEHOLDER_POSTER {
        theme.placeholder
    } else {
        theme.dim
    };

    let mut lines = vec![
        Line::from(Span::styled(
            movie.title.as_str(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(poster, Style::default().fg(poster_color))),
        Line::from(Span::styled(
            display::release_date_line(movie),
            Style::default().fg(theme.text),
        )),
        Line::from(vec![
            Span::styled("Rating: ", Style::default().fg(theme.text)),
            Span::styled(
                format!("{}/10", display::rating_text(movie.vote_average)),
                Style::default().fg(theme.rating_color(movie.vote_average)),
            ),
        ]),
    ];
    if let Some(overview) = movie.overview.as_deref().filter(|o| !o.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            overview,
            Style::default().fg(theme.dim),
        )));
    }

    Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style()),
    )
}
