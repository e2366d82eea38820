use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use cinematch_core::Movie;
use cinematch_core::display::{MovieCard, PLACEHOLDER_POSTER};

use super::truncate;
use crate::theme::Theme;

/// Outer size of one card, borders included.
pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 5;

/// Cards that fit side by side in `width` columns (at least one).
pub fn columns_for(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// First grid row to draw so the cursor row stays on screen.
pub fn first_visible_row(cursor_row: usize, visible_rows: usize) -> usize {
    cursor_row.saturating_sub(visible_rows.saturating_sub(1))
}

/// Draw `movies` as a card grid with `cursor` highlighted. Returns the number
/// of columns used so the caller can move the cursor by rows.
pub fn render(
    f: &mut Frame,
    area: Rect,
    movies: &[Movie],
    cursor: usize,
    theme: &Theme,
) -> usize {
    let cols = columns_for(area.width);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let first_row = first_visible_row(cursor / cols, visible_rows);

    for (i, movie) in movies.iter().enumerate().skip(first_row * cols) {
        let row = i / cols - first_row;
        if row >= visible_rows {
            break;
        }
        let col = i % cols;
        let x = area.x + col as u16 * CARD_WIDTH;
        let y = area.y + row as u16 * CARD_HEIGHT;
        let rect = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(area);
        if rect.is_empty() {
            continue;
        }
        render_card(f, rect, &MovieCard::from(movie), movie.vote_average, i == cursor, theme);
    }

    cols
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    card: &MovieCard,
    vote_average: Option<f64>,
    highlighted: bool,
    theme: &Theme,
) {
    let inner_width = usize::from(area.width.saturating_sub(2));

    let poster_style = if card.poster == PLACEHOLDER_POSTER {
        Style::default().fg(theme.placeholder)
    } else {
        Style::default().fg(theme.dim)
    };
    let rating = if card.rating.is_empty() {
        Span::styled("\u{2605} -", Style::default().fg(theme.dim))
    } else {
        Span::styled(
            format!("\u{2605} {}", card.rating),
            Style::default().fg(theme.rating_color(vote_average)),
        )
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate(&card.title, inner_width),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(truncate(&card.poster, inner_width), poster_style)),
        Line::from(rating),
    ];

    let (border, bg) = if highlighted {
        (Style::default().fg(theme.active), theme.highlight_style())
    } else {
        (theme.border_style(), Style::default())
    };

    let block = Block::default().borders(Borders::ALL).border_style(border);
    f.render_widget(Paragraph::new(lines).style(bg).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_areas_still_get_one_column() {
        assert_eq!(columns_for(0), 1);
        assert_eq!(columns_for(CARD_WIDTH - 1), 1);
        assert_eq!(columns_for(CARD_WIDTH * 3 + 5), 3);
    }

    #[test]
    fn scroll_keeps_cursor_row_visible() {
        assert_eq!(first_visible_row(0, 3), 0);
        assert_eq!(first_visible_row(2, 3), 0);
        assert_eq!(first_visible_row(5, 3), 3);
        assert_eq!(first_visible_row(4, 0), 4);
    }
}
