use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use cinematch_core::ViewState;

use crate::app::{App, InputMode};
use crate::theme::Theme;

/// Key hints for the current screen plus one status dot per service.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let hints = match (&app.input_mode, &app.session.view) {
        (InputMode::Search, _) => " Enter:search  Esc:cancel",
        (_, ViewState::Details(_)) => {
            " hjkl:move  Enter:open  Esc:back  /:search  p:popular  ?:help  q:quit"
        }
        _ => " hjkl:move  Enter:open  /:search  p:popular  ?:help  q:quit",
    };

    let mut spans = vec![Span::styled(hints, theme.footer_style())];
    spans.push(Span::styled("   ", theme.footer_style()));
    spans.extend(health_span("backend", app.health.backend, theme));
    spans.push(Span::styled(" ", theme.footer_style()));
    spans.extend(health_span("proxy", app.health.proxy, theme));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn health_span(name: &'static str, healthy: Option<bool>, theme: &Theme) -> [Span<'static>; 2] {
    let color = match healthy {
        Some(true) => theme.healthy,
        Some(false) => theme.unhealthy,
        None => theme.dim,
    };
    [
        Span::styled("\u{25CF}", Style::default().fg(color)),
        Span::styled(format!(" {name}"), theme.footer_style()),
    ]
}
