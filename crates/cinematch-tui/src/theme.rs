use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
pub struct Theme {
    pub rating_high: Color,
    pub rating_mid: Color,
    pub rating_low: Color,
    pub placeholder: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub healthy: Color,
    pub unhealthy: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            rating_high: Color::Rgb(0, 210, 0),
            rating_mid: Color::Yellow,
            rating_low: Color::Red,
            placeholder: Color::DarkGray,

            header_fg: Color::Black,
            header_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(30, 50, 30),
            active: Color::Cyan,
            spinner: Color::Cyan,
            healthy: Color::Rgb(0, 210, 0),
            unhealthy: Color::Red,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Modern theme: white text, electric blue accents, dark blue header.
    pub fn modern() -> Self {
        Self {
            rating_high: Color::Rgb(0, 200, 80),
            rating_mid: Color::Rgb(255, 200, 0),
            rating_low: Color::Rgb(255, 80, 80),
            placeholder: Color::Rgb(120, 120, 140),

            header_fg: Color::White,
            header_bg: Color::Rgb(30, 60, 120),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            highlight_bg: Color::Rgb(30, 40, 80),
            active: Color::Rgb(60, 140, 255),
            spinner: Color::Rgb(60, 140, 255),
            healthy: Color::Rgb(0, 200, 80),
            unhealthy: Color::Rgb(255, 80, 80),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    /// Theme by name; anything unrecognized falls back to hacker.
    pub fn from_name(name: &str) -> Self {
        match name {
            "modern" => Self::modern(),
            _ => Self::hacker(),
        }
    }

    pub fn rating_color(&self, vote_average: Option<f64>) -> Color {
        match vote_average {
            Some(v) if v >= 7.0 => self.rating_high,
            Some(v) if v >= 5.0 => self.rating_mid,
            Some(_) => self.rating_low,
            None => self.dim,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }
}
