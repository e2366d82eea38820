mod update;


use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use cinematch_core::{Movie, Service, SessionState, ViewState};

use crate::theme::Theme;
use crate::tui_event::{BackendCommand, BackendEvent};

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Last known reachability of the two services. `None` = not probed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthState {
    pub backend: Option<bool>,
    pub proxy: Option<bool>,
}

/// Main application state.
pub struct App {
    /// Latest state published by the controller.
    pub session: SessionState,
    pub input_mode: InputMode,
    /// Text in the search box (kept after submit, like a form field).
    pub search_input: String,
    /// Index of the highlighted card in the visible grid.
    pub cursor: usize,
    /// Cards per grid row at the last render (for up/down moves).
    pub grid_columns: usize,
    pub tick: usize,
    pub theme: Theme,
    pub should_quit: bool,
    pub show_help: bool,
    pub health: HealthState,
    /// Channel to send commands to the controller task.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            session: SessionState::default(),
            input_mode: InputMode::Normal,
            search_input: String::new(),
            cursor: 0,
            grid_columns: 1,
            tick: 0,
            theme,
            should_quit: false,
            show_help: false,
            health: HealthState::default(),
            backend_cmd_tx: None,
        }
    }

    pub(crate) fn send(&self, cmd: BackendCommand) {
        if let Some(tx) = &self.backend_cmd_tx
            && tx.send(cmd).is_err()
        {
            tracing::warn!("controller task is gone, command dropped");
        }
    }

    /// Movies in the grid currently on screen.
    pub fn visible_movies(&self) -> &[Movie] {
        self.session.visible_movies()
    }

    pub fn highlighted(&self) -> Option<&Movie> {
        self.visible_movies().get(self.cursor)
    }

    /// Take a newly published session state. The cursor goes back to the
    /// first card whenever the view or its list changes.
    pub fn set_session(&mut self, next: SessionState) {
        let list_changed = next.view != self.session.view
            || next.visible_movies() != self.session.visible_movies();
        self.session = next;
        if list_changed {
            self.cursor = 0;
        } else {
            self.cursor = self
                .cursor
                .min(self.visible_movies().len().saturating_sub(1));
        }
    }

    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Health { service, healthy } => match service {
                Service::Backend => self.health.backend = Some(healthy),
                Service::Proxy => self.health.proxy = Some(healthy),
            },
        }
    }

    /// Render the current state to the frame.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // header + search box
            Constraint::Min(3),    // body
            Constraint::Length(1), // footer
        ])
        .split(f.area());

        crate::view::header::render(f, chunks[0], self);

        if self.session.loading {
            crate::view::render_loading(f, chunks[1], &self.theme, self.tick);
        } else {
            match &self.session.view {
                ViewState::Details(_) => crate::view::detail::render_in(f, self, chunks[1]),
                ViewState::Popular | ViewState::Search(_) => {
                    crate::view::browse::render_in(f, self, chunks[1])
                }
            }
        }

        crate::view::footer::render(f, chunks[2], self);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
    }
}
