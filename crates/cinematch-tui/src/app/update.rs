use cinematch_core::ViewState;

use super::{App, InputMode};
use crate::action::Action;
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            Action::Resize(..) | Action::None => return false,
            _ => {}
        }

        // Help overlay swallows everything except closing it
        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::NavigateBack) {
                self.show_help = false;
            }
            return false;
        }

        if self.input_mode == InputMode::Search {
            self.update_search(action);
            return false;
        }

        match action {
            Action::ToggleHelp => self.show_help = true,
            Action::StartSearch => self.input_mode = InputMode::Search,
            Action::Home => self.send(BackendCommand::LoadPopular),
            Action::DrillIn => {
                if !self.session.loading
                    && let Some(movie) = self.highlighted().cloned()
                {
                    self.send(BackendCommand::SelectMovie(movie));
                }
            }
            Action::NavigateBack => {
                if matches!(self.session.view, ViewState::Details(_)) {
                    self.send(BackendCommand::Back);
                }
            }
            Action::MoveLeft => self.cursor = self.cursor.saturating_sub(1),
            Action::MoveRight => self.move_to(self.cursor + 1),
            Action::MoveUp => self.cursor = self.cursor.saturating_sub(self.grid_columns.max(1)),
            Action::MoveDown => self.move_to(self.cursor + self.grid_columns.max(1)),
            Action::GoTop => self.cursor = 0,
            Action::GoBottom => {
                self.cursor = self.visible_movies().len().saturating_sub(1);
            }
            _ => {}
        }
        false
    }

    fn update_search(&mut self, action: Action) {
        match action {
            Action::SearchInput('\x08') => {
                self.search_input.pop();
            }
            Action::SearchInput(ch) => self.search_input.push(ch),
            Action::SearchConfirm => {
                self.input_mode = InputMode::Normal;
                self.send(BackendCommand::Search(self.search_input.clone()));
            }
            Action::SearchCancel => self.input_mode = InputMode::Normal,
            _ => {}
        }
    }

    /// Move the cursor to `target` if a card exists there.
    fn move_to(&mut self, target: usize) {
        if target < self.visible_movies().len() {
            self.cursor = target;
        }
    }
}
