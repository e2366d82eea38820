use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Search => map_key_search(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::MoveRight,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::Enter => Action::DrillIn,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => Action::NavigateBack,
        KeyCode::Char('p') => Action::Home,
        KeyCode::Char('/') | KeyCode::Char('s') => Action::StartSearch,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn map_key_search(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::SearchCancel,
        KeyCode::Enter => Action::SearchConfirm,
        KeyCode::Char(c) => Action::SearchInput(c),
        KeyCode::Backspace => Action::SearchInput('\x08'), // sentinel for backspace
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let evt = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&evt, &InputMode::Normal), Action::Quit);
        assert_eq!(map_event(&evt, &InputMode::Search), Action::Quit);
    }

    #[test]
    fn letters_are_text_while_searching() {
        let evt = press(KeyCode::Char('q'));
        assert_eq!(map_event(&evt, &InputMode::Normal), Action::Quit);
        assert_eq!(map_event(&evt, &InputMode::Search), Action::SearchInput('q'));
    }

    #[test]
    fn enter_and_esc_depend_on_mode() {
        assert_eq!(map_event(&press(KeyCode::Enter), &InputMode::Normal), Action::DrillIn);
        assert_eq!(
            map_event(&press(KeyCode::Enter), &InputMode::Search),
            Action::SearchConfirm
        );
        assert_eq!(
            map_event(&press(KeyCode::Esc), &InputMode::Normal),
            Action::NavigateBack
        );
        assert_eq!(
            map_event(&press(KeyCode::Esc), &InputMode::Search),
            Action::SearchCancel
        );
    }

    #[test]
    fn backspace_uses_sentinel_in_search() {
        assert_eq!(
            map_event(&press(KeyCode::Backspace), &InputMode::Search),
            Action::SearchInput('\x08')
        );
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            map_event(&Event::Resize(80, 24), &InputMode::Normal),
            Action::Resize(80, 24)
        );
    }
}
