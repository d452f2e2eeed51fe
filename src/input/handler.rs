use crate::app::AppState;
use crate::domain::{Tab, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    let now = Instant::now();

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::Editing => {
            handle_editing_mode(app, key);
            false
        }
        UiMode::ConfirmDelete => {
            handle_confirm_mode(app, key);
            false
        }
        UiMode::History => handle_history_mode(app, key, now),
    }
}

/// Keys shared by every tab
fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::Right => app.next_tab(now),
        KeyCode::BackTab | KeyCode::Left => app.previous_tab(now),
        KeyCode::Char('1') => app.set_tab(Tab::ShoppingList, now),
        KeyCode::Char('2') => app.set_tab(Tab::Counter, now),
        KeyCode::Char('3') => app.set_tab(Tab::Idea, now),
        _ => match app.tab {
            Tab::ShoppingList => handle_shopping_key(app, key),
            Tab::Counter => handle_counter_key(app, key),
            Tab::Idea => {}
        },
    }
    false
}

fn handle_shopping_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        KeyCode::Char('a') | KeyCode::Char('i') => app.start_editing(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_delete_selected(),
        _ => {}
    }
}

fn handle_counter_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('d') => app.complete_thing(),
        KeyCode::Char('h') => app.open_history(),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => app.cancel_editing(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_add_char(c),
        _ => {}
    }
}

fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn handle_history_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Backspace => app.close_history(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_history_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_history_down(),
        KeyCode::Char('r') => app.open_history(),
        KeyCode::Tab => app.next_tab(now),
        KeyCode::BackTab => app.previous_tab(now),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::persistence::{MemoryStore, Settings};
    use std::rc::Rc;

    fn create_test_app() -> AppState {
        let store = Rc::new(MemoryStore::new());
        let clock = Rc::new(FixedClock::new(1_792_249_440_000));
        AppState::new(&Settings::default(), store, clock)
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_item_via_keys() {
        let mut app = create_test_app();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui_mode, UiMode::Editing);
        type_str(&mut app, "qx");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.shopping.items()[0].name, "q");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_q_while_editing_is_text() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));

        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input, "q");
    }

    #[test]
    fn test_delete_flow_via_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Eggs");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.shopping.len(), 1);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.shopping.is_empty());
    }

    #[test]
    fn test_counter_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.tab, Tab::Counter);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.countdown.state().completed_at_time_stamps.len(), 1);

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.ui_mode, UiMode::History);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }
}
