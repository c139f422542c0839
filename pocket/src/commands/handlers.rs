use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    if event.modifiers.ctrl && key == Key::Char('c') {
        return Some(AppCommand::Quit);
    }

    // Help popup swallows everything but closing it
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        (Screen::Home, key) => handle_home_keys(key),

        // Downstream screens only know how to go back
        (_, Key::Esc | Key::Left | Key::Char('h') | Key::Backspace) => {
            Some(AppCommand::NavigateBack)
        }

        _ => None,
    }
}

fn handle_home_keys(key: Key) -> Option<AppCommand> {
    match key {
        Key::Char('j') | Key::Down => Some(AppCommand::SelectNext),
        Key::Char('k') | Key::Up => Some(AppCommand::SelectPrevious),
        Key::Char('g') | Key::Home => Some(AppCommand::NavigateToTop),
        Key::Char('G') | Key::End => Some(AppCommand::NavigateToBottom),
        Key::PageDown => Some(AppCommand::LoadMoreTransactions),

        Key::Char('h') | Key::Left => Some(AppCommand::PreviousLedger),
        Key::Char('l') | Key::Right => Some(AppCommand::NextLedger),
        Key::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|d| AppCommand::ChooseActiveLedger {
                index: d as usize - 1,
            }),

        Key::Enter => Some(AppCommand::OpenTransaction),
        Key::Char('s') => Some(AppCommand::SendMoney),
        Key::Char('r') => Some(AppCommand::Refresh),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: Key) -> KeyEvent {
        KeyEvent::new(k)
    }

    #[test]
    fn digits_pick_a_ledger_tab() {
        let state = AppState::new();
        assert_eq!(
            handle_key_input(key(Key::Char('1')), &state),
            Some(AppCommand::ChooseActiveLedger { index: 0 })
        );
        assert_eq!(
            handle_key_input(key(Key::Char('9')), &state),
            Some(AppCommand::ChooseActiveLedger { index: 8 })
        );
        assert_eq!(handle_key_input(key(Key::Char('0')), &state), None);
    }

    #[test]
    fn help_popup_captures_keys() {
        let mut state = AppState::new();
        state.help_visible = true;
        assert_eq!(handle_key_input(key(Key::Char('j')), &state), None);
        assert_eq!(
            handle_key_input(key(Key::Esc), &state),
            Some(AppCommand::ToggleHelp)
        );
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let state = AppState::new();
        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('c')), &state),
            Some(AppCommand::Quit)
        );
    }

    #[test]
    fn escape_on_home_does_nothing() {
        let state = AppState::new();
        assert_eq!(handle_key_input(key(Key::Esc), &state), None);
    }
}
