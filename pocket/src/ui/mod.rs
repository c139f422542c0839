pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::state::AppState;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
///
/// Only interior-mutable render bookkeeping (table offset, viewport size) is
/// touched; everything else is read-only.
pub fn render_app(f: &mut Frame, state: &AppState) {
    match state.current_screen() {
        Screen::Home => {
            home_screen::render(f, &state.home, state.store.state());
        }
        Screen::ChooseRecipient(recipient_state) => {
            recipient_screen::render(f, recipient_state, state.store.state());
        }
        Screen::TransactionDetails(details_state) => {
            details_screen::render(f, details_state);
        }
    }

    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }
}
