//! Title row: caller-provided spans on the left, load status on the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use throbber_widgets_tui::{Throbber, BRAILLE_EIGHT};

use crate::state::LoadingState;
use crate::ui::theme;

pub fn render_screen_title(f: &mut Frame, area: Rect, title: Line, loading_state: &LoadingState) {
    let [title_area, status_area] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(status_width(loading_state, area.width)),
    ])
    .areas(area);

    f.render_widget(Paragraph::new(title), title_area);

    let status = match loading_state {
        LoadingState::NotStarted => return,
        LoadingState::Loading(throbber_state) => {
            let throbber = Throbber::default().throbber_set(BRAILLE_EIGHT);
            f.render_stateful_widget(throbber, status_area, &mut throbber_state.clone());
            return;
        }
        LoadingState::Loaded => Span::styled("✓", theme::loaded_style()),
        // Whatever is on screen stays; the reason goes next to the title
        LoadingState::Error(reason) => Span::styled(format!("! {reason}"), theme::failed_style()),
    };
    f.render_widget(Paragraph::new(Line::from(status).right_aligned()), status_area);
}

/// One column for the spinner or check, room for the reason after a failure
fn status_width(loading_state: &LoadingState, available: u16) -> u16 {
    match loading_state {
        LoadingState::Error(reason) => {
            let wanted = u16::try_from(reason.chars().count() + 2).unwrap_or(u16::MAX);
            wanted.min(available / 2)
        }
        _ => 1,
    }
}
