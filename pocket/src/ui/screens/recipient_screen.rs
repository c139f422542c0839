use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::state::{LoadingState, RecipientState};
use crate::store::UserState;
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme, utils,
};

/// Read-only list of the ledgers money can be sent to from `state.ledger`
pub fn render(f: &mut Frame, state: &RecipientState, store: &UserState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let title = Line::from(vec![
        Span::styled("Send from ", theme::help_text_style()),
        Span::styled(state.ledger.title.clone(), theme::title_style()),
        Span::raw(format!(
            "  {}",
            utils::fmt_money(state.ledger.available, &state.ledger.currency)
        )),
    ]);
    screen_title::render_screen_title(f, title_area, title, &LoadingState::NotStarted);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title("Recipients");

    let recipients: Vec<ListItem> = store
        .accounts
        .iter()
        .filter(|l| l.account != state.ledger.account)
        .map(|l| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:24}", l.title)),
                Span::styled(l.currency.clone(), theme::help_text_style()),
            ]))
        })
        .collect();

    if recipients.is_empty() {
        empty_state::render_empty_state(f, content_area, block, "No other ledgers to send to", None);
    } else {
        f.render_widget(List::new(recipients).block(block), content_area);
    }

    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DOWNSTREAM);
}
