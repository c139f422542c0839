use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{DetailsState, LoadingState};
use crate::ui::{
    components::{help_bar, screen_title},
    layouts, theme, utils,
};

pub fn render(f: &mut Frame, state: &DetailsState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());
    let posting = &state.posting;

    let title = Line::from(vec![
        Span::styled(posting.action.clone(), theme::title_style()),
        Span::styled(format!("  {}", state.ledger.title), theme::help_text_style()),
    ]);
    screen_title::render_screen_title(f, title_area, title, &LoadingState::NotStarted);

    let field = |label: &'static str, value: Span<'static>| {
        Line::from(vec![
            Span::styled(format!("{:12}", label), theme::section_style()),
            value,
        ])
    };

    let lines = vec![
        Line::from(""),
        field("Amount", utils::fmt_posting_amount(posting)),
        field("Status", utils::status_span(posting.status)),
        field("When", Span::raw(utils::fmt_posting_datetime(posting))),
        field("Currency", Span::raw(posting.currency.clone())),
        field("Reference", Span::raw(posting.action_key.clone())),
    ];

    let details = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title("Transaction"),
    );
    f.render_widget(details, content_area);

    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DOWNSTREAM);
}
