//! Bottom bar with the key hints of the current screen.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text)
        .style(theme::help_text_style())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_style()),
        );

    f.render_widget(help, area);
}

pub const HELP_TEXT_HOME: &str = "j/k move · h/l ledger · Enter details · s send · r refresh · ? help";

pub const HELP_TEXT_DOWNSTREAM: &str = "Esc back · ? help · q quit";
