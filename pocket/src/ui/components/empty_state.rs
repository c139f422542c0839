//! Centered "no data" and "loading" messages.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Render a message in place of an empty list, with an optional hint below it
pub fn render_empty_state(f: &mut Frame, area: Rect, block: Block, message: &str, hint: Option<&str>) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::help_text_style())),
    ];

    if let Some(hint_text) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint_text,
            theme::help_text_style(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(paragraph, area);
}

/// Render a loading message while nothing cached can be shown
pub fn render_loading_state(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::loading_style())),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(title),
    );

    f.render_widget(paragraph, area);
}
