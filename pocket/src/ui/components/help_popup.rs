use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = help_items(screen);

    let (width, height) = layouts::popup_sizes::LARGE;
    let area = layouts::centered_popup(width, height, f.area());
    let block = Block::default()
        .title(" Help (press ? or Esc to close) ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(theme::accent_border_style());
    let inner = block.inner(area);

    // The help sheet covers whichever screen is underneath
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::section_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        Screen::Home => {
            items.push(("↓/j", "Next transaction (collapses the header)"));
            items.push(("↑/k", "Previous transaction"));
            items.push(("g/Home", "Back to the top"));
            items.push(("G/End", "Last loaded transaction"));
            items.push(("Page Down", "Load older transactions"));
            items.push(("←/h →/l", "Switch ledger"));
            items.push(("1-9", "Pick a ledger by position"));
            items.push(("Enter", "Open the selected transaction"));
            items.push(("s", "Send money from this ledger"));
            items.push(("r", "Refresh"));
        }
        Screen::ChooseRecipient(..) | Screen::TransactionDetails(..) => {
            items.push(("Esc/←/h", "Back to the transactions"));
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("?", "Toggle this help"));
    items.push(("q/Ctrl-c", "Quit application"));

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_screen_lists_quit() {
        assert!(help_items(&Screen::Home).iter().any(|(k, _)| *k == "q/Ctrl-c"));
    }
}
