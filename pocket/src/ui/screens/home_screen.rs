use chrono::Local;
use ratatui::{
    prelude::*,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table},
};

use crate::home::{animate, HomeAnimation};
use crate::state::HomeState;
use crate::store::UserState;
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme, utils,
};

pub fn render(f: &mut Frame, home: &HomeState, store: &UserState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let loading = if home.accounts_loading.is_loading() {
        &home.accounts_loading
    } else {
        &home.loading
    };
    screen_title::render_screen_title(f, title_area, ledger_tabs(home, store), loading);
    render_content(f, content_area, home, store);
    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_HOME);
}

/// One tab per ledger, the selected one highlighted
fn ledger_tabs<'a>(home: &HomeState, store: &'a UserState) -> Line<'a> {
    let mut spans = vec![Span::styled("pocket ", theme::title_style())];
    let active = home.active_ledger.as_ref().map(|l| &l.account);

    for (i, ledger) in store.accounts.iter().enumerate() {
        let style = if Some(&ledger.account) == active {
            theme::title_style().add_modifier(Modifier::REVERSED)
        } else {
            theme::help_text_style()
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, ledger.title), style));
    }

    Line::from(spans)
}

fn render_content(f: &mut Frame, area: Rect, home: &HomeState, store: &UserState) {
    let has_ledgers = !store.accounts.is_empty();
    let offset = home.scroll.offset();
    let animation = animate(offset, &home.geometry, has_ledgers);
    let units_per_row = home.units_per_row;

    if !has_ledgers {
        if home.accounts_loading.is_loading() {
            empty_state::render_loading_state(f, area, "Ledgers", "Loading ledgers...");
        } else {
            // Without ledgers the list edge rests higher, under a shorter header
            let edge_rows = to_rows(animation.top_gradient_top, units_per_row);
            let (_, placeholder_area) = layouts::home_layout(area, edge_rows);
            empty_state::render_empty_state(
                f,
                placeholder_area,
                list_block(home),
                "No ledgers yet",
                Some("Press r to try again"),
            );
            render_gradients(f, area, &animation, units_per_row);
        }
        home.viewport_rows.set(0);
        return;
    }

    let header_rows = to_rows(animation.list_header_top, units_per_row);
    // Postings start below the part of the header not yet scrolled away
    let body_rows = to_rows(
        home.geometry.bottom_bound - offset + animation.content_margin_top,
        units_per_row,
    );
    let (header_area, list_area) = layouts::home_layout(area, header_rows);

    render_header(f, header_area, home, &animation);
    render_list(f, list_area, home, &animation, body_rows.saturating_sub(header_rows));
    render_gradients(f, area, &animation, units_per_row);
}

fn to_rows(units: f32, units_per_row: f32) -> u16 {
    (units / units_per_row).round().max(0.0) as u16
}

/// Shade the band from the shadow gradient down to the top gradient row
fn render_gradients(f: &mut Frame, area: Rect, animation: &HomeAnimation, units_per_row: f32) {
    if area.height == 0 {
        return;
    }
    let top = to_rows(animation.top_gradient_top, units_per_row).min(area.height - 1);
    let shadow = to_rows(animation.shadow_gradient_top, units_per_row).min(top);
    let band = Rect {
        y: area.y + shadow,
        height: top - shadow + 1,
        ..area
    };
    f.buffer_mut().set_style(band, theme::gradient_style());
}

/// Balance, ledger name and the action row, slid up as the list collapses the header
fn render_header(f: &mut Frame, area: Rect, home: &HomeState, animation: &HomeAnimation) {
    let Some(ledger) = home.active_ledger.as_ref() else {
        return;
    };
    let balance = utils::fmt_money(ledger.available, &ledger.currency);

    let actions_style = theme::faded(theme::help_text_style(), animation.actions_opacity);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(balance.clone(), theme::title_style())).centered(),
        Line::from(Span::styled(ledger.title.clone(), theme::help_text_style())).centered(),
        Line::from(""),
        Line::from(Span::styled("[s] Send     [r] Refresh", actions_style)).centered(),
    ];

    let skip = to_rows(-animation.header_translate_y, home.units_per_row);
    f.render_widget(Paragraph::new(lines).scroll((skip, 0)), area);

    if animation.hidden_info_opacity > 0.0 && area.height > 0 {
        // Compact balance that takes over once the big one has scrolled away
        let row = to_rows(animation.hidden_info_top, home.units_per_row).min(area.height - 1);
        let banner_area = Rect {
            y: area.y + row,
            height: 1,
            ..area
        };
        let banner = Line::from(vec![
            Span::raw(format!("{} ", ledger.title)),
            Span::styled(balance, theme::title_style()),
        ])
        .centered()
        .style(theme::faded(Style::default(), animation.hidden_info_opacity));
        f.render_widget(Paragraph::new(banner), banner_area);
    }
}

fn list_block(home: &HomeState) -> Block<'static> {
    let border_style = if home.layout_transition > 0 {
        theme::accent_border_style()
    } else {
        theme::border_style()
    };
    Block::default()
        .borders(Borders::TOP)
        .border_style(border_style)
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    home: &HomeState,
    animation: &HomeAnimation,
    margin_rows: u16,
) {
    let mut block = list_block(home).padding(Padding::top(margin_rows));
    if animation.fixed_at_top {
        block = block.border_style(theme::section_style());
    }
    home.viewport_rows.set(block.inner(area).height);

    if home.sections.is_empty() {
        if home.loading.is_loading() {
            empty_state::render_loading_state(f, area, "", "Loading transactions...");
        } else {
            empty_state::render_empty_state(f, area, block, "There are no transactions", None);
        }
        return;
    }

    let mut rows = Vec::with_capacity(home.posting_count() + home.sections.len());
    let mut selected_row = None;
    let mut posting_index = 0;

    for section in &home.sections {
        rows.push(Row::new(vec![
            Cell::from(""),
            Cell::from(Span::styled(section.title.clone(), theme::section_style())),
            Cell::from(""),
            Cell::from(""),
        ]));

        for posting in &section.postings {
            if home.selected == Some(posting_index) {
                selected_row = Some(rows.len());
            }
            rows.push(Row::new(vec![
                Cell::from(utils::fmt_posting_time(posting, &Local)),
                Cell::from(posting.action.clone()),
                Cell::from(utils::status_span(posting.status)),
                Cell::from(Text::from(utils::fmt_posting_amount(posting)).right_aligned()),
            ]));
            posting_index += 1;
        }
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(16),
        ],
    )
    .block(block)
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .row_highlight_style(theme::selection_style());

    let mut table_state = home.table_state.borrow_mut();
    table_state.select(selected_row);
    f.render_stateful_widget(table, area, &mut table_state);
}
