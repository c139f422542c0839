//! Colors, layout constants and shared styles for every screen.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Incoming money
pub const COLOR_CREDIT: Color = Color::Green;

/// Outgoing money
pub const COLOR_DEBIT: Color = Color::White;

/// Postings that have not cleared yet
pub const COLOR_PENDING: Color = Color::Yellow;

/// Failed or cancelled postings
pub const COLOR_FAILED: Color = Color::Red;

pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

/// Day section headers
pub const COLOR_SECTION: Color = Color::Yellow;

pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Screen titles and the active ledger tab
pub const COLOR_TITLE: Color = Color::Cyan;

pub const COLOR_LOADING: Color = Color::Yellow;

/// Border flash after the list received fresh data
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

pub const COLOR_BORDER: Color = Color::DarkGray;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 1;

pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

pub const TABLE_COLUMN_SPACING: u16 = 2;

// =============================================================================
// Style Functions
// =============================================================================

pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn section_style() -> Style {
    Style::default()
        .fg(COLOR_SECTION)
        .add_modifier(Modifier::BOLD)
}

pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

pub fn loaded_style() -> Style {
    Style::default().fg(COLOR_CREDIT)
}

pub fn failed_style() -> Style {
    Style::default().fg(COLOR_FAILED)
}

pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}

pub fn border_style() -> Style {
    Style::default().fg(COLOR_BORDER)
}

/// Gradient overlays over the list edge, approximated by dimming what lies beneath
pub fn gradient_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// Approximate an opacity in a terminal: fully hidden, dimmed or plain
pub fn faded(style: Style, opacity: f32) -> Style {
    if opacity <= 0.05 {
        style.fg(Color::Reset).add_modifier(Modifier::HIDDEN)
    } else if opacity < 0.6 {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

pub fn amount_color(is_credit: bool) -> Color {
    if is_credit {
        COLOR_CREDIT
    } else {
        COLOR_DEBIT
    }
}
