pub mod empty_state;
pub mod help_bar;
pub mod help_popup;
pub mod screen_title;
