mod app;
pub mod app_core;
mod background;
mod cache;
pub mod commands;
pub mod error;
pub mod events;
pub mod home;
pub mod input;
pub mod logging;
pub mod settings;
pub mod state;
pub mod store;
pub mod ui;

pub use app::App;

// Always expose testing module (integration tests need it)
pub mod testing;
