//! Input handling: keys become [`AppCommand`]s, commands become state changes
//! and load requests.

pub mod executor;
pub mod handlers;

pub use crate::events::AppCommand;
