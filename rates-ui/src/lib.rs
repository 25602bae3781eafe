pub mod app;
pub mod components;
pub mod config;
pub mod keymap;
pub mod logging;
pub mod messages;
pub mod models;
pub mod reports;
pub mod state;
pub mod terminal;
pub mod utils;
pub mod views;

use chrono::{Datelike, Local};

/// Calendar year on the local clock; drives every year default.
pub fn current_year() -> i32 {
    Local::now().year()
}
