//! Dashboard views.
//!
//! - `filters` - filter bar with the focused field highlighted
//! - `dashboard` - full-screen layout combining filters, charts and results
//! - `status_bar` - keyboard shortcut hints

mod dashboard;
mod filters;
mod status_bar;

pub use dashboard::render_dashboard;
pub use status_bar::{KeyHint, hints};
