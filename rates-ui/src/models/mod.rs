mod filters;

pub use filters::{DEFAULT_INCOME, FocusField, Filters};
